//! The trusted store whitelist.

use super::is_in_range;
use crate::config::{WhitelistConfig, WhitelistSettings};
use crate::models::{parse_dotted_quad, CidrRange, SessionRenewalPolicy};
use std::fmt;

/// Why an address was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason<'a> {
    /// Equal to a configured exact-match address.
    Exact(&'a str),
    /// Inside a configured CIDR range.
    Range(&'a str),
}

impl fmt::Display for MatchReason<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::Exact(ip) => write!(f, "exact match {ip}"),
            MatchReason::Range(cidr) => write!(f, "in range {cidr}"),
        }
    }
}

/// Set of trusted store addresses and ranges, loaded once and then read-only.
///
/// Share it by reference or behind an `Arc`; every lookup takes `&self`.
#[derive(Debug, Clone, Default)]
pub struct IpWhitelist {
    config: WhitelistConfig,
}

impl IpWhitelist {
    pub fn new(config: WhitelistConfig) -> IpWhitelist {
        IpWhitelist { config }
    }

    pub fn from_settings(settings: &WhitelistSettings) -> IpWhitelist {
        IpWhitelist::new(WhitelistConfig::from_settings(settings))
    }

    /// True if `ip` equals an exact-match entry or falls in a configured range.
    pub fn is_whitelisted(&self, ip: &str) -> bool {
        self.match_reason(ip).is_some()
    }

    /// The first entry that accepts `ip`, exact matches checked before ranges.
    pub fn match_reason(&self, ip: &str) -> Option<MatchReason<'_>> {
        if let Some(exact) = self.config.exact_ips.iter().find(|exact| *exact == ip) {
            return Some(MatchReason::Exact(exact));
        }
        self.config
            .ranges
            .iter()
            .find(|cidr| is_in_range(ip, cidr.as_str()))
            .map(|cidr| MatchReason::Range(cidr))
    }

    /// Session timing for `ip`, only if it is a trusted store location.
    pub fn renewal_policy_for(&self, ip: &str) -> Option<&SessionRenewalPolicy> {
        if self.is_whitelisted(ip) {
            Some(&self.config.session_renewal)
        } else {
            None
        }
    }

    pub fn exact_ips(&self) -> &[String] {
        &self.config.exact_ips
    }

    pub fn ranges(&self) -> &[String] {
        &self.config.ranges
    }

    pub fn session_renewal(&self) -> &SessionRenewalPolicy {
        &self.config.session_renewal
    }

    pub fn config(&self) -> &WhitelistConfig {
        &self.config
    }

    /// Exact-match entries that are not dotted-quad addresses.
    pub fn invalid_exact_ips(&self) -> Vec<&str> {
        self.config
            .exact_ips
            .iter()
            .filter(|ip| parse_dotted_quad(ip).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Range entries that can never match any address.
    pub fn invalid_ranges(&self) -> Vec<&str> {
        self.config
            .ranges
            .iter()
            .filter(|cidr| CidrRange::new(cidr).is_err())
            .map(String::as_str)
            .collect()
    }
}
