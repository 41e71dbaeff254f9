//! Whitelist configuration.
//!
//! Raw [`WhitelistSettings`] come from the process environment (with an
//! optional `.env` file) or from a JSON file, and are normalized once into an
//! immutable [`WhitelistConfig`].

use crate::models::{parse_dotted_quad, CidrRange, SessionRenewalPolicy};
use serde::{Deserialize, Serialize};
use std::error::Error;

pub const ENV_STORE_IP: &str = "STORE_IP";
pub const ENV_ADDITIONAL_STORE_IPS: &str = "ADDITIONAL_STORE_IPS";
pub const ENV_STORE_IP_RANGES: &str = "STORE_IP_RANGES";
pub const ENV_SESSION_CHECK_INTERVAL: &str = "SESSION_CHECK_INTERVAL";
pub const ENV_SESSION_RENEW_THRESHOLD: &str = "SESSION_RENEW_THRESHOLD";
pub const ENV_SESSION_MAX_DURATION: &str = "SESSION_MAX_DURATION";

/// Raw configuration values, exactly as provided.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WhitelistSettings {
    /// Primary store address (comma-separated list accepted).
    pub store_ip: Option<String>,
    /// Comma-separated additional store addresses.
    pub additional_store_ips: Option<String>,
    /// Comma-separated CIDR ranges.
    pub store_ip_ranges: Option<String>,
    pub session_check_interval: Option<String>,
    pub session_renew_threshold: Option<String>,
    pub session_max_duration: Option<String>,
}

impl WhitelistSettings {
    /// Read settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> WhitelistSettings {
        if let Err(e) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through any key lookup, keyed by the `ENV_*` names.
    pub fn from_lookup<F>(lookup: F) -> WhitelistSettings
    where
        F: Fn(&str) -> Option<String>,
    {
        WhitelistSettings {
            store_ip: lookup(ENV_STORE_IP),
            additional_store_ips: lookup(ENV_ADDITIONAL_STORE_IPS),
            store_ip_ranges: lookup(ENV_STORE_IP_RANGES),
            session_check_interval: lookup(ENV_SESSION_CHECK_INTERVAL),
            session_renew_threshold: lookup(ENV_SESSION_RENEW_THRESHOLD),
            session_max_duration: lookup(ENV_SESSION_MAX_DURATION),
        }
    }

    /// Read settings from a JSON file.
    ///
    /// # Returns
    /// * `Ok(WhitelistSettings)` - The parsed settings
    /// * `Err` - If the file can't be read or a field has the wrong type
    pub fn from_json_file(path: &str) -> Result<WhitelistSettings, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading config file {path}: {e}"))?;
        log::info!("Reading whitelist settings from: {path}");
        let settings = Self::from_json_str(&json)
            .map_err(|e| format!("Error parsing config file {path}: {e}"))?;
        Ok(settings)
    }

    /// Parse settings from JSON text; errors name the offending field path.
    pub fn from_json_str(json: &str) -> Result<WhitelistSettings, Box<dyn Error>> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let settings: WhitelistSettings = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| format!("path={} error={}", e.path(), e.inner()))?;
        Ok(settings)
    }
}

/// Normalized, immutable whitelist configuration.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WhitelistConfig {
    /// Exact-match addresses, primary first. Duplicates are kept.
    pub exact_ips: Vec<String>,
    /// CIDR ranges as configured, malformed entries included.
    pub ranges: Vec<String>,
    pub session_renewal: SessionRenewalPolicy,
}

impl WhitelistConfig {
    /// A whitelist that trusts nothing, with default session timing.
    pub fn empty() -> WhitelistConfig {
        WhitelistConfig {
            exact_ips: vec![],
            ranges: vec![],
            session_renewal: SessionRenewalPolicy::default(),
        }
    }

    pub fn from_settings(settings: &WhitelistSettings) -> WhitelistConfig {
        let mut exact_ips = split_list(settings.store_ip.as_deref());
        exact_ips.extend(split_list(settings.additional_store_ips.as_deref()));
        let ranges = split_list(settings.store_ip_ranges.as_deref());

        // Malformed entries stay in place; they just never match.
        for ip in exact_ips.iter().filter(|ip| parse_dotted_quad(ip).is_none()) {
            log::debug!("Exact-match entry '{ip}' is not a dotted-quad IPv4 address");
        }
        for range in &ranges {
            if let Err(e) = CidrRange::new(range) {
                log::debug!("CIDR entry '{range}' will never match: {e}");
            }
        }

        let session_renewal = SessionRenewalPolicy::from_raw(
            settings.session_check_interval.as_deref(),
            settings.session_renew_threshold.as_deref(),
            settings.session_max_duration.as_deref(),
        );

        log::info!(
            "Loaded whitelist: {} exact IP(s), {} range(s), session policy: {}",
            exact_ips.len(),
            ranges.len(),
            session_renewal
        );

        WhitelistConfig {
            exact_ips,
            ranges,
            session_renewal,
        }
    }
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self::empty()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MillisSetting;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(None), Vec::<String>::new());
        assert_eq!(split_list(Some("")), Vec::<String>::new());
        assert_eq!(split_list(Some(" , ,")), Vec::<String>::new());
        assert_eq!(
            split_list(Some(" 10.0.0.1 ,,10.0.0.2, ")),
            vec!["10.0.0.1", "10.0.0.2"]
        );
    }

    #[test]
    fn test_from_lookup() {
        let settings = WhitelistSettings::from_lookup(lookup_from(&[
            (ENV_STORE_IP, "192.168.1.100"),
            (ENV_STORE_IP_RANGES, "10.0.0.0/24"),
        ]));
        assert_eq!(settings.store_ip.as_deref(), Some("192.168.1.100"));
        assert_eq!(settings.additional_store_ips, None);
        assert_eq!(settings.store_ip_ranges.as_deref(), Some("10.0.0.0/24"));
    }

    #[test]
    fn test_from_settings_merges_exact_ips() {
        let settings = WhitelistSettings {
            store_ip: Some(" 192.168.1.100 ".to_string()),
            additional_store_ips: Some("192.168.1.101, 10.0.0.50,192.168.1.100".to_string()),
            store_ip_ranges: Some("172.16.0.0/16, 10.0.0.0/24".to_string()),
            ..Default::default()
        };
        let config = WhitelistConfig::from_settings(&settings);
        assert_eq!(
            config.exact_ips,
            vec!["192.168.1.100", "192.168.1.101", "10.0.0.50", "192.168.1.100"]
        );
        assert_eq!(config.ranges, vec!["172.16.0.0/16", "10.0.0.0/24"]);
        assert_eq!(config.session_renewal, SessionRenewalPolicy::default());
    }

    #[test]
    fn test_from_settings_keeps_malformed_entries() {
        let settings = WhitelistSettings {
            store_ip: Some("not-an-ip".to_string()),
            store_ip_ranges: Some("10.0.0.0,10.0.0.0/99".to_string()),
            ..Default::default()
        };
        let config = WhitelistConfig::from_settings(&settings);
        assert_eq!(config.exact_ips, vec!["not-an-ip"]);
        assert_eq!(config.ranges, vec!["10.0.0.0", "10.0.0.0/99"]);
    }

    #[test]
    fn test_from_settings_empty() {
        let settings = WhitelistSettings {
            store_ip: Some(String::new()),
            additional_store_ips: Some(String::new()),
            store_ip_ranges: Some(String::new()),
            ..Default::default()
        };
        let config = WhitelistConfig::from_settings(&settings);
        assert!(config.exact_ips.is_empty());
        assert!(config.ranges.is_empty());
        assert_eq!(config, WhitelistConfig::empty());
    }

    #[test]
    fn test_from_settings_durations() {
        let settings = WhitelistSettings::from_lookup(lookup_from(&[
            (ENV_SESSION_RENEW_THRESHOLD, "600000"),
            (ENV_SESSION_MAX_DURATION, "invalid"),
        ]));
        let policy = WhitelistConfig::from_settings(&settings).session_renewal;
        assert_eq!(policy.check_interval, MillisSetting::Value(300_000));
        assert_eq!(policy.renew_threshold, MillisSetting::Value(600_000));
        assert!(policy.max_session_duration.is_nan());
    }

    #[test]
    fn test_from_settings_blank_duration_is_not_defaulted() {
        let settings = WhitelistSettings::from_lookup(lookup_from(&[
            (ENV_SESSION_CHECK_INTERVAL, "   "),
            (ENV_SESSION_RENEW_THRESHOLD, ""),
        ]));
        let policy = WhitelistConfig::from_settings(&settings).session_renewal;
        assert!(policy.check_interval.is_nan());
        assert_eq!(policy.renew_threshold, MillisSetting::Value(1_800_000));
    }

    #[test]
    fn test_from_json_str() {
        let settings = WhitelistSettings::from_json_str(
            r#"{"store_ip": "10.1.1.1", "store_ip_ranges": "10.2.0.0/16"}"#,
        )
        .unwrap();
        assert_eq!(settings.store_ip.as_deref(), Some("10.1.1.1"));
        assert_eq!(settings.session_check_interval, None);
    }

    #[test]
    fn test_from_json_str_bad_field() {
        let err = WhitelistSettings::from_json_str(r#"{"session_check_interval": 600000}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("session_check_interval"), "got: {err}");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = WhitelistSettings::from_json_file("tests/test_data/does_not_exist.json")
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Error reading config file"), "got: {err}");
    }
}
