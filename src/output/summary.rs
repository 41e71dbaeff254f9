//! Whitelist summaries and lookup reports.

use super::terminal::{format_field, trust_label};
use crate::models::CidrRange;
use crate::IpWhitelist;
use colored::Colorize;
use std::error::Error;

const CIDR_WIDTH: usize = 18;

/// Describe one configured range: bounds and size, or why it is unusable.
pub fn range_line(cidr: &str) -> String {
    match CidrRange::new(cidr) {
        Ok(range) => format!(
            "{} {} - {} ({} addresses)",
            format_field(cidr, CIDR_WIDTH),
            range.lo(),
            range.hi(),
            range.num_addresses()
        ),
        Err(e) => format!("{} {} {e}", format_field(cidr, CIDR_WIDTH), "invalid".on_red()),
    }
}

/// One report line for a checked address.
pub fn check_line(whitelist: &IpWhitelist, ip: &str) -> String {
    match whitelist.match_reason(ip) {
        Some(reason) => format!("{ip}: {} ({reason})", trust_label(true)),
        None => format!("{ip}: {}", trust_label(false)),
    }
}

/// Print the loaded whitelist to stdout.
pub fn print_whitelist(whitelist: &IpWhitelist) {
    log::info!(
        "#Start print_whitelist() exact={} ranges={}",
        whitelist.exact_ips().len(),
        whitelist.ranges().len()
    );

    println!("Exact IPs ({}):", whitelist.exact_ips().len());
    let invalid_ips = whitelist.invalid_exact_ips();
    for ip in whitelist.exact_ips() {
        if invalid_ips.contains(&ip.as_str()) {
            println!("  {} {}", format_field(ip, CIDR_WIDTH), "not an IPv4 address".yellow());
        } else {
            println!("  {}", format_field(ip, CIDR_WIDTH));
        }
    }

    println!("Ranges ({}):", whitelist.ranges().len());
    for cidr in whitelist.ranges() {
        println!("  {}", range_line(cidr));
    }

    println!("Session renewal: {}", whitelist.session_renewal());
}

/// Print one line per checked address.
pub fn print_check(whitelist: &IpWhitelist, ip: &str) {
    println!("{}", check_line(whitelist, ip));
}

/// Pretty JSON of the normalized configuration.
pub fn whitelist_summary_json(whitelist: &IpWhitelist) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(whitelist.config())
        .map_err(|e| format!("Error serializing whitelist: {e}"))?;
    Ok(json)
}
