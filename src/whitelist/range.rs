//! String-level CIDR membership.

use crate::models::{parse_dotted_quad, CidrRange};

/// Check whether `ip` falls inside `cidr`.
///
/// Both arguments accept `&str` or `Option<&str>`; a missing argument, a
/// malformed address, or a malformed range all yield `false`. Nothing here
/// panics.
///
/// # Examples
/// ```
/// use store_ip_whitelist::is_in_range;
/// assert!(is_in_range("10.0.255.255", "10.0.0.0/16"));
/// assert!(!is_in_range("10.1.0.0", "10.0.0.0/16"));
/// assert!(!is_in_range(None::<&str>, "192.168.1.0/24"));
/// ```
pub fn is_in_range<'a, 'b>(
    ip: impl Into<Option<&'a str>>,
    cidr: impl Into<Option<&'b str>>,
) -> bool {
    let (ip, cidr) = match (ip.into(), cidr.into()) {
        (Some(ip), Some(cidr)) => (ip, cidr),
        (ip, cidr) => {
            log::warn!("is_in_range called with a missing argument: ip={ip:?} cidr={cidr:?}");
            return false;
        }
    };

    let range = match CidrRange::new(cidr) {
        Ok(range) => range,
        Err(e) => {
            log::debug!("No match against '{cidr}': {e}");
            return false;
        }
    };

    match parse_dotted_quad(ip) {
        Some(addr) => range.contains_bits(addr),
        None => {
            log::debug!("No match for '{ip}': not a dotted-quad IPv4 address");
            false
        }
    }
}
