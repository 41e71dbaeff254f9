//! Domain models for the store IP whitelist.
//!
//! - [`CidrRange`] and dotted-quad helpers for IPv4 matching
//! - [`SessionRenewalPolicy`] - session timing for trusted locations

mod ipv4;
mod session;

// Re-export public types
pub use ipv4::{get_cidr_mask, parse_dotted_quad, parse_prefix, CidrRange, MAX_LENGTH};
pub use session::{
    parse_millis_or_default, MillisSetting, SessionRenewalPolicy, DEFAULT_CHECK_INTERVAL_MS,
    DEFAULT_MAX_SESSION_DURATION_MS, DEFAULT_RENEW_THRESHOLD_MS,
};
