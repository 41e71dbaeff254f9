//! Trusted store location lookups.
//!
//! - [`IpWhitelist`] - exact-match and CIDR membership over a loaded config
//! - [`is_in_range`] - the underlying string-level CIDR check

mod ip_whitelist;
mod range;

pub use ip_whitelist::{IpWhitelist, MatchReason};
pub use range::is_in_range;
