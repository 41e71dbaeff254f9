//! Session renewal timing for trusted store locations.
//!
//! Durations arrive as raw configuration strings. An absent or empty value
//! falls back to the default, but a value that is present and not numeric is
//! carried through as [`MillisSetting::NotANumber`] instead of being replaced.
//! Use [`MillisSetting::as_duration`] to get only usable values.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Default interval between session checks (5 minutes).
pub const DEFAULT_CHECK_INTERVAL_MS: i64 = 300_000;
/// Default remaining lifetime below which a session is renewed (30 minutes).
pub const DEFAULT_RENEW_THRESHOLD_MS: i64 = 1_800_000;
/// Default maximum session lifetime (24 hours).
pub const DEFAULT_MAX_SESSION_DURATION_MS: i64 = 86_400_000;

/// A millisecond duration read from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MillisSetting {
    /// Parsed value; may be negative if configured that way.
    Value(i64),
    /// Configured text with no leading integer, kept for diagnostics.
    NotANumber(String),
}

impl MillisSetting {
    pub fn value(&self) -> Option<i64> {
        match self {
            MillisSetting::Value(ms) => Some(*ms),
            MillisSetting::NotANumber(_) => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, MillisSetting::NotANumber(_))
    }

    /// Usable duration, `None` for non-numeric or negative settings.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            MillisSetting::Value(ms) if *ms >= 0 => Some(Duration::from_millis(*ms as u64)),
            _ => None,
        }
    }
}

impl fmt::Display for MillisSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MillisSetting::Value(ms) => write!(f, "{ms}ms"),
            MillisSetting::NotANumber(raw) => write!(f, "NaN ('{raw}')"),
        }
    }
}

impl Serialize for MillisSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MillisSetting::Value(ms) => serializer.serialize_i64(*ms),
            MillisSetting::NotANumber(_) => serializer.serialize_none(),
        }
    }
}

/// Parse a millisecond setting, using `default` when it is absent or empty.
///
/// Only the leading integer is read, so `"600abc"` yields 600. Text with no
/// leading digits yields [`MillisSetting::NotANumber`], not the default;
/// that includes whitespace-only text.
///
/// # Examples
/// ```
/// use store_ip_whitelist::models::{parse_millis_or_default, MillisSetting};
/// assert_eq!(parse_millis_or_default(None, 300_000), MillisSetting::Value(300_000));
/// assert_eq!(parse_millis_or_default(Some("600000"), 300_000), MillisSetting::Value(600_000));
/// assert!(parse_millis_or_default(Some("invalid"), 300_000).is_nan());
/// ```
pub fn parse_millis_or_default(raw: Option<&str>, default: i64) -> MillisSetting {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return MillisSetting::Value(default),
    };
    match leading_integer(raw.trim()) {
        Some(ms) => MillisSetting::Value(ms),
        None => {
            log::debug!("Duration setting '{raw}' is not a number; default {default}ms not applied");
            MillisSetting::NotANumber(raw.to_string())
        }
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Timing policy applied to sessions from trusted store locations.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionRenewalPolicy {
    /// How often a session's remaining lifetime is checked.
    pub check_interval: MillisSetting,
    /// Remaining lifetime at which the session is renewed.
    pub renew_threshold: MillisSetting,
    /// Upper bound on total session lifetime.
    pub max_session_duration: MillisSetting,
}

impl SessionRenewalPolicy {
    /// Build a policy from raw settings, defaulting each value independently.
    pub fn from_raw(
        check_interval: Option<&str>,
        renew_threshold: Option<&str>,
        max_session_duration: Option<&str>,
    ) -> SessionRenewalPolicy {
        SessionRenewalPolicy {
            check_interval: parse_millis_or_default(check_interval, DEFAULT_CHECK_INTERVAL_MS),
            renew_threshold: parse_millis_or_default(renew_threshold, DEFAULT_RENEW_THRESHOLD_MS),
            max_session_duration: parse_millis_or_default(
                max_session_duration,
                DEFAULT_MAX_SESSION_DURATION_MS,
            ),
        }
    }
}

impl Default for SessionRenewalPolicy {
    fn default() -> Self {
        SessionRenewalPolicy {
            check_interval: MillisSetting::Value(DEFAULT_CHECK_INTERVAL_MS),
            renew_threshold: MillisSetting::Value(DEFAULT_RENEW_THRESHOLD_MS),
            max_session_duration: MillisSetting::Value(DEFAULT_MAX_SESSION_DURATION_MS),
        }
    }
}

impl fmt::Display for SessionRenewalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "check every {}, renew below {}, max {}",
            self.check_interval, self.renew_threshold, self.max_session_duration
        )
    }
}
