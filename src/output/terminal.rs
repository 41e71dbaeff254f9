//! Terminal formatting helpers.

use colored::{ColoredString, Colorize};

/// Quote a value and right-align it to `width` columns.
///
/// Values that are already wider are returned quoted but unpadded.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Colored lookup verdict.
pub fn trust_label(trusted: bool) -> ColoredString {
    if trusted {
        "trusted".green().bold()
    } else {
        "untrusted".red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("10.0.0.0/8", 14), "  \"10.0.0.0/8\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("172.16.0.0/16", 5), "\"172.16.0.0/16\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(256, 6), " \"256\"");
    }

    #[test]
    fn test_format_field_exact_width() {
        assert_eq!(format_field("10.0.0.1", 10), "\"10.0.0.1\"");
    }

    #[test]
    fn test_trust_label_text() {
        assert!(trust_label(true).to_string().contains("trusted"));
        assert!(trust_label(false).to_string().contains("untrusted"));
    }
}
