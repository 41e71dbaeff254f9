//! Output formatting for whitelist reports.
//!
//! - [`summary`] - whitelist summary and lookup results
//! - [`terminal`] - column and color helpers

mod summary;
mod terminal;

pub use summary::{check_line, print_check, print_whitelist, range_line, whitelist_summary_json};
pub use terminal::{format_field, trust_label};
