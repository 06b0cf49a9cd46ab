//! Terminal output utilities.
//!
//! Provides formatting helpers for the end-of-run summary.

use super::ScopeSummary;
use colored::Colorize;

/// Format a value as a right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

/// One summary line per scope.
pub fn format_summary_line(scope: &ScopeSummary) -> String {
    format!(
        "{name} v4={ipv4} v6={ipv6}",
        name = format_field(&scope.name, 10),
        ipv4 = format_field(scope.ipv4, 5),
        ipv6 = format_field(scope.ipv6, 5),
    )
}

/// Log the per-scope network counts.
pub fn log_summary(scopes: &[ScopeSummary]) {
    log::info!("{} {} feed scope(s)", "Summary".on_blue(), scopes.len());
    for scope in scopes {
        if scope.ipv4 + scope.ipv6 == 0 {
            log::warn!("{} {}", format_summary_line(scope), "EMPTY".on_red());
        } else {
            log::info!("{}", format_summary_line(scope));
        }
    }
}
