//! Line-oriented prefix lists.
//!
//! Shared by the exclusion loader and plain-text snapshots.

use super::Network;

/// A line that could not be parsed as a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    /// Trimmed line content.
    pub content: String,
}

/// Result of parsing a prefix list.
#[derive(Debug, Default)]
pub struct PrefixList {
    pub networks: Vec<Network>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse one prefix per line, ignoring blank lines and `#` comments.
///
/// Malformed lines are logged as warnings and reported in
/// [`PrefixList::skipped`]. `origin` names the source in log messages.
pub fn parse_prefix_lines(text: &str, origin: &str) -> PrefixList {
    let mut list = PrefixList::default();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match Network::parse(line) {
            Ok(net) => list.networks.push(net),
            Err(e) => {
                log::warn!(
                    "[{origin}] Skipping invalid CIDR at line {}: {line} ({e})",
                    i + 1
                );
                list.skipped.push(SkippedLine {
                    line_no: i + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    list
}
