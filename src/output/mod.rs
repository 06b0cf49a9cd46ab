//! Output for feed data.
//!
//! This module handles writing feeds and reporting on them:
//! - [`feed`] - one-prefix-per-line feed files
//! - [`terminal`] - run summary with colors

mod feed;
mod terminal;

pub use feed::{render_feed, write_feed, write_scope_feeds, ScopeSummary};
pub use terminal::{format_field, format_summary_line, log_summary};
