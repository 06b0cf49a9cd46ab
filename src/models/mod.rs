//! Domain models for ASN prefix feeds.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Network`] - IPv4/IPv6 prefix in canonical form
//! - [`Asn`] - Autonomous System Number
//! - [`parse_prefix_lines`] - one-prefix-per-line list parsing

mod asn;
mod network;
mod prefix_list;

// Re-export public types
pub use asn::Asn;
pub use network::{Family, Network, V4_MAX_LENGTH, V6_MAX_LENGTH};
pub use prefix_list::{parse_prefix_lines, PrefixList, SkippedLine};
