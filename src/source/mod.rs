//! Candidate prefix sources.
//!
//! - [`snapshot`] - per-ASN announced-prefix snapshots on disk

mod snapshot;

// Re-export public types and functions
pub use snapshot::{
    parse_announced_json, AnnouncedData, AnnouncedPrefix, AnnouncedPrefixes, AsnPrefixes,
    SnapshotDir,
};
