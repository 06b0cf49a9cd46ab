//! CIDR set operations.
//!
//! This module contains the set algebra applied to announced prefixes:
//! - [`normalize`] - collapse and sort a network list
//! - [`subtract`] - remove one network from another
//! - [`exclusions`] - load exclusion lists and apply them

mod exclusions;
mod normalize;
mod subtract;

// Re-export public functions
pub use exclusions::{apply_exclusions, load_exclusions, ExclusionSet};
pub use normalize::normalize;
pub use subtract::{subtract_many, subtract_one};
