//! Run configuration read from environment variables.
//!
//! `main` loads a `.env` file first, so values may come from either.

use crate::models::Asn;
use std::error::Error;
use std::path::PathBuf;

pub const DEFAULT_ASNS: &str = "AS19318";
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";
pub const DEFAULT_OUTPUT_DIR: &str = "feeds";
pub const DEFAULT_EXCLUSIONS_FILE_NAME: &str = "exclusions.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// ASNs to build feeds for, in the order given.
    pub asns: Vec<Asn>,
    /// Directory holding one announced-prefix snapshot per ASN.
    pub snapshot_dir: PathBuf,
    /// Directory the feed files are written to.
    pub output_dir: PathBuf,
    /// Exclusion list, `None` when disabled.
    pub exclusions_file: Option<PathBuf>,
}

impl Config {
    /// Read `ASNS`, `SNAPSHOT_DIR`, `OUTDIR` and `EXCLUSIONS_FILE`.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup.
    ///
    /// `EXCLUSIONS_FILE` defaults to `<OUTDIR>/exclusions.txt`; set it to an
    /// empty string to disable exclusions.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let asns = parse_asns(&lookup("ASNS").unwrap_or_else(|| DEFAULT_ASNS.to_string()))?;
        let snapshot_dir =
            PathBuf::from(lookup("SNAPSHOT_DIR").unwrap_or_else(|| DEFAULT_SNAPSHOT_DIR.to_string()));
        let output_dir =
            PathBuf::from(lookup("OUTDIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()));
        let exclusions_file = match lookup("EXCLUSIONS_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path.trim())),
            None => Some(output_dir.join(DEFAULT_EXCLUSIONS_FILE_NAME)),
        };

        let config = Config {
            asns,
            snapshot_dir,
            output_dir,
            exclusions_file,
        };
        log::debug!("{config:?}");
        Ok(config)
    }
}

/// Parse a comma-separated ASN list. Spaces and empty items are ignored,
/// repeated ASNs are kept once.
pub fn parse_asns(list: &str) -> Result<Vec<Asn>, Box<dyn Error>> {
    let mut asns: Vec<Asn> = Vec::new();
    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let asn: Asn = item.parse()?;
        if !asns.contains(&asn) {
            asns.push(asn);
        }
    }
    if asns.is_empty() {
        return Err("ASNS must list at least one ASN".into());
    }
    Ok(asns)
}
