//! Announced-prefix snapshots stored on disk.
//!
//! One file per ASN in the snapshot directory, either the announced-prefixes
//! JSON response (`as19318.json`) or a plain prefix list (`as19318.txt`).

use crate::models::{parse_prefix_lines, Asn, Network};
use futures::future::try_join_all;
use serde::Deserialize;
use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Announced-prefixes response body.
#[derive(Deserialize, Debug, Default)]
pub struct AnnouncedPrefixes {
    #[serde(default)]
    pub data: AnnouncedData,
}

#[derive(Deserialize, Debug, Default)]
pub struct AnnouncedData {
    #[serde(default)]
    pub prefixes: Vec<AnnouncedPrefix>,
}

/// One announced prefix. Other fields in the response are ignored.
#[derive(Deserialize, Debug)]
pub struct AnnouncedPrefix {
    pub prefix: Option<String>,
}

/// Candidate networks announced by one ASN.
#[derive(Debug, Clone)]
pub struct AsnPrefixes {
    pub asn: Asn,
    pub networks: Vec<Network>,
}

/// Parse an announced-prefixes JSON document into networks.
///
/// Entries without a prefix are ignored, unparseable prefixes are logged and
/// dropped.
pub fn parse_announced_json(json: &str, origin: &str) -> Result<Vec<Network>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let parsed: AnnouncedPrefixes = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing {origin}: path={} error={}", e.path(), e))?;

    let networks = parsed
        .data
        .prefixes
        .into_iter()
        .filter_map(|item| item.prefix)
        .filter_map(|prefix| match Network::parse(&prefix) {
            Ok(net) => Some(net),
            Err(e) => {
                log::warn!("[{origin}] Skipping invalid prefix {prefix}: {e}");
                None
            }
        })
        .collect();
    Ok(networks)
}

/// Directory of per-ASN snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    dir: PathBuf,
}

impl SnapshotDir {
    pub fn new(dir: impl Into<PathBuf>) -> SnapshotDir {
        SnapshotDir { dir: dir.into() }
    }

    /// Read the snapshot for one ASN, preferring JSON over plain text.
    pub async fn read_asn(&self, asn: Asn) -> Result<AsnPrefixes, Box<dyn Error>> {
        let json_file = self.dir.join(format!("{}.json", asn.file_stem()));
        let networks = match read_optional(&json_file).await? {
            Some(json) => parse_announced_json(&json, &json_file.display().to_string())?,
            None => {
                let txt_file = self.dir.join(format!("{}.txt", asn.file_stem()));
                let text = read_optional(&txt_file).await?.ok_or_else(|| {
                    format!(
                        "No snapshot for {asn}: neither {} nor {} exists",
                        json_file.display(),
                        txt_file.display()
                    )
                })?;
                parse_prefix_lines(&text, &txt_file.display().to_string()).networks
            }
        };

        log::info!("Read {} prefix(es) for {asn}", networks.len());
        Ok(AsnPrefixes { asn, networks })
    }

    /// Read snapshots for all ASNs concurrently, in the given order.
    pub async fn read_all(&self, asns: &[Asn]) -> Result<Vec<AsnPrefixes>, Box<dyn Error>> {
        try_join_all(asns.iter().map(|asn| self.read_asn(*asn))).await
    }
}

/// Read a file, mapping "not found" to `None`.
async fn read_optional(path: &Path) -> Result<Option<String>, Box<dyn Error>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(format!("Error reading snapshot {}: {e}", path.display()).into()),
    }
}
