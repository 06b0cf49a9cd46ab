//! Feed file writing.
//!
//! Feeds are plain text, one canonical CIDR per line with a trailing newline.
//! An empty result produces an empty file.

use crate::models::{Family, Network};
use std::error::Error;
use std::path::Path;

/// Network counts written for one scope (an ASN or the combined feed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSummary {
    /// File stem, e.g. `as19318` or `combined`.
    pub name: String,
    pub ipv4: usize,
    pub ipv6: usize,
}

/// Render networks one per line.
pub fn render_feed<'a, I>(networks: I) -> String
where
    I: IntoIterator<Item = &'a Network>,
{
    networks
        .into_iter()
        .map(|net| format!("{net}\n"))
        .collect()
}

/// Write networks to `path`, replacing any existing file.
pub async fn write_feed(path: &Path, networks: &[Network]) -> Result<(), Box<dyn Error>> {
    tokio::fs::write(path, render_feed(networks))
        .await
        .map_err(|e| format!("Error writing feed {}: {e}", path.display()))?;
    log::debug!("Wrote {} network(s) to {}", networks.len(), path.display());
    Ok(())
}

/// Write `<name>_ipv4.txt`, `<name>_ipv6.txt` and `<name>_all.txt`.
///
/// `networks` must already be normalized; v4 entries then precede v6 ones.
pub async fn write_scope_feeds(
    dir: &Path,
    name: &str,
    networks: &[Network],
) -> Result<ScopeSummary, Box<dyn Error>> {
    let split = networks.partition_point(|net| net.family() == Family::V4);
    let (ipv4, ipv6) = networks.split_at(split);

    write_feed(&dir.join(format!("{name}_ipv4.txt")), ipv4).await?;
    write_feed(&dir.join(format!("{name}_ipv6.txt")), ipv6).await?;
    write_feed(&dir.join(format!("{name}_all.txt")), networks).await?;

    Ok(ScopeSummary {
        name: name.to_string(),
        ipv4: ipv4.len(),
        ipv6: ipv6.len(),
    })
}
