// cargo watch -x 'fmt' -x 'run'

pub mod config;
pub mod models;
pub mod output;
pub mod processing;
pub mod source;

use config::Config;
use models::Network;
use output::{write_scope_feeds, ScopeSummary};
use processing::{apply_exclusions, load_exclusions, normalize, ExclusionSet};
use source::SnapshotDir;
use std::error::Error;

/// File stem of the feed covering every configured ASN.
pub const COMBINED_FEED_NAME: &str = "combined";

/// Normalize candidates, then remove exclusions if there are any.
pub fn feed_networks<I>(candidates: I, exclusions: &ExclusionSet) -> Vec<Network>
where
    I: IntoIterator<Item = Network>,
{
    let normalized = normalize(candidates);
    if exclusions.is_empty() {
        normalized
    } else {
        apply_exclusions(normalized, exclusions)
    }
}

/// Build per-ASN and combined feeds as configured.
///
/// Returns one [`ScopeSummary`] per ASN followed by the combined scope.
pub async fn build_feeds(config: &Config) -> Result<Vec<ScopeSummary>, Box<dyn Error>> {
    log::info!(
        "#Start build_feeds() asns={:?} snapshots={}",
        config.asns.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        config.snapshot_dir.display()
    );

    let exclusions = load_exclusions(config.exclusions_file.as_deref())?;
    let snapshots = SnapshotDir::new(&config.snapshot_dir)
        .read_all(&config.asns)
        .await?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| {
            format!(
                "Error creating output dir {}: {e}",
                config.output_dir.display()
            )
        })?;

    let mut summaries = Vec::with_capacity(snapshots.len() + 1);
    let mut combined: Vec<Network> = Vec::new();

    for snapshot in snapshots {
        let networks = feed_networks(snapshot.networks.iter().copied(), &exclusions);
        summaries.push(
            write_scope_feeds(&config.output_dir, &snapshot.asn.file_stem(), &networks).await?,
        );
        combined.extend(snapshot.networks);
    }

    let combined = feed_networks(combined, &exclusions);
    summaries.push(write_scope_feeds(&config.output_dir, COMBINED_FEED_NAME, &combined).await?);

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(list: &[&str]) -> Vec<Network> {
        list.iter().map(|s| Network::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_feed_networks_without_exclusions() {
        let result = feed_networks(
            nets(&["10.0.1.0/24", "10.0.0.0/24", "10.0.0.0/25"]),
            &ExclusionSet::default(),
        );
        assert_eq!(result, nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_feed_networks_with_exclusions() {
        let exclusions: ExclusionSet = nets(&["10.0.1.0/24"]).into_iter().collect();
        let result = feed_networks(nets(&["10.0.1.0/24", "10.0.0.0/24"]), &exclusions);
        assert_eq!(result, nets(&["10.0.0.0/24"]));
    }
}
