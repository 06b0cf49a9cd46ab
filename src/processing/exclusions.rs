//! Exclusion lists and their application to candidate prefixes.

use super::{normalize, subtract_many};
use crate::models::{parse_prefix_lines, Family, Network, SkippedLine};
use std::collections::BTreeSet;
use std::error::Error;
use std::io::ErrorKind;
use std::path::Path;

/// De-duplicated exclusion networks, partitioned by family.
#[derive(Debug, Default, Clone)]
pub struct ExclusionSet {
    v4: Vec<Network>,
    v6: Vec<Network>,
    skipped: Vec<SkippedLine>,
}

impl ExclusionSet {
    pub fn new<I>(networks: I) -> ExclusionSet
    where
        I: IntoIterator<Item = Network>,
    {
        let unique: BTreeSet<Network> = networks.into_iter().collect();
        let (v4, v6) = unique
            .into_iter()
            .partition(|net| net.family() == Family::V4);
        ExclusionSet {
            v4,
            v6,
            skipped: Vec::new(),
        }
    }

    /// Build from exclusion file text. Bad lines are skipped with a warning.
    pub fn from_text(text: &str, origin: &str) -> ExclusionSet {
        let list = parse_prefix_lines(text, origin);
        let mut set = ExclusionSet::new(list.networks);
        set.skipped = list.skipped;
        set
    }

    /// Exclusions of one family, in ascending order.
    pub fn for_family(&self, family: Family) -> &[Network] {
        match family {
            Family::V4 => &self.v4,
            Family::V6 => &self.v6,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.v4.iter().chain(self.v6.iter())
    }

    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, net: &Network) -> bool {
        self.for_family(net.family()).binary_search(net).is_ok()
    }

    /// Lines that were skipped while loading.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }
}

impl FromIterator<Network> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = Network>>(iter: I) -> Self {
        ExclusionSet::new(iter)
    }
}

/// Load exclusions from a file.
///
/// `None` or a missing file yields an empty set. Other read errors propagate.
pub fn load_exclusions(path: Option<&Path>) -> Result<ExclusionSet, Box<dyn Error>> {
    let Some(path) = path else {
        log::info!("No exclusions file configured");
        return Ok(ExclusionSet::default());
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("Exclusions file not found: {}, no exclusions", path.display());
            return Ok(ExclusionSet::default());
        }
        Err(e) => {
            return Err(format!("Error reading exclusions file {}: {e}", path.display()).into())
        }
    };

    let set = ExclusionSet::from_text(&text, "exclusions");
    log::info!(
        "Loaded {} exclusion network(s) from {} ({} v4, {} v6, {} skipped)",
        set.len(),
        path.display(),
        set.v4.len(),
        set.v6.len(),
        set.skipped.len()
    );
    Ok(set)
}

/// Remove every exclusion from `candidates` and normalize the result.
///
/// Candidates only meet exclusions of their own family.
pub fn apply_exclusions<I>(candidates: I, exclusions: &ExclusionSet) -> Vec<Network>
where
    I: IntoIterator<Item = Network>,
{
    let (v4, v6): (Vec<Network>, Vec<Network>) = candidates
        .into_iter()
        .partition(|net| net.family() == Family::V4);
    let candidate_count = v4.len() + v6.len();

    let mut working = Vec::with_capacity(candidate_count);
    for (family, nets) in [(Family::V4, v4), (Family::V6, v6)] {
        let family_exclusions = exclusions.for_family(family);
        if family_exclusions.is_empty() {
            working.extend(nets);
            continue;
        }
        for net in nets {
            working.extend(subtract_many(net, family_exclusions));
        }
    }

    log::debug!(
        "Applied {} exclusion(s) to {} candidate(s), {} residual piece(s)",
        exclusions.len(),
        candidate_count,
        working.len()
    );

    normalize(working)
}
