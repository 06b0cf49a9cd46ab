//! Collapsing network lists into their minimal sorted form.

use crate::models::{Network, V6_MAX_LENGTH};
use itertools::Itertools;

/// Collapse `networks` into the minimal equivalent set, sorted by family,
/// base address, then prefix length.
///
/// Accepts mixed families, duplicates and any input order. Subnets of other
/// members are dropped and sibling pairs are merged into their parent until
/// nothing changes.
///
/// # Panics
/// If merging does not settle within the address width plus one passes.
pub fn normalize<I>(networks: I) -> Vec<Network>
where
    I: IntoIterator<Item = Network>,
{
    let mut current: Vec<Network> = networks.into_iter().sorted().dedup().collect();
    let max_passes = usize::from(V6_MAX_LENGTH) + 1;

    for pass in 0..max_passes {
        let next = collapse_pass(&current);
        if next == current {
            log::trace!("normalize settled after {pass} pass(es), {} networks", next.len());
            return next;
        }
        current = next;
    }

    panic!(
        "normalize did not converge within {max_passes} passes ({} networks left)",
        current.len()
    );
}

/// One merge sweep over a sorted, de-duplicated list.
fn collapse_pass(sorted: &[Network]) -> Vec<Network> {
    let mut stack: Vec<Network> = Vec::with_capacity(sorted.len());

    for &net in sorted {
        // Sorted input puts any covering network on top of the stack.
        if stack.last().is_some_and(|top| top.contains(&net)) {
            continue;
        }
        stack.push(net);

        while let [.., below, top] = stack.as_slice() {
            let (below, top) = (*below, *top);
            if below.sibling() != Some(top) {
                break;
            }
            let Some(parent) = below.parent() else {
                break;
            };
            stack.truncate(stack.len() - 2);
            stack.push(parent);
        }
    }

    stack.sort();
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Family;

    fn net(s: &str) -> Network {
        Network::parse(s).unwrap()
    }

    fn nets(list: &[&str]) -> Vec<Network> {
        list.iter().map(|s| net(s)).collect()
    }

    fn is_minimal(list: &[Network]) -> bool {
        list.iter().enumerate().all(|(i, a)| {
            list.iter().enumerate().all(|(j, b)| {
                i == j || (!a.contains(b) && a.sibling() != Some(*b))
            })
        })
    }

    #[test]
    fn test_sibling_collapse() {
        assert_eq!(
            normalize(nets(&["10.0.0.0/24", "10.0.1.0/24"])),
            nets(&["10.0.0.0/23"])
        );
    }

    #[test]
    fn test_raw_records_with_host_bits() {
        let input = vec![
            Network::new(Family::V4, 0x0a00_0001, 24).unwrap(),
            Network::new(Family::V4, 0x0a00_0100, 24).unwrap(),
        ];
        assert_eq!(normalize(input), nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_empty() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_non_aligned_neighbours_stay_apart() {
        // adjacent but 10.0.1.0/24 and 10.0.2.0/24 have different parents
        assert_eq!(
            normalize(nets(&["10.0.2.0/24", "10.0.1.0/24"])),
            nets(&["10.0.1.0/24", "10.0.2.0/24"])
        );
    }

    #[test]
    fn test_cascading_merge() {
        let input = nets(&[
            "10.0.0.192/26",
            "10.0.0.0/25",
            "10.0.0.128/26",
            "10.0.1.0/24",
            "10.0.0.0/26",
        ]);
        assert_eq!(normalize(input), nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_drops_subnets_and_duplicates() {
        let input = nets(&[
            "10.1.2.0/24",
            "10.0.0.0/8",
            "10.0.0.0/8",
            "10.255.255.255/32",
            "192.168.0.0/16",
        ]);
        assert_eq!(normalize(input), nets(&["10.0.0.0/8", "192.168.0.0/16"]));
    }

    #[test]
    fn test_mixed_families_sorted_v4_first() {
        let input = nets(&[
            "2001:db8:1::/48",
            "10.0.0.0/24",
            "2001:db8::/48",
            "::/0",
            "0.0.0.0/1",
            "128.0.0.0/1",
        ]);
        assert_eq!(normalize(input), nets(&["0.0.0.0/0", "::/0"]));
    }

    #[test]
    fn test_families_never_merge() {
        // same numeric base and length in both families
        let input = nets(&["0.0.0.0/32", "::1/128", "0.0.0.1/32", "::/128"]);
        assert_eq!(normalize(input), nets(&["0.0.0.0/31", "::/127"]));
    }

    #[test]
    fn test_idempotent_and_minimal() {
        let input = nets(&[
            "172.16.0.0/13",
            "172.24.0.0/13",
            "10.0.0.128/25",
            "10.0.0.0/25",
            "10.0.3.0/24",
            "2001:db8::/33",
            "2001:db8:8000::/34",
            "2001:db8:c000::/34",
            "203.0.113.5/32",
        ]);
        let once = normalize(input);
        assert!(is_minimal(&once));
        assert_eq!(normalize(once.clone()), once);
        assert_eq!(
            once,
            nets(&[
                "10.0.0.0/24",
                "10.0.3.0/24",
                "172.16.0.0/12",
                "203.0.113.5/32",
                "2001:db8::/32"
            ])
        );
    }

    #[test]
    fn test_order_independent() {
        let input = nets(&[
            "198.51.100.0/25",
            "198.51.100.128/25",
            "2001:db8::/48",
            "10.9.0.0/16",
            "10.8.0.0/16",
        ]);
        let mut reversed = input.clone();
        reversed.reverse();
        assert_eq!(normalize(input), normalize(reversed));
    }
}
