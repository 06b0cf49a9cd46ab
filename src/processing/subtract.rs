//! Subtraction of one network from another.
//!
//! Splits a partially excluded network into the aligned blocks that remain.

use crate::models::Network;

/// Subtract `exclusion` from `net`.
///
/// Returns the prefix-aligned, non-overlapping blocks that cover exactly
/// `net` minus `exclusion`, in ascending order. Networks of different
/// families never affect each other.
pub fn subtract_one(net: Network, exclusion: Network) -> Vec<Network> {
    if net.family() != exclusion.family() {
        return vec![net];
    }

    if net.contains(&exclusion) {
        if net == exclusion {
            return Vec::new();
        }
        return split_around(net, exclusion);
    }

    if exclusion.contains(&net) {
        return Vec::new();
    }

    // disjoint
    vec![net]
}

/// Subtract every exclusion from `net`, in order.
///
/// Each exclusion is applied to all residual pieces left by the previous
/// ones. Stops early once nothing remains.
pub fn subtract_many(net: Network, exclusions: &[Network]) -> Vec<Network> {
    let mut residual = vec![net];

    for exclusion in exclusions {
        if exclusion.family() != net.family() {
            continue;
        }
        residual = residual
            .into_iter()
            .flat_map(|piece| subtract_one(piece, *exclusion))
            .collect();
        if residual.is_empty() {
            break;
        }
    }

    residual
}

/// Bisect `net` towards `exclusion`, keeping the half that does not hold it.
///
/// `exclusion` must be a strict subnet of `net`.
fn split_around(net: Network, exclusion: Network) -> Vec<Network> {
    let mut pieces = Vec::with_capacity(usize::from(exclusion.prefix_len() - net.prefix_len()));
    let mut current = net;

    while current != exclusion {
        let Some((lo, hi)) = current.halves() else {
            panic!("Cannot split {current} further while excluding {exclusion} from {net}");
        };
        if lo.contains(&exclusion) {
            pieces.push(hi);
            current = lo;
        } else {
            pieces.push(lo);
            current = hi;
        }
    }

    for piece in &pieces {
        assert!(
            piece.is_canonical(),
            "Subtraction produced non-canonical network {piece:?}"
        );
    }
    pieces.sort();
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Network {
        Network::parse(s).unwrap()
    }

    fn nets(list: &[&str]) -> Vec<Network> {
        list.iter().map(|s| net(s)).collect()
    }

    /// Number of addresses covered, for same-family disjoint lists.
    fn size(list: &[Network]) -> u128 {
        list.iter()
            .map(|n| n.last_bits() - n.bits() + 1)
            .sum()
    }

    #[test]
    fn test_subtract_upper_half() {
        assert_eq!(
            subtract_one(net("10.0.0.0/24"), net("10.0.0.128/25")),
            nets(&["10.0.0.0/25"])
        );
    }

    #[test]
    fn test_subtract_inner_block() {
        assert_eq!(
            subtract_one(net("10.0.0.0/24"), net("10.0.0.64/27")),
            nets(&[
                "10.0.0.0/26",
                "10.0.0.96/27",
                "10.0.0.128/25"
            ])
        );
    }

    #[test]
    fn test_subtract_equal_is_empty() {
        let n = net("10.0.0.0/24");
        assert!(subtract_one(n, n).is_empty());
        let n6 = net("2001:db8::/32");
        assert!(subtract_one(n6, n6).is_empty());
    }

    #[test]
    fn test_subtract_covered_is_empty() {
        assert!(subtract_one(net("10.0.0.0/24"), net("10.0.0.0/8")).is_empty());
    }

    #[test]
    fn test_subtract_disjoint_is_noop() {
        let n = net("10.0.0.0/24");
        assert_eq!(subtract_one(n, net("10.0.1.0/24")), vec![n]);
    }

    #[test]
    fn test_subtract_family_mismatch_is_noop() {
        let v4 = net("0.0.0.0/0");
        let v6 = net("::/0");
        assert_eq!(subtract_one(v4, v6), vec![v4]);
        assert_eq!(subtract_one(v6, v4), vec![v6]);
    }

    #[test]
    fn test_subtract_host_route_from_v6() {
        let pieces = subtract_one(net("2001:db8::/32"), net("2001:db8::1/128"));
        assert_eq!(pieces.len(), 96);
        assert_eq!(size(&pieces), (1u128 << 96) - 1);
        assert!(pieces.iter().all(|p| !p.contains(&net("2001:db8::1/128"))));
    }

    #[test]
    fn test_subtract_from_whole_space() {
        let pieces = subtract_one(net("0.0.0.0/0"), net("10.0.0.0/8"));
        assert_eq!(pieces.len(), 8);
        assert_eq!(size(&pieces), (1u128 << 32) - (1u128 << 24));
    }

    #[test]
    fn test_subtract_many_applies_to_all_pieces() {
        let result = subtract_many(
            net("10.0.0.0/24"),
            &nets(&["10.0.0.0/26", "10.0.0.192/26", "2001:db8::/32"]),
        );
        assert_eq!(result, nets(&["10.0.0.64/26", "10.0.0.128/26"]));
    }

    #[test]
    fn test_subtract_many_conserves_coverage() {
        let base = net("10.0.0.0/16");
        let exclusions = nets(&["10.0.5.0/24", "10.0.5.128/25", "10.0.200.7/32", "10.0.16.0/20"]);
        let result = subtract_many(base, &exclusions);
        assert_eq!(size(&result), 65536 - 4096 - 256 - 1);
        for piece in &result {
            assert!(base.contains(piece));
            assert!(exclusions.iter().all(|e| !e.overlaps(piece)));
        }
    }

    #[test]
    fn test_subtract_many_order_independent() {
        let base = net("192.168.0.0/22");
        let mut exclusions = nets(&["192.168.1.0/24", "192.168.2.16/28", "192.168.0.0/23"]);
        let mut first = subtract_many(base, &exclusions);
        exclusions.reverse();
        let mut second = subtract_many(base, &exclusions);
        first.sort();
        second.sort();
        assert_eq!(size(&first), size(&second));
        assert_eq!(
            crate::processing::normalize(first),
            crate::processing::normalize(second)
        );
    }

    #[test]
    fn test_subtract_many_short_circuits() {
        let result = subtract_many(net("10.0.0.0/24"), &nets(&["10.0.0.0/23", "10.0.0.0/25"]));
        assert!(result.is_empty());
    }
}
