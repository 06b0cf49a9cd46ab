//! IPv4/IPv6 network prefixes.
//!
//! Provides the [`Network`] value type used by every set operation in the
//! crate. A [`Network`] is always canonical: bits beyond the prefix length are
//! cleared by every constructor.

use std::cmp::Ordering;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for an IPv4 network.
pub const V4_MAX_LENGTH: u8 = 32;
/// Maximum prefix length for an IPv6 network.
pub const V6_MAX_LENGTH: u8 = 128;

/// Address family. `V4` sorts before `V6`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Address width in bits.
    pub fn max_length(self) -> u8 {
        match self {
            Family::V4 => V4_MAX_LENGTH,
            Family::V6 => V6_MAX_LENGTH,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Family::V4 => write!(f, "ipv4"),
            Family::V6 => write!(f, "ipv6"),
        }
    }
}

/// Mask with the top `len` bits of a `width`-bit address set, as u128.
fn prefix_mask(width: u8, len: u8) -> u128 {
    let all_bits = u128::MAX >> (V6_MAX_LENGTH - width);
    let host_bits = u32::from(width - len);
    u128::MAX.checked_shl(host_bits).unwrap_or(0) & all_bits
}

/// A CIDR prefix of either family.
///
/// Only built through [`Network::new`], [`Network::parse`] and the splitting
/// helpers below, so host bits are always clear and the length always fits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Network(Repr);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Repr {
    V4 { addr: u32, len: u8 },
    V6 { addr: u128, len: u8 },
}

impl Network {
    /// Build a network from raw address bits, clearing any host bits.
    pub fn new(family: Family, bits: u128, len: u8) -> Result<Network, Box<dyn Error>> {
        let width = family.max_length();
        if len > width {
            return Err(format!("Prefix length /{len} is too long for {family}").into());
        }
        match family {
            Family::V4 => {
                let addr = u32::try_from(bits)
                    .map_err(|_| format!("Address bits {bits:#x} do not fit in ipv4"))?;
                let addr = addr & prefix_mask(width, len) as u32;
                Ok(Network(Repr::V4 { addr, len }))
            }
            Family::V6 => Ok(Network(Repr::V6 {
                addr: bits & prefix_mask(width, len),
                len,
            })),
        }
    }

    /// Build a network from an [`IpAddr`], clearing any host bits.
    pub fn from_addr(addr: IpAddr, len: u8) -> Result<Network, Box<dyn Error>> {
        match addr {
            IpAddr::V4(v4) => Network::new(Family::V4, u128::from(u32::from(v4)), len),
            IpAddr::V6(v6) => Network::new(Family::V6, u128::from(v6), len),
        }
    }

    /// Parse `addr/len` or a bare address (treated as a host route).
    ///
    /// # Examples
    /// ```
    /// use asn_cidr_feeds::models::Network;
    /// let net = Network::parse("10.0.0.7/24").unwrap();
    /// assert_eq!(net.to_string(), "10.0.0.0/24");
    /// ```
    pub fn parse(token: &str) -> Result<Network, Box<dyn Error>> {
        let token = token.trim();
        let (addr_part, len_part) = match token.split_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (token, None),
        };
        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| format!("Invalid address {addr_part}"))?;
        let len = match len_part {
            Some(len) => len
                .parse::<u8>()
                .map_err(|_| format!("Invalid prefix length {len}"))?,
            None => match addr {
                IpAddr::V4(_) => V4_MAX_LENGTH,
                IpAddr::V6(_) => V6_MAX_LENGTH,
            },
        };
        Network::from_addr(addr, len)
    }

    pub fn family(&self) -> Family {
        match self.0 {
            Repr::V4 { .. } => Family::V4,
            Repr::V6 { .. } => Family::V6,
        }
    }

    /// Base address bits, widened to u128.
    pub fn bits(&self) -> u128 {
        match self.0 {
            Repr::V4 { addr, .. } => u128::from(addr),
            Repr::V6 { addr, .. } => addr,
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self.0 {
            Repr::V4 { len, .. } | Repr::V6 { len, .. } => len,
        }
    }

    pub fn max_prefix_len(&self) -> u8 {
        self.family().max_length()
    }

    /// True when no bits beyond the prefix length are set.
    pub fn is_canonical(&self) -> bool {
        self.bits() & !prefix_mask(self.max_prefix_len(), self.prefix_len()) == 0
    }

    /// Highest address bits covered by this network.
    pub fn last_bits(&self) -> u128 {
        let width = self.max_prefix_len();
        let all_bits = u128::MAX >> (V6_MAX_LENGTH - width);
        self.bits() | (!prefix_mask(width, self.prefix_len()) & all_bits)
    }

    /// True if `other` is the same family and lies within this network.
    pub fn contains(&self, other: &Network) -> bool {
        if self.family() != other.family() || other.prefix_len() < self.prefix_len() {
            return false;
        }
        let mask = prefix_mask(self.max_prefix_len(), self.prefix_len());
        other.bits() & mask == self.bits()
    }

    /// True if the two networks share at least one address.
    pub fn overlaps(&self, other: &Network) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// The two halves one bit longer, or `None` for a host route.
    pub fn halves(&self) -> Option<(Network, Network)> {
        let len = self.prefix_len();
        let width = self.max_prefix_len();
        if len >= width {
            return None;
        }
        let high_bit = 1u128 << (width - len - 1);
        let lo = self.with_bits(self.bits(), len + 1);
        let hi = self.with_bits(self.bits() | high_bit, len + 1);
        Some((lo, hi))
    }

    /// The enclosing network one bit shorter, or `None` for `/0`.
    pub fn parent(&self) -> Option<Network> {
        let len = self.prefix_len();
        if len == 0 {
            return None;
        }
        let mask = prefix_mask(self.max_prefix_len(), len - 1);
        Some(self.with_bits(self.bits() & mask, len - 1))
    }

    /// The other half of this network's parent.
    pub fn sibling(&self) -> Option<Network> {
        let len = self.prefix_len();
        if len == 0 {
            return None;
        }
        let flip = 1u128 << (self.max_prefix_len() - len);
        Some(self.with_bits(self.bits() ^ flip, len))
    }

    /// Same family, new bits and length. Callers pass canonical bits.
    fn with_bits(&self, bits: u128, len: u8) -> Network {
        match self.0 {
            // bits came from a v4 network, so they fit in u32
            Repr::V4 { .. } => Network(Repr::V4 {
                addr: bits as u32,
                len,
            }),
            Repr::V6 { .. } => Network(Repr::V6 { addr: bits, len }),
        }
    }
}

impl FromStr for Network {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Network, Self::Err> {
        Network::parse(s)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.0 {
            Repr::V4 { addr, len } => write!(f, "{}/{}", Ipv4Addr::from(addr), len),
            Repr::V6 { addr, len } => write!(f, "{}/{}", Ipv6Addr::from(addr), len),
        }
    }
}

impl Ord for Network {
    fn cmp(&self, other: &Network) -> Ordering {
        (self.family(), self.bits(), self.prefix_len()).cmp(&(
            other.family(),
            other.bits(),
            other.prefix_len(),
        ))
    }
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Network) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
