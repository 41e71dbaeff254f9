//! IPv4 dotted-quad parsing and CIDR range utilities.
//!
//! Provides [`CidrRange`] for `network/prefix` blocks, along with the mask
//! arithmetic used by whitelist range matching.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse a dotted-quad IPv4 string into its big-endian u32 value.
///
/// Returns `None` unless there are exactly four `.`-separated parts, each a
/// plain decimal integer in `0..=255`.
///
/// # Examples
/// ```
/// use store_ip_whitelist::models::parse_dotted_quad;
/// assert_eq!(parse_dotted_quad("10.0.0.1"), Some(0x0A00_0001));
/// assert_eq!(parse_dotted_quad("10.0.0"), None);
/// assert_eq!(parse_dotted_quad("10.0.0.256"), None);
/// ```
pub fn parse_dotted_quad(addr: &str) -> Option<u32> {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() != 4 {
        return None;
    }
    parts
        .iter()
        .try_fold(0u32, |acc, part| Some((acc << 8) | u32::from(parse_octet(part)?)))
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a prefix length, accepting only plain decimal digits in `0..=32`.
pub fn parse_prefix(bits: &str) -> Option<u8> {
    if bits.is_empty() || !bits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    bits.parse::<u8>().ok().filter(|len| *len <= MAX_LENGTH)
}

// Caller guarantees len <= MAX_LENGTH.
fn prefix_mask(len: u8) -> u32 {
    if len == 0 {
        0
    } else {
        u32::MAX << (MAX_LENGTH - len)
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use store_ip_whitelist::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err(format!("Prefix length /{len} is too long").into())
    } else {
        Ok(prefix_mask(len))
    }
}

/// A validated CIDR block, `network/prefix`.
///
/// The network address is kept as written; host bits are masked off when
/// matching, so `10.0.0.5/24` covers the same block as `10.0.0.0/24`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrRange {
    network: Ipv4Addr,
    prefix: u8,
}

impl CidrRange {
    /// Parse a CIDR string such as `"172.16.0.0/16"`.
    ///
    /// No whitespace trimming is done; the string must be exactly
    /// `a.b.c.d/n` with `n` in `0..=32`.
    pub fn new(cidr: &str) -> Result<CidrRange, Box<dyn Error>> {
        let (network, bits) = cidr
            .split_once('/')
            .ok_or_else(|| format!("Missing '/' in CIDR '{cidr}'"))?;
        if network.is_empty() || bits.is_empty() {
            return Err(format!("Incomplete CIDR '{cidr}'").into());
        }
        let prefix = parse_prefix(bits).ok_or_else(|| format!("Invalid prefix length '{bits}'"))?;
        let network =
            parse_dotted_quad(network).ok_or_else(|| format!("Invalid network address '{network}'"))?;
        Ok(CidrRange {
            network: Ipv4Addr::from(network),
            prefix,
        })
    }

    /// The network address as configured (host bits not cleared).
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Subnet mask for this block; `0` for a `/0` block.
    pub fn mask(&self) -> u32 {
        prefix_mask(self.prefix)
    }

    /// True if the address bits fall inside this block.
    pub fn contains_bits(&self, addr: u32) -> bool {
        let mask = self.mask();
        (addr & mask) == (u32::from(self.network) & mask)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.contains_bits(u32::from(addr))
    }

    /// Lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) & self.mask())
    }

    /// Highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !self.mask())
    }

    /// Number of addresses covered, `2^(32 - prefix)`.
    pub fn num_addresses(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }
}

impl FromStr for CidrRange {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CidrRange::new(s)
    }
}

impl Serialize for CidrRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrRange {
    fn deserialize<D>(deserializer: D) -> Result<CidrRange, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrRange::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl std::fmt::Display for CidrRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}
