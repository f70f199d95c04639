//! Core types for ipconv (IPv4 address conversion)
//!
//! This crate provides the foundational types used throughout the ipconv workspace:
//! - [`Ipv4Octets`] - IPv4 address as four decimal octets
//! - [`BinaryOctet`] / [`BinaryAddress`] - zero-padded binary renditions
//! - [`Cidr`] - prefix length in the range 0-32
//! - [`AddressClass`] - legacy A/B/C address class
//! - [`IpconvError`] - Error types
//!
//! ```
//! use ipconv_core::{bits, Ipv4Octets};
//!
//! let address = Ipv4Octets::new(192, 168, 10, 1);
//! assert_eq!(address.to_binary().to_string(), "11000000.10101000.00001010.00000001");
//! assert_eq!(bits::to_binary_octet(192).as_str(), "11000000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

pub mod bits;

pub use bits::{BinaryAddress, BinaryOctet};

/// Highest valid prefix length for IPv4
pub const MAX_CIDR: u8 = 32;

/// IPv4 address held as four decimal octets in network order
///
/// Ordering follows the unsigned 32-bit value of the address.
///
/// # Examples
///
/// ```
/// use ipconv_core::Ipv4Octets;
///
/// let address: Ipv4Octets = "10.0.0.1".parse().unwrap();
/// assert_eq!(address.to_u32(), 0x0A000001);
/// assert_eq!(address.to_string(), "10.0.0.1");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Ipv4Octets(pub [u8; 4]);

impl Ipv4Octets {
    /// Build an address from its four octets
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    /// Address as a big-endian 32-bit integer
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Address from a big-endian 32-bit integer
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// The four octets
    pub const fn octets(&self) -> [u8; 4] {
        self.0
    }

    /// Binary rendition, one zero-padded 8-digit group per octet
    pub fn to_binary(&self) -> BinaryAddress {
        BinaryAddress::from_octets(self)
    }

    /// Parse canonical dotted-quad text
    ///
    /// Accepts exactly four groups of 1-3 ASCII digits, each at most 255
    /// and without a leading zero unless the group is exactly `0`.
    pub fn parse_canonical(text: &str) -> Result<Self> {
        let groups: Vec<&str> = text.split('.').collect();
        if groups.len() != 4 {
            return Err(IpconvError::InvalidAddress(text.to_string()));
        }

        let mut octets = [0u8; 4];
        for (slot, group) in octets.iter_mut().zip(groups) {
            let well_formed = (1..=3).contains(&group.len())
                && group.bytes().all(|b| b.is_ascii_digit())
                && (group == "0" || !group.starts_with('0'));
            if !well_formed {
                return Err(IpconvError::InvalidAddress(text.to_string()));
            }
            *slot = group
                .parse()
                .map_err(|_| IpconvError::InvalidAddress(text.to_string()))?;
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for Ipv4Octets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Ipv4Octets {
    type Err = IpconvError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_canonical(s)
    }
}

impl From<u32> for Ipv4Octets {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<[u8; 4]> for Ipv4Octets {
    fn from(octets: [u8; 4]) -> Self {
        Self(octets)
    }
}

impl From<Ipv4Addr> for Ipv4Octets {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<Ipv4Octets> for Ipv4Addr {
    fn from(address: Ipv4Octets) -> Self {
        Ipv4Addr::from(address.0)
    }
}

/// CIDR prefix length (number of leading network bits)
///
/// # Examples
///
/// ```
/// use ipconv_core::Cidr;
///
/// let cidr = Cidr::new(24).unwrap();
/// assert_eq!(cidr.host_bits(), 8);
/// assert!(Cidr::new(33).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cidr(u8);

impl Cidr {
    /// Create a prefix length, rejecting values above 32
    pub fn new(prefix_len: u8) -> Result<Self> {
        if prefix_len > MAX_CIDR {
            return Err(IpconvError::InvalidPrefixLength(prefix_len));
        }
        Ok(Self(prefix_len))
    }

    /// Every prefix length from /0 to /32
    pub fn all() -> impl Iterator<Item = Cidr> {
        (0..=MAX_CIDR).map(Cidr)
    }

    /// Get prefix length
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Number of trailing host bits
    pub fn host_bits(&self) -> u8 {
        MAX_CIDR - self.0
    }

    /// Network mask as a 32-bit integer
    pub fn mask(&self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            !((1u64 << self.host_bits()) - 1) as u32
        }
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Cidr {
    type Error = IpconvError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Cidr> for u8 {
    fn from(cidr: Cidr) -> Self {
        cidr.0
    }
}

/// Legacy address class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AddressClass {
    A,
    B,
    C,
    #[default]
    Undefined,
}

impl AddressClass {
    /// Prefix lengths accepted for addresses of this class
    ///
    /// `None` for [`AddressClass::Undefined`], which puts no bound on the prefix.
    pub fn cidr_range(&self) -> Option<RangeInclusive<u8>> {
        match self {
            AddressClass::A => Some(8..=15),
            AddressClass::B => Some(16..=23),
            AddressClass::C => Some(24..=32),
            AddressClass::Undefined => None,
        }
    }

    /// Classful default prefix length
    pub fn default_cidr(&self) -> Option<u8> {
        self.cidr_range().map(|range| *range.start())
    }

    /// True for A, B and C
    pub fn is_defined(&self) -> bool {
        !matches!(self, AddressClass::Undefined)
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::Undefined => "UNDEFINED",
        };
        f.write_str(name)
    }
}

/// Error types for ipconv operations
///
/// These signal caller mistakes (precondition violations). User-facing
/// validation failures are reported as data by `ipconv-validator`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IpconvError {
    /// Prefix length above 32
    #[error("Invalid prefix length: {0} (must be 0-32)")]
    InvalidPrefixLength(u8),

    /// Text that is not exactly eight binary digits
    #[error("Invalid binary octet: {0:?} (expected 8 binary digits)")]
    InvalidBinaryOctet(String),

    /// Text that is not a canonical dotted-quad address
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for ipconv operations
pub type Result<T> = std::result::Result<T, IpconvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octets_u32_conversion() {
        let address = Ipv4Octets::new(192, 168, 10, 1);
        assert_eq!(address.to_u32(), 0xC0A80A01);
        assert_eq!(Ipv4Octets::from_u32(0xC0A80A01), address);
    }

    #[test]
    fn test_octets_display() {
        let address = Ipv4Octets::new(10, 0, 0, 1);
        assert_eq!(format!("{}", address), "10.0.0.1");
    }

    #[test]
    fn test_octets_ordering_is_numeric() {
        assert!(Ipv4Octets::new(9, 255, 255, 255) < Ipv4Octets::new(10, 0, 0, 0));
        assert!(Ipv4Octets::new(172, 15, 255, 255) < Ipv4Octets::new(172, 16, 0, 0));
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(
            Ipv4Octets::parse_canonical("192.168.10.1").unwrap(),
            Ipv4Octets::new(192, 168, 10, 1)
        );
        assert_eq!(
            Ipv4Octets::parse_canonical("0.0.0.0").unwrap(),
            Ipv4Octets::default()
        );
    }

    #[test]
    fn test_parse_canonical_rejects_malformed() {
        for text in [
            "",
            "192.168.10",
            "192.168.10.1.5",
            "256.0.0.1",
            "01.168.10.1",
            "1.2.3.",
            "1.2.3.4/24",
            "a.b.c.d",
            "1234.1.1.1",
            " 1.2.3.4",
        ] {
            assert!(
                Ipv4Octets::parse_canonical(text).is_err(),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_ipv4addr_interop() {
        let addr = Ipv4Addr::new(127, 0, 0, 1);
        let octets: Ipv4Octets = addr.into();
        assert_eq!(octets, Ipv4Octets::new(127, 0, 0, 1));
        assert_eq!(Ipv4Addr::from(octets), addr);
    }

    #[test]
    fn test_cidr_bounds() {
        assert!(Cidr::new(0).is_ok());
        assert!(Cidr::new(32).is_ok());
        assert_eq!(Cidr::new(33), Err(IpconvError::InvalidPrefixLength(33)));
    }

    #[test]
    fn test_cidr_mask() {
        assert_eq!(Cidr::new(0).unwrap().mask(), 0);
        assert_eq!(Cidr::new(8).unwrap().mask(), 0xFF000000);
        assert_eq!(Cidr::new(24).unwrap().mask(), 0xFFFFFF00);
        assert_eq!(Cidr::new(32).unwrap().mask(), 0xFFFFFFFF);
    }

    #[test]
    fn test_cidr_all() {
        let all: Vec<u8> = Cidr::all().map(|c| c.value()).collect();
        assert_eq!(all.len(), 33);
        assert_eq!(all.first(), Some(&0));
        assert_eq!(all.last(), Some(&32));
    }

    #[test]
    fn test_cidr_deserialization_rejects_out_of_range() {
        let cidr: Cidr = serde_json::from_str("24").expect("deserialization failed");
        assert_eq!(cidr.value(), 24);
        assert!(serde_json::from_str::<Cidr>("40").is_err());
    }

    #[test]
    fn test_address_class_ranges() {
        assert_eq!(AddressClass::A.cidr_range(), Some(8..=15));
        assert_eq!(AddressClass::B.cidr_range(), Some(16..=23));
        assert_eq!(AddressClass::C.cidr_range(), Some(24..=32));
        assert_eq!(AddressClass::Undefined.cidr_range(), None);
    }

    #[test]
    fn test_address_class_default_cidr() {
        assert_eq!(AddressClass::A.default_cidr(), Some(8));
        assert_eq!(AddressClass::B.default_cidr(), Some(16));
        assert_eq!(AddressClass::C.default_cidr(), Some(24));
        assert_eq!(AddressClass::Undefined.default_cidr(), None);
    }

    #[test]
    fn test_address_class_serialization() {
        let json = serde_json::to_string(&AddressClass::Undefined).expect("serialization failed");
        assert_eq!(json, "\"UNDEFINED\"");
        let class: AddressClass = serde_json::from_str("\"B\"").expect("deserialization failed");
        assert_eq!(class, AddressClass::B);
    }

    #[test]
    fn test_error_display() {
        let err = IpconvError::InvalidPrefixLength(40);
        assert_eq!(format!("{}", err), "Invalid prefix length: 40 (must be 0-32)");

        let err = IpconvError::InvalidAddress("1.2.3".to_string());
        assert_eq!(format!("{}", err), "Invalid IP address: 1.2.3");
    }
}
