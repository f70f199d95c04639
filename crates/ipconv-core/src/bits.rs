//! Binary octet conversion
//!
//! Converts between 8-bit values and their zero-padded binary digit text,
//! and groups four binary octets into a dotted binary address.

use crate::{IpconvError, Ipv4Octets, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exactly eight `0`/`1` characters, most significant bit first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BinaryOctet(String);

impl BinaryOctet {
    /// Parse binary digit text
    ///
    /// # Examples
    ///
    /// ```
    /// use ipconv_core::BinaryOctet;
    ///
    /// assert!(BinaryOctet::parse("11000000").is_ok());
    /// assert!(BinaryOctet::parse("1100").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        if text.len() != 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(IpconvError::InvalidBinaryOctet(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BinaryOctet {
    fn default() -> Self {
        to_binary_octet(0)
    }
}

impl fmt::Display for BinaryOctet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BinaryOctet {
    type Error = IpconvError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BinaryOctet> for String {
    fn from(octet: BinaryOctet) -> Self {
        octet.0
    }
}

/// Convert an octet to its zero-padded binary text
pub fn to_binary_octet(decimal: u8) -> BinaryOctet {
    BinaryOctet(format!("{:08b}", decimal))
}

/// Convert binary octet text back to its value
pub fn to_decimal_octet(binary: &BinaryOctet) -> u8 {
    binary
        .as_str()
        .bytes()
        .fold(0u8, |acc, digit| (acc << 1) | (digit - b'0'))
}

/// IPv4 address in binary form, four [`BinaryOctet`]s in network order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryAddress(pub [BinaryOctet; 4]);

impl BinaryAddress {
    pub fn from_octets(address: &Ipv4Octets) -> Self {
        Self(address.octets().map(to_binary_octet))
    }

    /// Binary form of a big-endian 32-bit value
    pub fn from_u32(value: u32) -> Self {
        Self::from_octets(&Ipv4Octets::from_u32(value))
    }

    pub fn to_decimal(&self) -> Ipv4Octets {
        let [a, b, c, d] = &self.0;
        Ipv4Octets::new(
            to_decimal_octet(a),
            to_decimal_octet(b),
            to_decimal_octet(c),
            to_decimal_octet(d),
        )
    }

    pub fn to_u32(&self) -> u32 {
        self.to_decimal().to_u32()
    }

    /// All 32 bits without separators
    pub fn bits(&self) -> String {
        self.0.iter().map(BinaryOctet::as_str).collect()
    }

    pub fn octets(&self) -> &[BinaryOctet; 4] {
        &self.0
    }
}

impl fmt::Display for BinaryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_binary_octet() {
        assert_eq!(to_binary_octet(192).as_str(), "11000000");
        assert_eq!(to_binary_octet(0).as_str(), "00000000");
        assert_eq!(to_binary_octet(255).as_str(), "11111111");
        assert_eq!(to_binary_octet(5).as_str(), "00000101");
    }

    #[test]
    fn test_to_decimal_octet() {
        let octet = BinaryOctet::parse("11000000").unwrap();
        assert_eq!(to_decimal_octet(&octet), 192);
    }

    #[test]
    fn test_round_trip_all_octets() {
        for value in 0..=u8::MAX {
            assert_eq!(to_decimal_octet(&to_binary_octet(value)), value);
        }
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert!(BinaryOctet::parse("").is_err());
        assert!(BinaryOctet::parse("1100000").is_err());
        assert!(BinaryOctet::parse("110000001").is_err());
        assert!(BinaryOctet::parse("1100000a").is_err());
        assert!(BinaryOctet::parse("11000002").is_err());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(BinaryOctet::default().as_str(), "00000000");
        assert_eq!(BinaryAddress::default().to_u32(), 0);
    }

    #[test]
    fn test_binary_address_display() {
        let binary = Ipv4Octets::new(255, 255, 255, 0).to_binary();
        assert_eq!(
            binary.to_string(),
            "11111111.11111111.11111111.00000000"
        );
        assert_eq!(binary.bits(), format!("{}{}", "1".repeat(24), "0".repeat(8)));
    }

    #[test]
    fn test_binary_address_decimal_conversion() {
        let binary = BinaryAddress::from_u32(0xC0A80A01);
        assert_eq!(binary.to_decimal(), Ipv4Octets::new(192, 168, 10, 1));
        assert_eq!(binary.to_u32(), 0xC0A80A01);
    }

    #[test]
    fn test_binary_octet_serialization() {
        let json = serde_json::to_string(&to_binary_octet(10)).expect("serialization failed");
        assert_eq!(json, "\"00001010\"");
        assert!(serde_json::from_str::<BinaryOctet>("\"10\"").is_err());
    }
}
