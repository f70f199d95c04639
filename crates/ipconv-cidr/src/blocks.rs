//! Address block catalog and classification
//!
//! The catalog is a fixed, ordered set of disjoint ranges covering the
//! classful unicast space (Class A/B/C public and private sub-blocks plus
//! the loopback block). Addresses outside every range classify as
//! [`UNDEFINED_BLOCK`].

use ipconv_core::{AddressClass, BinaryAddress, Ipv4Octets};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Public/private nature of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockScope {
    Public,
    Private,
    Loopback,
    Undefined,
}

impl fmt::Display for BlockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockScope::Public => "public",
            BlockScope::Private => "private",
            BlockScope::Loopback => "loopback",
            BlockScope::Undefined => "undefined",
        };
        f.write_str(name)
    }
}

/// One named address range of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AddressBlock {
    name: &'static str,
    address_class: AddressClass,
    scope: BlockScope,
    first_address: Ipv4Octets,
    last_address: Ipv4Octets,
    default_cidr: Option<u8>,
}

impl AddressBlock {
    const fn new(
        name: &'static str,
        address_class: AddressClass,
        scope: BlockScope,
        first_address: Ipv4Octets,
        last_address: Ipv4Octets,
        default_cidr: Option<u8>,
    ) -> Self {
        Self {
            name,
            address_class,
            scope,
            first_address,
            last_address,
            default_cidr,
        }
    }

    /// The catalog in priority order
    pub fn all() -> &'static [AddressBlock] {
        &ADDRESS_BLOCKS
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn address_class(&self) -> AddressClass {
        self.address_class
    }

    pub fn scope(&self) -> BlockScope {
        self.scope
    }

    pub fn first_address(&self) -> Ipv4Octets {
        self.first_address
    }

    pub fn last_address(&self) -> Ipv4Octets {
        self.last_address
    }

    pub fn first_address_binary(&self) -> BinaryAddress {
        self.first_address.to_binary()
    }

    pub fn last_address_binary(&self) -> BinaryAddress {
        self.last_address.to_binary()
    }

    /// Classful default prefix length; `None` for loopback and undefined
    pub fn default_cidr(&self) -> Option<u8> {
        self.default_cidr
    }

    pub fn is_private(&self) -> bool {
        self.scope == BlockScope::Private
    }

    pub fn is_undefined(&self) -> bool {
        self.scope == BlockScope::Undefined
    }

    /// Inclusive range check on the 32-bit address value
    pub fn contains(&self, address: &Ipv4Octets) -> bool {
        let value = address.to_u32();
        self.first_address.to_u32() <= value && value <= self.last_address.to_u32()
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Known address blocks, in priority order
pub static ADDRESS_BLOCKS: [AddressBlock; 10] = [
    AddressBlock::new(
        "A_PUBLIC_FORMER_BLOCK",
        AddressClass::A,
        BlockScope::Public,
        Ipv4Octets::new(1, 0, 0, 0),
        Ipv4Octets::new(9, 255, 255, 255),
        Some(8),
    ),
    AddressBlock::new(
        "A_PRIVATE_BLOCK",
        AddressClass::A,
        BlockScope::Private,
        Ipv4Octets::new(10, 0, 0, 0),
        Ipv4Octets::new(10, 255, 255, 255),
        Some(8),
    ),
    AddressBlock::new(
        "A_PUBLIC_LATTER_BLOCK",
        AddressClass::A,
        BlockScope::Public,
        Ipv4Octets::new(11, 0, 0, 0),
        Ipv4Octets::new(126, 255, 255, 255),
        Some(8),
    ),
    AddressBlock::new(
        "LOCALHOST_BLOCK",
        AddressClass::Undefined,
        BlockScope::Loopback,
        Ipv4Octets::new(127, 0, 0, 0),
        Ipv4Octets::new(127, 255, 255, 255),
        None,
    ),
    AddressBlock::new(
        "B_PUBLIC_FORMER_BLOCK",
        AddressClass::B,
        BlockScope::Public,
        Ipv4Octets::new(128, 0, 0, 0),
        Ipv4Octets::new(172, 15, 255, 255),
        Some(16),
    ),
    AddressBlock::new(
        "B_PRIVATE_BLOCK",
        AddressClass::B,
        BlockScope::Private,
        Ipv4Octets::new(172, 16, 0, 0),
        Ipv4Octets::new(172, 31, 255, 255),
        Some(16),
    ),
    AddressBlock::new(
        "B_PUBLIC_LATTER_BLOCK",
        AddressClass::B,
        BlockScope::Public,
        Ipv4Octets::new(172, 32, 0, 0),
        Ipv4Octets::new(191, 255, 255, 255),
        Some(16),
    ),
    AddressBlock::new(
        "C_PUBLIC_FORMER_BLOCK",
        AddressClass::C,
        BlockScope::Public,
        Ipv4Octets::new(192, 0, 0, 0),
        Ipv4Octets::new(192, 167, 255, 255),
        Some(24),
    ),
    AddressBlock::new(
        "C_PRIVATE_BLOCK",
        AddressClass::C,
        BlockScope::Private,
        Ipv4Octets::new(192, 168, 0, 0),
        Ipv4Octets::new(192, 168, 255, 255),
        Some(24),
    ),
    AddressBlock::new(
        "C_PUBLIC_LATTER_BLOCK",
        AddressClass::C,
        BlockScope::Public,
        Ipv4Octets::new(192, 169, 0, 0),
        Ipv4Octets::new(223, 255, 255, 255),
        Some(24),
    ),
];

/// Sentinel for addresses outside every catalog block
pub static UNDEFINED_BLOCK: AddressBlock = AddressBlock::new(
    "UNDEFINED",
    AddressClass::Undefined,
    BlockScope::Undefined,
    Ipv4Octets::new(0, 0, 0, 0),
    Ipv4Octets::new(0, 0, 0, 0),
    None,
);

/// Find the catalog block containing `address`
///
/// # Examples
///
/// ```
/// use ipconv_cidr::classify;
/// use ipconv_core::Ipv4Octets;
///
/// let block = classify(&Ipv4Octets::new(192, 168, 10, 1));
/// assert_eq!(block.name(), "C_PRIVATE_BLOCK");
/// ```
pub fn classify(address: &Ipv4Octets) -> &'static AddressBlock {
    let block = ADDRESS_BLOCKS
        .iter()
        .find(|block| block.contains(address))
        .unwrap_or(&UNDEFINED_BLOCK);
    trace!(%address, block = block.name(), "classified address");
    block
}

/// Address class of the block containing `address`
pub fn classify_address_class(address: &Ipv4Octets) -> AddressClass {
    classify(address).address_class()
}

/// Address class of dotted-quad text
///
/// Text that is not a canonical dotted-quad address is
/// [`AddressClass::Undefined`] without consulting the catalog.
pub fn classify_address_class_str(text: &str) -> AddressClass {
    match Ipv4Octets::parse_canonical(text) {
        Ok(address) => classify_address_class(&address),
        Err(_) => AddressClass::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_size() {
        let names: Vec<&str> = AddressBlock::all().iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            [
                "A_PUBLIC_FORMER_BLOCK",
                "A_PRIVATE_BLOCK",
                "A_PUBLIC_LATTER_BLOCK",
                "LOCALHOST_BLOCK",
                "B_PUBLIC_FORMER_BLOCK",
                "B_PRIVATE_BLOCK",
                "B_PUBLIC_LATTER_BLOCK",
                "C_PUBLIC_FORMER_BLOCK",
                "C_PRIVATE_BLOCK",
                "C_PUBLIC_LATTER_BLOCK",
            ]
        );
    }

    #[test]
    fn test_catalog_bounds_ordered() {
        for block in AddressBlock::all() {
            assert!(block.first_address() <= block.last_address(), "{}", block);
        }
    }

    #[test]
    fn test_catalog_disjoint_and_contiguous() {
        for pair in AddressBlock::all().windows(2) {
            let gap = pair[1].first_address().to_u32() - pair[0].last_address().to_u32();
            assert_eq!(gap, 1, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_classify_private_blocks() {
        assert_eq!(classify(&Ipv4Octets::new(10, 0, 0, 1)).name(), "A_PRIVATE_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(172, 16, 0, 1)).name(), "B_PRIVATE_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(172, 31, 255, 255)).name(), "B_PRIVATE_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(192, 168, 10, 1)).name(), "C_PRIVATE_BLOCK");
        assert!(classify(&Ipv4Octets::new(192, 168, 10, 1)).is_private());
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(&Ipv4Octets::new(1, 0, 0, 0)).name(), "A_PUBLIC_FORMER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(9, 255, 255, 255)).name(), "A_PUBLIC_FORMER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(126, 255, 255, 255)).name(), "A_PUBLIC_LATTER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(172, 15, 255, 255)).name(), "B_PUBLIC_FORMER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(172, 32, 0, 0)).name(), "B_PUBLIC_LATTER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(192, 167, 255, 255)).name(), "C_PUBLIC_FORMER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(192, 169, 0, 0)).name(), "C_PUBLIC_LATTER_BLOCK");
        assert_eq!(classify(&Ipv4Octets::new(223, 255, 255, 255)).name(), "C_PUBLIC_LATTER_BLOCK");
    }

    #[test]
    fn test_classify_undefined() {
        assert!(classify(&Ipv4Octets::new(0, 0, 0, 0)).is_undefined());
        assert!(classify(&Ipv4Octets::new(0, 255, 255, 255)).is_undefined());
        assert!(classify(&Ipv4Octets::new(224, 0, 0, 1)).is_undefined());
        assert!(classify(&Ipv4Octets::new(255, 255, 255, 255)).is_undefined());
    }

    #[test]
    fn test_classify_localhost() {
        let block = classify(&Ipv4Octets::new(127, 0, 0, 1));
        assert_eq!(block.name(), "LOCALHOST_BLOCK");
        assert_eq!(block.scope(), BlockScope::Loopback);
        assert_eq!(block.address_class(), AddressClass::Undefined);
        assert_eq!(block.default_cidr(), None);
    }

    #[test]
    fn test_classify_is_total_and_unique() {
        // Every first octet, at the edges of each /8
        for first in 0..=u8::MAX {
            for address in [
                Ipv4Octets::new(first, 0, 0, 0),
                Ipv4Octets::new(first, 168, 0, 0),
                Ipv4Octets::new(first, 255, 255, 255),
            ] {
                let matches = AddressBlock::all()
                    .iter()
                    .filter(|b| b.contains(&address))
                    .count();
                assert!(matches <= 1, "{} matched {} blocks", address, matches);
                assert_eq!(matches == 0, classify(&address).is_undefined());
            }
        }
    }

    #[test]
    fn test_classify_address_class() {
        assert_eq!(classify_address_class(&Ipv4Octets::new(10, 0, 0, 1)), AddressClass::A);
        assert_eq!(classify_address_class(&Ipv4Octets::new(150, 1, 1, 1)), AddressClass::B);
        assert_eq!(classify_address_class(&Ipv4Octets::new(200, 1, 1, 1)), AddressClass::C);
        assert_eq!(classify_address_class(&Ipv4Octets::new(240, 1, 1, 1)), AddressClass::Undefined);
    }

    #[test]
    fn test_classify_address_class_str() {
        assert_eq!(classify_address_class_str("10.0.0.1"), AddressClass::A);
        assert_eq!(classify_address_class_str("192.168.10.1"), AddressClass::C);
        assert_eq!(classify_address_class_str("256.0.0.1"), AddressClass::Undefined);
        assert_eq!(classify_address_class_str("010.0.0.1"), AddressClass::Undefined);
        assert_eq!(classify_address_class_str("not an ip"), AddressClass::Undefined);
    }

    #[test]
    fn test_block_binary_bounds() {
        let block = classify(&Ipv4Octets::new(10, 1, 2, 3));
        assert_eq!(
            block.first_address_binary().to_string(),
            "00001010.00000000.00000000.00000000"
        );
        assert_eq!(
            block.last_address_binary().to_string(),
            "00001010.11111111.11111111.11111111"
        );
    }
}
