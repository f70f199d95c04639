//! Subnet arithmetic and address classification
//!
//! Provides the conversion engine behind ipconv:
//! - Subnet mask from a prefix length
//! - Network and broadcast addresses
//! - Usable host range and host count
//! - Address block classification ([`blocks`])
//! - One-shot conversion into a [`ConversionResult`]
//!
//! # Examples
//!
//! ```
//! use ipconv_cidr::assemble;
//! use ipconv_core::{Cidr, Ipv4Octets};
//!
//! let result = assemble(Ipv4Octets::new(192, 168, 10, 1), Cidr::new(24).unwrap());
//! assert_eq!(result.network().decimal.to_string(), "192.168.10.0");
//! assert_eq!(result.broadcast().decimal.to_string(), "192.168.10.255");
//! assert_eq!(result.number_of_available_ips(), 254);
//! ```

use ipconv_core::{BinaryAddress, Cidr, Ipv4Octets};

pub mod blocks;
mod result;
mod table;

pub use blocks::{
    classify, classify_address_class, classify_address_class_str, AddressBlock, BlockScope,
    ADDRESS_BLOCKS, UNDEFINED_BLOCK,
};
pub use result::{assemble, AddressForms, ConversionResult};
pub use table::{cidr_table, CidrTableRow};

/// Network and broadcast addresses of one subnet, in binary form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkBounds {
    pub network: BinaryAddress,
    pub broadcast: BinaryAddress,
}

/// Subnet mask with `cidr` leading one bits
///
/// # Examples
///
/// ```
/// use ipconv_cidr::subnet_mask;
/// use ipconv_core::Cidr;
///
/// let mask = subnet_mask(Cidr::new(20).unwrap());
/// assert_eq!(mask.to_string(), "11111111.11111111.11110000.00000000");
/// ```
pub fn subnet_mask(cidr: Cidr) -> BinaryAddress {
    BinaryAddress::from_u32(cidr.mask())
}

/// Network address (host bits cleared) and broadcast address (host bits set)
pub fn network_and_broadcast(address: &BinaryAddress, cidr: Cidr) -> NetworkBounds {
    let mask = cidr.mask();
    let network = address.to_u32() & mask;
    let broadcast = network | !mask;

    NetworkBounds {
        network: BinaryAddress::from_u32(network),
        broadcast: BinaryAddress::from_u32(broadcast),
    }
}

/// First usable address: the network address with its last octet incremented
///
/// Only the fourth octet changes; there is no carry into the third octet.
/// A /32 network ending in `.255` wraps to `.0`.
pub fn first_usable(network: &Ipv4Octets) -> Ipv4Octets {
    let [a, b, c, d] = network.octets();
    Ipv4Octets::new(a, b, c, d.wrapping_add(1))
}

/// Last usable address: the broadcast address with its last octet decremented
///
/// Only the fourth octet changes; there is no borrow from the third octet.
/// A /32 broadcast ending in `.0` wraps to `.255`.
pub fn last_usable(broadcast: &Ipv4Octets) -> Ipv4Octets {
    let [a, b, c, d] = broadcast.octets();
    Ipv4Octets::new(a, b, c, d.wrapping_sub(1))
}

/// Usable hosts: `2^(32 - cidr) - 2`
///
/// Not clamped: /31 gives 0 and /32 gives -1. Callers treat values below 1
/// as "no usable range".
pub fn usable_host_count(cidr: Cidr) -> i64 {
    (1i64 << cidr.host_bits()) - 2
}

/// Total addresses covered by the prefix, network and broadcast included
pub fn address_count(cidr: Cidr) -> u64 {
    1u64 << cidr.host_bits()
}
