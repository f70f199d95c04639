//! Conversion results

use crate::blocks::{classify, AddressBlock, UNDEFINED_BLOCK};
use crate::{first_usable, last_usable, network_and_broadcast, subnet_mask, usable_host_count};
use ipconv_core::{AddressClass, BinaryAddress, Cidr, Ipv4Octets};
use serde::Serialize;
use tracing::trace;

/// One address in both decimal and binary form
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AddressForms {
    pub decimal: Ipv4Octets,
    pub binary: BinaryAddress,
}

impl From<Ipv4Octets> for AddressForms {
    fn from(decimal: Ipv4Octets) -> Self {
        Self {
            binary: decimal.to_binary(),
            decimal,
        }
    }
}

impl From<BinaryAddress> for AddressForms {
    fn from(binary: BinaryAddress) -> Self {
        Self {
            decimal: binary.to_decimal(),
            binary,
        }
    }
}

/// Everything derived from one address and prefix length
///
/// Built once by [`assemble`] and read-only afterwards. The default value is
/// an all-zero placeholder classified as [`UNDEFINED_BLOCK`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    address: AddressForms,
    subnet_mask: AddressForms,
    network: AddressForms,
    broadcast: AddressForms,
    first_usable: AddressForms,
    last_usable: AddressForms,
    cidr: Cidr,
    address_block: &'static AddressBlock,
    number_of_available_ips: i64,
}

impl ConversionResult {
    pub fn address(&self) -> &AddressForms {
        &self.address
    }

    pub fn subnet_mask(&self) -> &AddressForms {
        &self.subnet_mask
    }

    pub fn network(&self) -> &AddressForms {
        &self.network
    }

    pub fn broadcast(&self) -> &AddressForms {
        &self.broadcast
    }

    pub fn first_usable(&self) -> &AddressForms {
        &self.first_usable
    }

    pub fn last_usable(&self) -> &AddressForms {
        &self.last_usable
    }

    pub fn cidr(&self) -> Cidr {
        self.cidr
    }

    pub fn address_block(&self) -> &'static AddressBlock {
        self.address_block
    }

    pub fn address_class(&self) -> AddressClass {
        self.address_block.address_class()
    }

    /// Usable host count, unclamped (negative for /32)
    pub fn number_of_available_ips(&self) -> i64 {
        self.number_of_available_ips
    }

    /// False for /31 and /32, where the first/last usable pair is not a real range
    pub fn has_usable_hosts(&self) -> bool {
        self.number_of_available_ips > 0
    }
}

impl Default for ConversionResult {
    fn default() -> Self {
        Self {
            address: AddressForms::default(),
            subnet_mask: AddressForms::default(),
            network: AddressForms::default(),
            broadcast: AddressForms::default(),
            first_usable: AddressForms::default(),
            last_usable: AddressForms::default(),
            cidr: Cidr::default(),
            address_block: &UNDEFINED_BLOCK,
            number_of_available_ips: 0,
        }
    }
}

/// Derive every value of a [`ConversionResult`] from an address and prefix length
pub fn assemble(address: Ipv4Octets, cidr: Cidr) -> ConversionResult {
    let binary = address.to_binary();
    let bounds = network_and_broadcast(&binary, cidr);

    let network = AddressForms::from(bounds.network);
    let broadcast = AddressForms::from(bounds.broadcast);
    let first = AddressForms::from(first_usable(&network.decimal));
    let last = AddressForms::from(last_usable(&broadcast.decimal));

    let result = ConversionResult {
        address: AddressForms {
            decimal: address,
            binary,
        },
        subnet_mask: AddressForms::from(subnet_mask(cidr)),
        network,
        broadcast,
        first_usable: first,
        last_usable: last,
        cidr,
        address_block: classify(&address),
        number_of_available_ips: usable_host_count(cidr),
    };

    trace!(
        %address,
        %cidr,
        network = %result.network.decimal,
        broadcast = %result.broadcast.decimal,
        block = result.address_block.name(),
        "assembled conversion"
    );
    result
}
