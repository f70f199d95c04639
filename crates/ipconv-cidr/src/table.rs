//! CIDR reference table (/0 through /32)

use crate::{address_count, subnet_mask, usable_host_count, AddressForms};
use ipconv_core::Cidr;
use serde::Serialize;

/// One prefix length with its mask and sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CidrTableRow {
    pub cidr: Cidr,
    pub subnet_mask: AddressForms,
    pub address_count: u64,
    pub usable_hosts: i64,
}

impl CidrTableRow {
    pub fn new(cidr: Cidr) -> Self {
        Self {
            cidr,
            subnet_mask: AddressForms::from(subnet_mask(cidr)),
            address_count: address_count(cidr),
            usable_hosts: usable_host_count(cidr),
        }
    }
}

/// Rows for every prefix length, shortest prefix first
pub fn cidr_table() -> Vec<CidrTableRow> {
    Cidr::all().map(CidrTableRow::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_prefix() {
        let table = cidr_table();
        assert_eq!(table.len(), 33);
        for (i, row) in table.iter().enumerate() {
            assert_eq!(row.cidr.value() as usize, i);
        }
    }

    #[test]
    fn test_table_rows() {
        let table = cidr_table();

        let row = &table[24];
        assert_eq!(row.subnet_mask.decimal.to_string(), "255.255.255.0");
        assert_eq!(row.address_count, 256);
        assert_eq!(row.usable_hosts, 254);

        let row = &table[0];
        assert_eq!(row.subnet_mask.decimal.to_string(), "0.0.0.0");
        assert_eq!(row.address_count, 4_294_967_296);

        let row = &table[32];
        assert_eq!(row.subnet_mask.decimal.to_string(), "255.255.255.255");
        assert_eq!(row.address_count, 1);
        assert_eq!(row.usable_hosts, -1);
    }

    #[test]
    fn test_table_sizes_halve() {
        let table = cidr_table();
        for pair in table.windows(2) {
            assert_eq!(pair[0].address_count, pair[1].address_count * 2);
        }
    }
}
