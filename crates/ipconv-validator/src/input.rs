//! Raw input splitting and parse-after-validate

use crate::{validate, ValidationReport};
use ipconv_cidr::classify;
use ipconv_core::{Cidr, IpconvError, Ipv4Octets};
use serde::Serialize;
use thiserror::Error;

/// Errors from turning raw text into conversion input
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// At least one field broke a rule
    #[error("Invalid input: {0}")]
    Rejected(ValidationReport),

    /// Empty CIDR on an address whose block has no default prefix length
    #[error("CIDR is required for {0} (no default for its address block)")]
    MissingCidr(Ipv4Octets),

    /// CIDR text that is not a prefix length
    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    /// Validated text that still failed to parse
    #[error(transparent)]
    Core(#[from] IpconvError),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Validated address and prefix length, ready for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionInput {
    pub address: Ipv4Octets,
    pub cidr: Cidr,
}

/// Split `address/cidr` text into its IP and CIDR parts
///
/// Without a `/` the CIDR part is empty.
///
/// # Examples
///
/// ```
/// use ipconv_validator::split_combined;
///
/// assert_eq!(split_combined("192.168.10.1/24"), ("192.168.10.1", "24"));
/// assert_eq!(split_combined("192.168.10.1"), ("192.168.10.1", ""));
/// ```
pub fn split_combined(text: &str) -> (&str, &str) {
    text.split_once('/').unwrap_or((text, ""))
}

/// Validate both fields and parse them
///
/// An empty CIDR falls back to the classful default of the address block.
pub fn parse_validated(ip: &str, cidr: &str) -> Result<ConversionInput> {
    let report = validate(ip, cidr);
    if !report.is_valid() {
        return Err(ValidatorError::Rejected(report));
    }

    let address = Ipv4Octets::parse_canonical(ip)?;
    let prefix_len = if cidr.is_empty() {
        classify(&address)
            .default_cidr()
            .ok_or(ValidatorError::MissingCidr(address))?
    } else {
        cidr.parse::<u8>()
            .map_err(|_| ValidatorError::InvalidCidr(cidr.to_string()))?
    };

    Ok(ConversionInput {
        address,
        cidr: Cidr::new(prefix_len)?,
    })
}

/// [`split_combined`] then [`parse_validated`]
pub fn parse_combined(text: &str) -> Result<ConversionInput> {
    let (ip, cidr) = split_combined(text);
    parse_validated(ip, cidr)
}
