//! IPv4 address and CIDR input validation
//!
//! Each field runs an ordered rule chain and stops at the first broken rule,
//! whose message becomes the only message for that field:
//! - IP address: required, dotted-quad format, octet range, leading zeros
//! - CIDR: numeric, 0-32 range, leading zeros, class-conditional range
//!
//! Validation failures are returned as data ([`ValidationReport`]), never as
//! errors. [`parse_validated`] turns a passing report into typed values.
//!
//! # Examples
//!
//! ```
//! use ipconv_validator::validate;
//!
//! let report = validate("10.0.0.1", "7");
//! assert!(report.ip.is_valid());
//! assert_eq!(
//!     report.cidr.message(),
//!     Some("When Address Class is A, CIDR must be between 8 and 15.")
//! );
//! ```

use ipconv_cidr::classify_address_class_str;
use ipconv_core::AddressClass;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::debug;

mod input;

pub use input::{
    parse_combined, parse_validated, split_combined, ConversionInput, ValidatorError,
};

lazy_static! {
    static ref IPV4_FORMAT: Regex =
        Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").expect("valid regex");
    static ref CIDR_NUMERIC: Regex = Regex::new(r"^[0-9]+$").expect("valid regex");
}

/// Input field a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IpAddress,
    Cidr,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::IpAddress => f.write_str("IP Address"),
            Field::Cidr => f.write_str("CIDR"),
        }
    }
}

/// Validation rules, one variant per check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    Ipv4Format,
    OctetRange,
    OctetLeadingZero,
    CidrNumeric,
    CidrRange,
    CidrLeadingZero,
    CidrClassRange,
}

/// IP address chain, in evaluation order
pub const IP_RULES: [Rule; 4] = [
    Rule::Required,
    Rule::Ipv4Format,
    Rule::OctetRange,
    Rule::OctetLeadingZero,
];

/// CIDR chain, in evaluation order (skipped for empty input)
pub const CIDR_RULES: [Rule; 4] = [
    Rule::CidrNumeric,
    Rule::CidrRange,
    Rule::CidrLeadingZero,
    Rule::CidrClassRange,
];

/// What a rule sees: the raw field text and the class of the IP field
struct RuleInput<'a> {
    text: &'a str,
    address_class: AddressClass,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Ipv4Format => "ipv4_format",
            Rule::OctetRange => "octet_range",
            Rule::OctetLeadingZero => "octet_leading_zero",
            Rule::CidrNumeric => "cidr_numeric",
            Rule::CidrRange => "cidr_range",
            Rule::CidrLeadingZero => "cidr_leading_zero",
            Rule::CidrClassRange => "cidr_class_range",
        }
    }

    fn is_broken(&self, input: &RuleInput<'_>) -> bool {
        let text = input.text;
        match self {
            Rule::Required => text.is_empty(),
            Rule::Ipv4Format => !IPV4_FORMAT.is_match(text),
            Rule::OctetRange => text
                .split('.')
                .any(|octet| octet.parse::<u16>().map_or(true, |value| value > 255)),
            Rule::OctetLeadingZero => text.split('.').any(has_leading_zero),
            Rule::CidrNumeric => !CIDR_NUMERIC.is_match(text),
            Rule::CidrRange => text.parse::<u32>().map_or(true, |value| value > 32),
            Rule::CidrLeadingZero => has_leading_zero(text),
            Rule::CidrClassRange => match (input.address_class.cidr_range(), text.parse::<u8>()) {
                (Some(range), Ok(value)) => !range.contains(&value),
                _ => false,
            },
        }
    }

    fn message(&self, input: &RuleInput<'_>) -> String {
        match self {
            Rule::Required => "IP Address field is required.".to_string(),
            Rule::Ipv4Format => {
                "IP Address must be in format \"IPv4 (000.000.000.000)\".".to_string()
            }
            Rule::OctetRange => "All octets must be between 0 and 255.".to_string(),
            Rule::OctetLeadingZero => "All octets must not start with 0.".to_string(),
            Rule::CidrNumeric => "CIDR must be numeric.".to_string(),
            Rule::CidrRange => "CIDR must be between 0 and 32.".to_string(),
            Rule::CidrLeadingZero => "CIDR must not start with 0.".to_string(),
            Rule::CidrClassRange => match input.address_class.cidr_range() {
                Some(range) => format!(
                    "When Address Class is {}, CIDR must be between {} and {}.",
                    input.address_class,
                    range.start(),
                    range.end()
                ),
                None => String::new(),
            },
        }
    }
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

/// Result of one field's rule chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Valid,
    Invalid { rule: Rule, message: String },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Message of the first broken rule
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { message, .. } => Some(message),
        }
    }

    pub fn rule(&self) -> Option<Rule> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { rule, .. } => Some(*rule),
        }
    }
}

/// Outcome of validating both fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ip: ValidationOutcome,
    pub cidr: ValidationOutcome,
}

impl ValidationReport {
    /// Both fields passed their full chain
    pub fn is_valid(&self) -> bool {
        self.ip.is_valid() && self.cidr.is_valid()
    }

    /// Failure messages, IP field first
    pub fn messages(&self) -> Vec<(Field, &str)> {
        [(Field::IpAddress, &self.ip), (Field::Cidr, &self.cidr)]
            .into_iter()
            .filter_map(|(field, outcome)| outcome.message().map(|message| (field, message)))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.messages().into_iter().map(|(_, m)| m).collect();
        if messages.is_empty() {
            f.write_str("valid")
        } else {
            f.write_str(&messages.join(" "))
        }
    }
}

fn run_chain(field: Field, rules: &[Rule], input: &RuleInput<'_>) -> ValidationOutcome {
    match rules.iter().find(|rule| rule.is_broken(input)) {
        Some(rule) => {
            debug!(%field, rule = rule.name(), input = input.text, "validation rule failed");
            ValidationOutcome::Invalid {
                rule: *rule,
                message: rule.message(input),
            }
        }
        None => ValidationOutcome::Valid,
    }
}

/// Validate raw IP address text
pub fn validate_ip(text: &str) -> ValidationOutcome {
    let input = RuleInput {
        text,
        address_class: AddressClass::Undefined,
    };
    run_chain(Field::IpAddress, &IP_RULES, &input)
}

/// Validate raw CIDR text
///
/// `address_class` is the class of an already valid IP field; pass
/// [`AddressClass::Undefined`] to skip the class-conditional range.
/// Empty text is valid.
pub fn validate_cidr(text: &str, address_class: AddressClass) -> ValidationOutcome {
    if text.is_empty() {
        return ValidationOutcome::Valid;
    }
    let input = RuleInput {
        text,
        address_class,
    };
    run_chain(Field::Cidr, &CIDR_RULES, &input)
}

/// Validate both fields
pub fn validate(ip: &str, cidr: &str) -> ValidationReport {
    let ip_outcome = validate_ip(ip);
    let address_class = if ip_outcome.is_valid() {
        classify_address_class_str(ip)
    } else {
        AddressClass::Undefined
    };

    ValidationReport {
        ip: ip_outcome,
        cidr: validate_cidr(cidr, address_class),
    }
}
