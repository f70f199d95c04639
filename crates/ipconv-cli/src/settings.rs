//! Output settings
//!
//! Resolves the output format and address notation from command-line flags,
//! then the `IPCONV_OUTPUT` / `IPCONV_NOTATION` environment variables, then
//! built-in defaults.

use clap::ValueEnum;
use std::env;
use thiserror::Error;

pub const OUTPUT_VAR: &str = "IPCONV_OUTPUT";
pub const NOTATION_VAR: &str = "IPCONV_NOTATION";

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Environment variable holding an unknown value
    #[error("Invalid value {value:?} for {var} (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: String,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    #[default]
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// Which address forms to print
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Notation {
    /// Dotted decimal (192.168.10.1)
    Decimal,
    /// Dotted binary octets (11000000.10101000.00001010.00000001)
    Binary,
    /// Decimal and binary side by side
    #[default]
    Both,
}

impl Notation {
    pub fn shows_decimal(&self) -> bool {
        !matches!(self, Notation::Binary)
    }

    pub fn shows_binary(&self) -> bool {
        !matches!(self, Notation::Decimal)
    }
}

/// Effective output settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub output: OutputFormat,
    pub notation: Notation,
}

impl Settings {
    /// Flags win over the environment; the environment wins over defaults
    pub fn resolve(output: Option<OutputFormat>, notation: Option<Notation>) -> Result<Self> {
        let output = match output {
            Some(output) => output,
            None => from_env(OUTPUT_VAR)?.unwrap_or_default(),
        };
        let notation = match notation {
            Some(notation) => notation,
            None => from_env(NOTATION_VAR)?.unwrap_or_default(),
        };

        Ok(Self { output, notation })
    }
}

fn from_env<T: ValueEnum>(var: &'static str) -> Result<Option<T>> {
    let value = match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };

    T::from_str(value.trim(), true)
        .map(Some)
        .map_err(|_| SettingsError::InvalidValue {
            var,
            expected: T::value_variants()
                .iter()
                .filter_map(|v| v.to_possible_value())
                .map(|v| v.get_name().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            value,
        })
}
