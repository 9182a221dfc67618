//! Error types for the library.
//!
//! Library code returns these concrete errors; the binary and the HTTP
//! server wrap them in `anyhow` or map them to status codes.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// A request the user can correct.  No breakdown is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Card and roulette hours are a subset of table hours.
    #[error(
        "card hours ({card_hours}) plus roulette hours ({roulette_hours}) exceed table hours ({table_hours})"
    )]
    TableHoursExceeded {
        card_hours: Decimal,
        roulette_hours: Decimal,
        table_hours: Decimal,
    },

    #[error("{field} must not be negative")]
    NegativeValue { field: &'static str },

    /// The value, or an amount derived from it, is beyond what the
    /// calculation can represent.
    #[error("{field} is out of range")]
    AmountOutOfRange { field: &'static str },
}

impl ValidationError {
    /// Machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TableHoursExceeded { .. } => "TABLE_HOURS_EXCEEDED",
            Self::NegativeValue { .. } => "NEGATIVE_VALUE",
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
        }
    }
}

/// Failure to load or accept a payroll policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("cannot read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse policy file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid policy: {0}")]
    Invalid(String),
}
