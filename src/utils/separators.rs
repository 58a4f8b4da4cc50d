//! Séparateurs décimal et de milliers utilisés pour les montants

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeparatorError {
    #[error("Decimal and thousands separators must differ (both are '{0}')")]
    Identical(char),
}

/// Paire de séparateurs, toujours distincts une fois construite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "RawSeparators", into = "RawSeparators")]
#[display("decimal '{decimal}', thousands '{thousands}'")]
pub struct FormatSeparators {
    decimal: char,
    thousands: char,
}

impl FormatSeparators {
    pub fn new(decimal: char, thousands: char) -> Result<Self, SeparatorError> {
        if decimal == thousands {
            return Err(SeparatorError::Identical(decimal));
        }
        Ok(Self { decimal, thousands })
    }

    /// `1.234.567,89`
    pub fn chilean() -> Self {
        Self {
            decimal: ',',
            thousands: '.',
        }
    }

    pub fn decimal(&self) -> char {
        self.decimal
    }

    pub fn thousands(&self) -> char {
        self.thousands
    }
}

impl Default for FormatSeparators {
    /// `1,234,567.89`
    fn default() -> Self {
        Self {
            decimal: '.',
            thousands: ',',
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawSeparators {
    decimal: char,
    thousands: char,
}

impl TryFrom<RawSeparators> for FormatSeparators {
    type Error = SeparatorError;

    fn try_from(raw: RawSeparators) -> Result<Self, Self::Error> {
        Self::new(raw.decimal, raw.thousands)
    }
}

impl From<FormatSeparators> for RawSeparators {
    fn from(seps: FormatSeparators) -> Self {
        Self {
            decimal: seps.decimal,
            thousands: seps.thousands,
        }
    }
}
