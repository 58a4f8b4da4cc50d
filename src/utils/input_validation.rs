use derive_more::derive::Display;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::separators::FormatSeparators;

// ASCII only, like the `\d` of the browser regex
static DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Failed to compile digits regex"));

const GROUP_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub struct InvalidInput;

/// Vrai si le segment est un entier écrit sous sa forme canonique:
/// uniquement des chiffres ASCII, sans zéro en tête (sauf "0" lui-même).
fn is_canonical_integer(segment: &str) -> bool {
    match segment.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        digits => digits.iter().all(u8::is_ascii_digit),
    }
}

/// Checks that `value` is a grouped amount under the given separators,
/// e.g. `1,234,567.89` with `.` / `,`.
pub fn validate_amount(value: &str, separators: &FormatSeparators) -> bool {
    let decimal_parts: Vec<&str> = value.split(separators.decimal()).collect();

    match decimal_parts.as_slice() {
        [_, fraction] if !is_canonical_integer(fraction) => {
            debug!("Amount {value:?} rejected: bad fractional part {fraction:?}");
            return false;
        }
        [_] | [_, _] => {}
        _ => {
            debug!("Amount {value:?} rejected: more than one decimal separator");
            return false;
        }
    }

    let groups: Vec<&str> = decimal_parts[0].split(separators.thousands()).collect();

    let valid = match groups.len() {
        0 => false,
        1 => is_canonical_integer(groups[0]),
        _ => groups.iter().enumerate().all(|(i, group)| {
            if !is_canonical_integer(group) {
                return false;
            }
            if i == 0 {
                group.len() <= GROUP_WIDTH
            } else {
                group.len() == GROUP_WIDTH
            }
        }),
    };

    if !valid {
        debug!("Amount {value:?} rejected: bad integer grouping");
    }
    valid
}

/// Checks that `value` is made of ASCII digits only, no sign nor decimal point.
pub fn validate_numeric(value: &str) -> bool {
    DIGITS_REGEX.is_match(value)
}

/// Forme "callback" du framework de validation: la valeur et le drapeau
/// de validité voyagent ensemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationArgs {
    pub value: String,
    pub is_valid: bool,
}

impl ValidationArgs {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: false,
        }
    }

    /// Runs `validator` on the value, stores the verdict and returns it.
    pub fn run<F>(&mut self, validator: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        self.is_valid = validator(&self.value);
        self.is_valid
    }
}

/// Wrapper type for an amount that has been validated
///
/// Not deserializable: checking it needs the page separators.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, Display)]
pub struct Amount(String);

impl Amount {
    pub fn parse(value: &str, separators: &FormatSeparators) -> Result<Self, InvalidInput> {
        if validate_amount(value, separators) {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidInput)
        }
    }
}

impl AsRef<str> for Amount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wrapper type for a digits-only field that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(try_from = "String")]
pub struct Digits(String);

impl TryFrom<String> for Digits {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if validate_numeric(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidInput)
        }
    }
}

impl TryFrom<&str> for Digits {
    type Error = InvalidInput;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

impl AsRef<str> for Digits {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
