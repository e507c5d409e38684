//! Pincode Value Object
//!
//! Six-digit Indian postal code. Geographic lookups key on this value, so
//! it is validated before any resolver is allowed to fire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Postal code value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pincode(String);

impl Pincode {
    /// Create a new validated pincode
    pub fn new(value: impl Into<String>) -> Result<Self, PincodeError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(PincodeError::Empty);
        }

        if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(PincodeError::NotSixDigits);
        }

        Ok(Self(value))
    }

    /// Get the pincode as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Pincode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    Empty,
    NotSixDigits,
}

impl std::error::Error for PincodeError {}

impl fmt::Display for PincodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Pincode is required"),
            Self::NotSixDigits => write!(f, "Enter a valid 6 digit pincode"),
        }
    }
}
