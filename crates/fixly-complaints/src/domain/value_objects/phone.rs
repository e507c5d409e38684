//! Phone Value Object
//!
//! Ten-digit Indian mobile number, no country code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone number value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    /// Create a new validated phone number
    pub fn new(value: impl Into<String>) -> Result<Self, PhoneError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(PhoneError::Empty);
        }

        if value.len() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotTenDigits);
        }

        Ok(Self(value))
    }

    /// Get the number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    Empty,
    NotTenDigits,
}

impl std::error::Error for PhoneError {}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Phone number is required"),
            Self::NotTenDigits => write!(f, "Enter a valid 10 digit phone number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phone() {
        let phone = Phone::new("9876543210").unwrap();
        assert_eq!(phone.as_str(), "9876543210");
    }

    #[test]
    fn test_empty_phone() {
        assert!(matches!(Phone::new(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_short_phone() {
        assert!(matches!(Phone::new("98765"), Err(PhoneError::NotTenDigits)));
    }

    #[test]
    fn test_long_phone() {
        assert!(matches!(
            Phone::new("98765432101"),
            Err(PhoneError::NotTenDigits)
        ));
    }

    #[test]
    fn test_phone_with_letters() {
        assert!(matches!(
            Phone::new("98765abcde"),
            Err(PhoneError::NotTenDigits)
        ));
    }
}
