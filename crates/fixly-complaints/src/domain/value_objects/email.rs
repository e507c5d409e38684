//! Email Value Object
//!
//! Immutable, validated customer email address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object with validation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new validated email
    pub fn new(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(EmailError::Empty);
        }

        if !Self::is_valid_format(&value) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> Option<&str> {
        self.0.split('@').nth(1)
    }

    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        // Exactly one @, non-empty local part, and a dot inside the domain
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            return false;
        }

        let local = parts[0];
        let domain = parts[1];

        !local.is_empty()
            && !domain.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    Empty,
    InvalidFormat,
}

impl std::error::Error for EmailError {}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Email is required"),
            Self::InvalidFormat => write!(f, "Enter a valid email address"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::new("customer@example.com").unwrap();
        assert_eq!(email.as_str(), "customer@example.com");
        assert_eq!(email.domain(), Some("example.com"));
    }

    #[test]
    fn test_email_trim() {
        let email = Email::new("  customer@example.com  ").unwrap();
        assert_eq!(email.as_str(), "customer@example.com");
    }

    #[test]
    fn test_empty_email() {
        assert!(matches!(Email::new(""), Err(EmailError::Empty)));
        assert!(matches!(Email::new("   "), Err(EmailError::Empty)));
    }

    #[test]
    fn test_email_no_at() {
        assert!(matches!(Email::new("customer"), Err(EmailError::InvalidFormat)));
    }

    #[test]
    fn test_email_two_ats() {
        assert!(matches!(
            Email::new("a@b@example.com"),
            Err(EmailError::InvalidFormat)
        ));
    }

    #[test]
    fn test_email_no_dot_in_domain() {
        assert!(matches!(
            Email::new("customer@example"),
            Err(EmailError::InvalidFormat)
        ));
    }

    #[test]
    fn test_email_inner_whitespace() {
        assert!(matches!(
            Email::new("cust omer@example.com"),
            Err(EmailError::InvalidFormat)
        ));
    }
}
