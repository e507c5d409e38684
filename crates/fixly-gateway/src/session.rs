//! Session Store
//!
//! Holds the bearer credential issued by the portal's login flow. Every
//! gateway adapter reads the current token from here; refresh and expiry
//! are the login flow's concern.

use parking_lot::RwLock;

/// Shared bearer-token store
#[derive(Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a token already in hand
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Install the credential after login
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Drop the credential on logout
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}
