//! Outbound ports
//!
//! Contracts the infrastructure must implement: the postal directory, the
//! nearest-options lookup, the complaint-registration endpoint, and the
//! notification sink the UI listens on.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Candidate, Complaint};
use crate::domain::value_objects::Pincode;

/// One record of the postal directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostOffice {
    /// Area name (post-office name)
    pub name: String,
    /// Region label (state)
    pub state: String,
}

/// Postal directory lookup port
#[async_trait]
pub trait PostalDirectory: Send + Sync {
    /// Look up the post offices serving a pincode. An empty or
    /// non-successful directory response is reported as
    /// [`DirectoryError::NotFound`].
    async fn lookup(&self, pincode: &Pincode) -> Result<Vec<PostOffice>, DirectoryError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("pincode not found")]
    NotFound,
    #[error("directory lookup failed: {0}")]
    Transport(String),
}

/// Candidate assignment targets near an area, partitioned by category
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NearestOptions {
    pub affiliated_shops: Vec<Candidate>,
    pub independent_shops: Vec<Candidate>,
    pub tag_agents: Vec<Candidate>,
}

/// Nearest-options lookup port
#[async_trait]
pub trait NearestOptionsProvider: Send + Sync {
    async fn nearest(&self, pincode: &Pincode, area: &str) -> Result<NearestOptions, NearestError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NearestError {
    #[error("nearest-options lookup failed: {0}")]
    Transport(String),
}

/// Complaint registration port
#[async_trait]
pub trait ComplaintApi: Send + Sync {
    /// Create a complaint. Scoped to the source lead when one exists.
    async fn register(
        &self,
        lead_id: Option<&str>,
        payload: &crate::application::payload::ComplaintPayload,
    ) -> Result<Complaint, RegistrationApiError>;
}

/// Failure shapes of the registration endpoint
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationApiError {
    /// Structured rejection with a single detail message
    #[error("{0}")]
    Rejected(String),
    /// Field-keyed validation map, in response order
    #[error("validation failed")]
    Validation(Vec<(String, String)>),
    /// The request never produced a response
    #[error("no response from server")]
    NoResponse,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
    Warning,
}

/// A user-facing notification event. A later event with the same id
/// supersedes the earlier one (the sink owns that coalescing).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: Option<String>,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Loading, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    /// Attach a correlation id for replace-by-id semantics
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            message: message.into(),
        }
    }
}

/// Notification sink port
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
