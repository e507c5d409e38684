//! Inbound ports
//!
//! The operations the portal UI drives the registration workflow with.
//! Every call maps to one form message; derived lookups and notifications
//! happen behind this interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{
    AssignCategory, Complaint, ComplaintStatus, FormField, Lead, RegistrationForm,
};

/// Complaint registration use cases
#[async_trait]
pub trait RegistrationUseCases: Send + Sync {
    /// Open the form pre-populated from a lead, replaying the resolver
    /// cascade to reconstruct the derived geographic state
    async fn load_lead(&self, lead: Lead);

    /// Edit one text field (pincode edits trigger the area resolver)
    async fn edit_field(&self, field: FormField, value: String);

    /// Select a resolved area (triggers the nearest-options resolver)
    async fn select_area(&self, area: String);

    /// Select an assignment category
    async fn select_category(&self, category: AssignCategory);

    /// Select a target within the current category
    async fn select_target(&self, target: String);

    /// Pick the complaint status (defaults to `Assigned`)
    async fn select_status(&self, status: ComplaintStatus);

    /// Validate and submit the form
    async fn submit(&self) -> Result<Complaint, RegistrationError>;

    /// Discard the form state
    async fn close(&self);

    /// Snapshot of the current form state
    fn snapshot(&self) -> RegistrationForm;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Per-field errors were recorded on the form; no network call was made
    #[error("please correct the highlighted fields")]
    ValidationFailed,
    /// A submission is already outstanding; this trigger was a no-op
    #[error("submission already in progress")]
    AlreadySubmitting,
    /// The endpoint rejected the registration
    #[error("{0}")]
    SubmissionFailed(String),
}
