//! Complaint Record
//!
//! The service-request resource returned by the registration endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Created complaint, as returned by the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Complaint lifecycle status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    #[default]
    Assigned,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// Wire value used in the registration payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
