//! Submission payload assembly
//!
//! Maps a validated form onto the wire shape of the registration endpoint.
//! Keys with no value are omitted entirely rather than sent as null.

use serde::Serialize;

use crate::domain::aggregates::{AssignCategory, ComplaintStatus, RegistrationForm};

/// Body of the complaint-creation request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComplaintPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub model: String,
    pub issue: String,
    pub status: ComplaintStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_shop: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent: Option<i64>,
}

impl ComplaintPayload {
    /// Build the payload from the current form state. The selected target
    /// identifier is parsed as an integer and attached under the field the
    /// category maps to; nothing is attached when no target was chosen.
    pub fn from_form(form: &RegistrationForm) -> Self {
        let mut payload = Self {
            name: form.name().to_string(),
            phone: form.phone().to_string(),
            email: form.email().to_string(),
            password: form.password().to_string(),
            address: form.address().to_string(),
            pincode: form.pincode().to_string(),
            area: form.area().map(str::to_string),
            state: form.state_label().map(str::to_string),
            model: form.model().to_string(),
            issue: form.issue().to_string(),
            status: form.status(),
            assign_to: form.category().map(|c| c.wire_value().to_string()),
            assigned_shop: None,
            assigned_agent: None,
        };

        if let (Some(category), Some(target)) = (form.category(), form.target()) {
            match target.parse::<i64>() {
                Ok(id) => match category {
                    AssignCategory::AffiliatedShop | AssignCategory::IndependentShop => {
                        payload.assigned_shop = Some(id);
                    }
                    AssignCategory::TagAgent => {
                        payload.assigned_agent = Some(id);
                    }
                },
                Err(_) => {
                    tracing::warn!(target_id = %target, "non-numeric assignment target dropped");
                }
            }
        }

        payload
    }
}
