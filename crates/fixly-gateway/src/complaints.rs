//! Complaint Registration Adapter
//!
//! POST `{base}/leads/{lead_id}/complaints` (or the unscoped
//! `{base}/complaints` when the form was opened without a source lead).
//! Error bodies come in three shapes (a single `detail` message, a
//! field-keyed validation map, or something unparseable) and are
//! classified into [`RegistrationApiError`] accordingly.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use fixly_complaints::application::payload::ComplaintPayload;
use fixly_complaints::domain::aggregates::Complaint;
use fixly_complaints::ports::outbound::{ComplaintApi, RegistrationApiError};

use crate::error::GatewayError;
use crate::session::SessionStore;

/// HTTP implementation of the complaint-registration port
pub struct HttpComplaintApi {
    base_url: String,
    client: reqwest::Client,
    session: Arc<SessionStore>,
}

impl HttpComplaintApi {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: base_url.into(),
            client: crate::http_client()?,
            session,
        })
    }

    fn endpoint(&self, lead_id: Option<&str>) -> String {
        match lead_id {
            Some(id) => format!("{}/leads/{}/complaints", self.base_url, id),
            None => format!("{}/complaints", self.base_url),
        }
    }

    /// Classify a non-success response body
    fn classify(status: u16, body: &str) -> RegistrationApiError {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return RegistrationApiError::Transport(format!("server returned {status}"));
        };

        let Some(object) = value.as_object() else {
            return RegistrationApiError::Transport(format!("server returned {status}"));
        };

        if let Some(detail) = object.get("detail").and_then(|d| d.as_str()) {
            return RegistrationApiError::Rejected(detail.to_string());
        }

        // Field-keyed map: values are messages or lists of messages
        let mut fields = Vec::new();
        for (field, messages) in object {
            let message = match messages {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Array(list) => {
                    list.first().and_then(|m| m.as_str()).map(str::to_string)
                }
                _ => None,
            };
            if let Some(message) = message {
                fields.push((field.clone(), message));
            }
        }

        if fields.is_empty() {
            RegistrationApiError::Transport(format!("server returned {status}"))
        } else {
            RegistrationApiError::Validation(fields)
        }
    }
}

#[async_trait]
impl ComplaintApi for HttpComplaintApi {
    async fn register(
        &self,
        lead_id: Option<&str>,
        payload: &ComplaintPayload,
    ) -> Result<Complaint, RegistrationApiError> {
        debug!(?lead_id, "registering complaint");

        let mut request = self.client.post(self.endpoint(lead_id)).json(payload);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            match GatewayError::from_request(e) {
                GatewayError::NoResponse => RegistrationApiError::NoResponse,
                other => RegistrationApiError::Transport(other.to_string()),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify(status.as_u16(), &body));
        }

        response
            .json::<Complaint>()
            .await
            .map_err(|e| RegistrationApiError::Transport(format!("parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_body_is_rejected() {
        let error = HttpComplaintApi::classify(400, r#"{"detail":"Lead already converted"}"#);
        assert_eq!(
            error,
            RegistrationApiError::Rejected("Lead already converted".into())
        );
    }

    #[test]
    fn test_field_map_is_validation() {
        let error =
            HttpComplaintApi::classify(400, r#"{"email":"already in use","phone":"too short"}"#);
        match error {
            RegistrationApiError::Validation(fields) => {
                assert!(fields.contains(&("email".into(), "already in use".into())));
                assert!(fields.contains(&("phone".into(), "too short".into())));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_field_map_with_message_lists() {
        let error = HttpComplaintApi::classify(400, r#"{"email":["already in use","invalid"]}"#);
        assert_eq!(
            error,
            RegistrationApiError::Validation(vec![("email".into(), "already in use".into())])
        );
    }

    #[test]
    fn test_unparseable_body_is_transport() {
        let error = HttpComplaintApi::classify(502, "<html>bad gateway</html>");
        assert_eq!(
            error,
            RegistrationApiError::Transport("server returned 502".into())
        );
    }

    #[test]
    fn test_empty_object_is_transport() {
        let error = HttpComplaintApi::classify(500, "{}");
        assert!(matches!(error, RegistrationApiError::Transport(_)));
    }
}
