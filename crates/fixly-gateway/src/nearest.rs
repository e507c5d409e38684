//! Nearest-Options Adapter
//!
//! GET `{base}/nearest-options?pincode=..&area=..` returning the candidate
//! assignment targets partitioned into the three categories.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use fixly_complaints::domain::aggregates::Candidate;
use fixly_complaints::domain::value_objects::Pincode;
use fixly_complaints::ports::outbound::{NearestError, NearestOptions, NearestOptionsProvider};

use crate::error::GatewayError;
use crate::session::SessionStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NearestResponse {
    #[serde(default)]
    affiliated_shops: Vec<CandidateDto>,
    #[serde(default)]
    independent_shops: Vec<CandidateDto>,
    #[serde(default)]
    tag_agents: Vec<CandidateDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateDto {
    id: serde_json::Value,
    label: String,
}

impl From<CandidateDto> for Candidate {
    fn from(dto: CandidateDto) -> Self {
        // Ids arrive as numbers or strings depending on the endpoint build
        let id = match dto.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Self {
            id,
            label: dto.label,
        }
    }
}

impl From<NearestResponse> for NearestOptions {
    fn from(response: NearestResponse) -> Self {
        Self {
            affiliated_shops: response.affiliated_shops.into_iter().map(Into::into).collect(),
            independent_shops: response.independent_shops.into_iter().map(Into::into).collect(),
            tag_agents: response.tag_agents.into_iter().map(Into::into).collect(),
        }
    }
}

/// HTTP implementation of the nearest-options port
pub struct HttpNearestOptions {
    base_url: String,
    client: reqwest::Client,
    session: Arc<SessionStore>,
}

impl HttpNearestOptions {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: base_url.into(),
            client: crate::http_client()?,
            session,
        })
    }
}

#[async_trait]
impl NearestOptionsProvider for HttpNearestOptions {
    async fn nearest(&self, pincode: &Pincode, area: &str) -> Result<NearestOptions, NearestError> {
        debug!(pincode = %pincode, area, "fetching nearest options");

        let mut request = self
            .client
            .get(format!("{}/nearest-options", self.base_url))
            .query(&[("pincode", pincode.as_str()), ("area", area)]);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NearestError::Transport(GatewayError::from_request(e).to_string()))?;

        if !response.status().is_success() {
            return Err(NearestError::Transport(
                GatewayError::Status(response.status().as_u16()).to_string(),
            ));
        }

        let body: NearestResponse = response
            .json()
            .await
            .map_err(|e| NearestError::Transport(format!("parse error: {e}")))?;

        Ok(body.into())
    }
}
