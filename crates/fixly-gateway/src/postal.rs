//! Postal Directory Adapter
//!
//! GET `{base}/postal/{pincode}` against the postal-code directory. The
//! directory is effectively static data, so successful responses are
//! cached per pincode for the lifetime of the adapter.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::debug;

use fixly_complaints::domain::value_objects::Pincode;
use fixly_complaints::ports::outbound::{DirectoryError, PostOffice, PostalDirectory};

use crate::error::GatewayError;
use crate::session::SessionStore;

/// Wire shape of the directory response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryResponse {
    status: String,
    #[serde(default)]
    post_offices: Vec<PostOfficeDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostOfficeDto {
    name: String,
    state: String,
}

impl From<PostOfficeDto> for PostOffice {
    fn from(dto: PostOfficeDto) -> Self {
        Self {
            name: dto.name,
            state: dto.state,
        }
    }
}

/// HTTP implementation of the postal-directory port
pub struct HttpPostalDirectory {
    base_url: String,
    client: reqwest::Client,
    session: Arc<SessionStore>,
    cache: DashMap<String, Vec<PostOffice>>,
}

impl HttpPostalDirectory {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: base_url.into(),
            client: crate::http_client()?,
            session,
            cache: DashMap::new(),
        })
    }

    fn interpret(response: DirectoryResponse) -> Result<Vec<PostOffice>, DirectoryError> {
        if !response.status.eq_ignore_ascii_case("success") || response.post_offices.is_empty() {
            return Err(DirectoryError::NotFound);
        }
        Ok(response.post_offices.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostalDirectory for HttpPostalDirectory {
    async fn lookup(&self, pincode: &Pincode) -> Result<Vec<PostOffice>, DirectoryError> {
        if let Some(cached) = self.cache.get(pincode.as_str()) {
            debug!(pincode = %pincode, "postal directory cache hit");
            return Ok(cached.clone());
        }

        let mut request = self
            .client
            .get(format!("{}/postal/{}", self.base_url, pincode));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(GatewayError::from_request(e).to_string()))?;

        if !response.status().is_success() {
            return Err(DirectoryError::Transport(
                GatewayError::Status(response.status().as_u16()).to_string(),
            ));
        }

        let body: DirectoryResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Transport(format!("parse error: {e}")))?;

        let offices = Self::interpret(body)?;
        self.cache
            .insert(pincode.as_str().to_string(), offices.clone());
        Ok(offices)
    }
}
