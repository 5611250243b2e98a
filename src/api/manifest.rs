use crate::api::models::Manifest;
use crate::api::HTTP_CLIENT;
use crate::auth::Auth;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("manifest request failed: {0}")]
    Transport(String),
    #[error("manifest request returned status {0}")]
    Status(u16),
    #[error("manifest could not be decoded: {0}")]
    Decode(String),
}

pub fn decode_manifest(body: &str) -> Result<Manifest, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

pub struct ManifestClient {
    url: String,
}

impl ManifestClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// `GET` the manifest with the Basic header `auth` implies.
    pub async fn fetch(&self, auth: &Auth) -> Result<Manifest, FetchError> {
        let mut request = HTTP_CLIENT.get(&self.url);
        if let Some(authorization) = auth.authorization_header() {
            request = request.header("Authorization", authorization);
        }

        let response = request.send().await.map_err(|e| {
            warn!("manifest request to {} failed: {e}", self.url);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("manifest request returned {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let manifest = decode_manifest(&body)?;
        debug!(
            version = manifest.version,
            items = manifest.items.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }
}
