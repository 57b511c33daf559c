// SPDX-License-Identifier: MPL-2.0
//! reqwest adapter for the storage service.

use crate::application::port::{UploadCapability, UploadError};
use crate::config::Config;
use crate::domain::asset::{AssetRef, ImageAsset};
use crate::infrastructure::http::build_client;
use crate::infrastructure::mime::sniff_mime;
use serde::Deserialize;
use tracing::debug;

/// JSON envelope returned by the storage service for an upload.
#[derive(Debug, Deserialize)]
struct StoredAsset {
    url: String,
}

/// HTTP-backed implementation of [`UploadCapability`].
pub struct HttpAssetStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAssetStore {
    /// Creates a store from an already-built client.
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Creates a store from the service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Http`] if the client fails to build.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        Ok(Self::new(
            build_client(config)?,
            config.upload_endpoint.clone(),
            config.api_key.clone(),
        ))
    }

    /// Fetches a stored payload, reporting download progress as a
    /// fraction in `0.0..=1.0` when the response declares its length.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] if the service is unreachable, answers
    /// with a non-success status, or the payload is not an image.
    pub async fn fetch_with_progress(
        &self,
        reference: &AssetRef,
        mut progress_callback: impl FnMut(f32) + Send,
    ) -> Result<ImageAsset, UploadError> {
        use futures_util::StreamExt;

        let mut request = self.client.get(reference.as_str());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UploadError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let header_mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let total_size = response.content_length().unwrap_or(0);

        let mut bytes: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| UploadError::Unreachable(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
            if total_size > 0 {
                progress_callback(bytes.len() as f32 / total_size as f32);
            }
        }

        // Trust an image/* content-type header; sniff the bytes otherwise.
        let mime = match header_mime.filter(|m| m.starts_with("image/")) {
            Some(mime) => mime,
            None => sniff_mime(&bytes)
                .ok_or_else(|| {
                    UploadError::InvalidPayload("response is not a recognizable image".to_string())
                })?
                .to_string(),
        };

        debug!(reference = %reference, size = bytes.len(), mime = %mime, "asset fetched");
        ImageAsset::new(bytes, mime).map_err(|e| UploadError::InvalidPayload(e.to_string()))
    }
}

impl UploadCapability for HttpAssetStore {
    async fn put(&self, asset: &ImageAsset) -> Result<AssetRef, UploadError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, asset.mime())
            .body(asset.bytes().to_vec());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UploadError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let stored: StoredAsset = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidPayload(e.to_string()))?;
        debug!(source = %asset.short_id(), url = %stored.url, "asset uploaded");
        Ok(AssetRef::new(stored.url))
    }

    async fn fetch(&self, reference: &AssetRef) -> Result<ImageAsset, UploadError> {
        self.fetch_with_progress(reference, |_| {}).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_builds_from_config() {
        let config = Config::default();
        let store = HttpAssetStore::from_config(&config).expect("client");
        assert_eq!(store.endpoint, config.upload_endpoint);
        assert!(store.api_key.is_none());
    }

    #[test]
    fn stored_asset_envelope_parses() {
        let stored: StoredAsset =
            serde_json::from_str(r#"{"url": "https://cdn.example/abc"}"#).expect("parse");
        assert_eq!(stored.url, "https://cdn.example/abc");
    }

    #[test]
    fn stored_asset_envelope_rejects_missing_url() {
        let result: Result<StoredAsset, _> = serde_json::from_str(r#"{"id": "abc"}"#);
        assert!(result.is_err());
    }
}
