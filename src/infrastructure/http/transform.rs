// SPDX-License-Identifier: MPL-2.0
//! reqwest adapter for the AI transform service.

use crate::application::port::{TransformCapability, TransformError};
use crate::config::Config;
use crate::domain::asset::AssetRef;
use crate::domain::directive::{Quality, TransformDirective};
use crate::infrastructure::http::build_client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The current design always requests a single output image.
const OUTPUT_COUNT: u8 = 1;

/// JSON request sent to the transform service.
#[derive(Debug, Serialize)]
struct TransformRequest<'a> {
    image_url: &'a str,
    instruction: &'a str,
    tool: &'a str,
    quality: &'a str,
    count: u8,
}

/// JSON envelope returned by the transform service.
#[derive(Debug, Deserialize)]
struct TransformResponse {
    url: String,
}

/// HTTP-backed implementation of [`TransformCapability`].
pub struct HttpTransformService {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    quality: Quality,
}

impl HttpTransformService {
    /// Creates a service from an already-built client.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: Option<String>,
        quality: Quality,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            quality,
        }
    }

    /// Creates a service from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Http`] if the client fails to build.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        Ok(Self::new(
            build_client(config)?,
            config.transform_endpoint.clone(),
            config.api_key.clone(),
            config.quality,
        ))
    }

    fn request_body<'a>(
        &self,
        reference: &'a AssetRef,
        directive: &'a TransformDirective,
    ) -> TransformRequest<'a> {
        TransformRequest {
            image_url: reference.as_str(),
            instruction: directive.instruction(),
            tool: directive.tool_id(),
            quality: self.quality.as_str(),
            count: OUTPUT_COUNT,
        }
    }
}

impl TransformCapability for HttpTransformService {
    async fn apply(
        &self,
        reference: &AssetRef,
        directive: &TransformDirective,
    ) -> Result<AssetRef, TransformError> {
        let body = self.request_body(reference, directive);
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransformError::ServiceUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            // 422 is the service's "directive not understood" answer.
            if status.as_u16() == 422 {
                return Err(TransformError::UnsupportedDirective(
                    directive.id().to_string(),
                ));
            }
            return Err(TransformError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: TransformResponse = response
            .json()
            .await
            .map_err(|e| TransformError::InvalidResponse(e.to_string()))?;
        debug!(directive = %directive.id(), url = %envelope.url, "transform accepted");
        Ok(AssetRef::new(envelope.url))
    }
}
