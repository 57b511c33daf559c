// SPDX-License-Identifier: MPL-2.0
//! HTTP bindings for the application ports.
//!
//! Both services speak plain HTTPS with JSON envelopes. The client is
//! configured with an explicit redirect policy, a user agent and the
//! per-request timeout from [`Config`], and is shared by clone (reqwest
//! clients are cheap handles over a connection pool).

use crate::config::Config;
use crate::error::{Error, Result};
use std::time::Duration;

mod gallery;
mod store;
mod transform;

pub use gallery::NullGalleryService;
pub use store::HttpAssetStore;
pub use transform::HttpTransformService;

const USER_AGENT: &str = "LuminaStudio/0.1.0";

/// Builds the shared HTTP client from the service configuration.
///
/// # Errors
///
/// Returns [`Error::Http`] if the TLS backend fails to initialize.
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| Error::Http(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let config = Config::default();
        assert!(build_client(&config).is_ok());
    }
}
