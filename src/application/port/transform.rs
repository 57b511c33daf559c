// SPDX-License-Identifier: MPL-2.0
//! Transform port definition.
//!
//! The transform capability applies one [`TransformDirective`] to an
//! uploaded asset and returns the reference of the produced image. Quality
//! and output count are fixed request parameters in the current design
//! (`count = 1`).

use crate::domain::asset::AssetRef;
use crate::domain::directive::TransformDirective;
use std::fmt;
use std::future::Future;

/// Errors that can occur during a remote transformation.
#[derive(Debug, Clone)]
pub enum TransformError {
    /// The AI service could not be reached.
    ServiceUnreachable(String),
    /// The AI service reported a failure.
    Rejected {
        /// HTTP-like status code reported by the service.
        status: u16,
        /// Service-provided message, if any.
        message: String,
    },
    /// The directive is not supported by the service.
    UnsupportedDirective(String),
    /// The service answered with something the adapter could not parse.
    InvalidResponse(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::ServiceUnreachable(msg) => {
                write!(f, "transform service unreachable: {msg}")
            }
            TransformError::Rejected { status, message } => {
                write!(f, "transform rejected (status {status}): {message}")
            }
            TransformError::UnsupportedDirective(id) => {
                write!(f, "unsupported directive: {id}")
            }
            TransformError::InvalidResponse(msg) => {
                write!(f, "invalid transform response: {msg}")
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Port for the remote AI transformation service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the returned futures must be
/// `Send` so calls can cross task boundaries.
pub trait TransformCapability: Send + Sync {
    /// Applies a directive to an uploaded asset and returns the reference
    /// of the produced image.
    ///
    /// # Errors
    ///
    /// Returns a [`TransformError`] if the service is unreachable, rejects
    /// the request, or does not understand the directive.
    fn apply(
        &self,
        reference: &AssetRef,
        directive: &TransformDirective,
    ) -> impl Future<Output = Result<AssetRef, TransformError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directive::ToolKind;

    struct EchoTransform;

    impl TransformCapability for EchoTransform {
        async fn apply(
            &self,
            reference: &AssetRef,
            directive: &TransformDirective,
        ) -> Result<AssetRef, TransformError> {
            if matches!(directive, TransformDirective::Tool(ToolKind::Avatar)) {
                return Err(TransformError::UnsupportedDirective(
                    directive.id().to_string(),
                ));
            }
            Ok(AssetRef::new(format!("{}#out", reference.as_str())))
        }
    }

    #[tokio::test]
    async fn echo_transform_produces_new_reference() {
        let service = EchoTransform;
        let input = AssetRef::new("mem://abc");
        let directive = TransformDirective::Tool(ToolKind::Retouch);

        let output = service.apply(&input, &directive).await.unwrap();
        assert_eq!(output.as_str(), "mem://abc#out");
    }

    #[tokio::test]
    async fn unsupported_directive_maps_to_error() {
        let service = EchoTransform;
        let input = AssetRef::new("mem://abc");
        let directive = TransformDirective::Tool(ToolKind::Avatar);

        let result = service.apply(&input, &directive).await;
        assert!(matches!(
            result,
            Err(TransformError::UnsupportedDirective(id)) if id == "avatar"
        ));
    }

    #[test]
    fn transform_error_display() {
        let err = TransformError::Rejected {
            status: 422,
            message: "bad prompt".into(),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("bad prompt"));
    }
}
