// SPDX-License-Identifier: MPL-2.0
//! Upload/storage port definition.
//!
//! The upload capability persists a raw image payload with a remote store
//! and hands back a durable [`AssetRef`] the transform service can consume.
//! It also fetches payloads back by reference, which is how transform
//! results become displayable assets again.

use crate::domain::asset::{AssetRef, ImageAsset};
use std::fmt;
use std::future::Future;

/// Errors that can occur while talking to the storage service.
#[derive(Debug, Clone)]
pub enum UploadError {
    /// The storage service could not be reached.
    Unreachable(String),
    /// The storage service rejected the request.
    Rejected {
        /// HTTP-like status code reported by the service.
        status: u16,
    },
    /// The fetched payload was not a usable image.
    InvalidPayload(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Unreachable(msg) => write!(f, "storage unreachable: {msg}"),
            UploadError::Rejected { status } => {
                write!(f, "storage rejected the request (status {status})")
            }
            UploadError::InvalidPayload(msg) => write!(f, "invalid payload: {msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Port for durable asset storage.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the returned futures must be
/// `Send` so calls can cross task boundaries.
pub trait UploadCapability: Send + Sync {
    /// Stores an image payload and returns its durable reference.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] if the service is unreachable or rejects
    /// the payload.
    fn put(
        &self,
        asset: &ImageAsset,
    ) -> impl Future<Output = Result<AssetRef, UploadError>> + Send;

    /// Fetches a stored payload back by reference.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] if the service is unreachable, the
    /// reference is unknown, or the payload is not an image.
    fn fetch(
        &self,
        reference: &AssetRef,
    ) -> impl Future<Output = Result<ImageAsset, UploadError>> + Send;
}
