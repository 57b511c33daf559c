// SPDX-License-Identifier: MPL-2.0
//! Gallery bulk-action port definition.
//!
//! Download, share and delete over a selection are part of the product
//! surface but have no specified backend semantics yet. They are declared
//! as a capability so the view layer binds against a stable contract; the
//! shipped adapter is a no-op.

use crate::domain::gallery::GalleryItemId;
use std::fmt;
use std::future::Future;

/// Errors reported by a gallery bulk backend.
#[derive(Debug, Clone)]
pub enum GalleryActionError {
    /// The backing service failed.
    Backend(String),
}

impl fmt::Display for GalleryActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryActionError::Backend(msg) => write!(f, "gallery backend error: {msg}"),
        }
    }
}

impl std::error::Error for GalleryActionError {}

/// Port for bulk operations over selected gallery items.
pub trait GalleryBulkCapability: Send + Sync {
    /// Downloads the given items.
    fn download_items(
        &self,
        ids: &[GalleryItemId],
    ) -> impl Future<Output = Result<(), GalleryActionError>> + Send;

    /// Shares the given items.
    fn share_items(
        &self,
        ids: &[GalleryItemId],
    ) -> impl Future<Output = Result<(), GalleryActionError>> + Send;

    /// Deletes the given items.
    fn delete_items(
        &self,
        ids: &[GalleryItemId],
    ) -> impl Future<Output = Result<(), GalleryActionError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBackend {
        deletes: AtomicUsize,
    }

    impl GalleryBulkCapability for CountingBackend {
        async fn download_items(&self, _ids: &[GalleryItemId]) -> Result<(), GalleryActionError> {
            Ok(())
        }

        async fn share_items(&self, _ids: &[GalleryItemId]) -> Result<(), GalleryActionError> {
            Ok(())
        }

        async fn delete_items(&self, ids: &[GalleryItemId]) -> Result<(), GalleryActionError> {
            self.deletes.fetch_add(ids.len(), Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn backend_receives_selected_ids() {
        let backend = CountingBackend::default();
        let ids = vec![GalleryItemId::new("1"), GalleryItemId::new("2")];
        backend.delete_items(&ids).await.unwrap();
        assert_eq!(backend.deletes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn gallery_error_display() {
        assert!(GalleryActionError::Backend("offline".into())
            .to_string()
            .contains("offline"));
    }
}
