// SPDX-License-Identifier: MPL-2.0
//! No-op gallery bulk backend.
//!
//! Bulk download/share/delete are part of the product surface but have no
//! specified backend yet. This adapter accepts every request, logs it and
//! reports success, so the view layer can bind against the port today.

use crate::application::port::{GalleryActionError, GalleryBulkCapability};
use crate::domain::gallery::GalleryItemId;
use tracing::debug;

/// Gallery bulk backend that acknowledges everything without effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGalleryService;

impl GalleryBulkCapability for NullGalleryService {
    async fn download_items(&self, ids: &[GalleryItemId]) -> Result<(), GalleryActionError> {
        debug!(count = ids.len(), "bulk download requested (no backend)");
        Ok(())
    }

    async fn share_items(&self, ids: &[GalleryItemId]) -> Result<(), GalleryActionError> {
        debug!(count = ids.len(), "bulk share requested (no backend)");
        Ok(())
    }

    async fn delete_items(&self, ids: &[GalleryItemId]) -> Result<(), GalleryActionError> {
        debug!(count = ids.len(), "bulk delete requested (no backend)");
        Ok(())
    }
}
