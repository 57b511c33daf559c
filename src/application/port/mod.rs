// SPDX-License-Identifier: MPL-2.0
//! Port definitions (capability traits).
//!
//! Each port is an abstract contract the core consumes; concrete bindings
//! live in the infrastructure layer. Implementations must be `Send + Sync`
//! and return `Send` futures so the session manager can run inside spawned
//! tasks.

pub mod gallery;
pub mod transform;
pub mod upload;

pub use gallery::{GalleryActionError, GalleryBulkCapability};
pub use transform::{TransformCapability, TransformError};
pub use upload::{UploadCapability, UploadError};
