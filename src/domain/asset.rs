// SPDX-License-Identifier: MPL-2.0
//! Image payloads and remote asset handles.
//!
//! An [`ImageAsset`] is an opaque, immutable byte payload plus its mime
//! type. It is produced once per upload action and never mutated; editing
//! always yields a fresh asset. An [`AssetRef`] is the durable handle a
//! remote storage service returns for an uploaded payload.

use std::fmt;
use std::sync::Arc;

/// Result type for asset construction.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur when constructing an [`ImageAsset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The payload contained no bytes.
    EmptyPayload,
    /// The mime type is not an image type.
    UnsupportedMime(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::EmptyPayload => write!(f, "image payload is empty"),
            AssetError::UnsupportedMime(mime) => {
                write!(f, "unsupported mime type: {mime}")
            }
        }
    }
}

impl std::error::Error for AssetError {}

/// An immutable image payload with its mime type.
///
/// The byte buffer is shared via [`Arc`], so cloning an asset is cheap and
/// every clone refers to the same payload. A blake3 content id is computed
/// at construction and identifies the payload across session replacements.
///
/// # Example
///
/// ```
/// use lumina_studio::domain::asset::ImageAsset;
///
/// let asset = ImageAsset::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png").unwrap();
/// assert_eq!(asset.mime(), "image/png");
/// assert_eq!(asset.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ImageAsset {
    bytes: Arc<Vec<u8>>,
    mime: String,
    content_id: String,
}

impl ImageAsset {
    /// Creates a new asset from raw bytes and a mime type.
    ///
    /// Only `image/*` payloads are accepted; anything else is rejected at
    /// the boundary, matching the upload surface which only admits image
    /// files.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::EmptyPayload`] for an empty buffer and
    /// [`AssetError::UnsupportedMime`] for a non-image mime type.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> AssetResult<Self> {
        let mime = mime.into();
        if bytes.is_empty() {
            return Err(AssetError::EmptyPayload);
        }
        if !mime.starts_with("image/") {
            return Err(AssetError::UnsupportedMime(mime));
        }
        let content_id = blake3::hash(&bytes).to_hex().to_string();
        Ok(Self {
            bytes: Arc::new(bytes),
            mime,
            content_id,
        })
    }

    /// Returns the raw payload bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the payload is empty (never the case for a
    /// successfully constructed asset).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the mime type, e.g. `image/png`.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Returns the blake3 content id of the payload (hex encoded).
    #[must_use]
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Returns a short prefix of the content id, suitable for log lines.
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.content_id[..12.min(self.content_id.len())]
    }
}

impl PartialEq for ImageAsset {
    fn eq(&self, other: &Self) -> bool {
        self.content_id == other.content_id
    }
}

impl Eq for ImageAsset {}

/// Durable handle to a remotely stored asset, as returned by the upload
/// capability. Usually a URL, but treated as opaque by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef(String);

impl AssetRef {
    /// Creates a new handle from its remote representation.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the remote representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_construction_validates_payload() {
        assert_eq!(
            ImageAsset::new(Vec::new(), "image/png").unwrap_err(),
            AssetError::EmptyPayload
        );
        assert!(matches!(
            ImageAsset::new(vec![1, 2, 3], "text/plain").unwrap_err(),
            AssetError::UnsupportedMime(mime) if mime == "text/plain"
        ));
    }

    #[test]
    fn asset_clones_share_payload() {
        let asset = ImageAsset::new(vec![1, 2, 3, 4], "image/jpeg").unwrap();
        let clone = asset.clone();
        assert_eq!(asset, clone);
        assert_eq!(clone.bytes(), &[1, 2, 3, 4]);
        assert_eq!(asset.content_id(), clone.content_id());
    }

    #[test]
    fn identical_payloads_share_content_id() {
        let a = ImageAsset::new(vec![9, 9, 9], "image/png").unwrap();
        let b = ImageAsset::new(vec![9, 9, 9], "image/webp").unwrap();
        // Identity is content-based; mime is presentation metadata.
        assert_eq!(a, b);
    }

    #[test]
    fn short_id_is_a_prefix() {
        let asset = ImageAsset::new(vec![5; 16], "image/png").unwrap();
        assert_eq!(asset.short_id().len(), 12);
        assert!(asset.content_id().starts_with(asset.short_id()));
    }

    #[test]
    fn asset_error_display() {
        assert_eq!(
            AssetError::EmptyPayload.to_string(),
            "image payload is empty"
        );
        assert!(AssetError::UnsupportedMime("text/html".into())
            .to_string()
            .contains("text/html"));
    }

    #[test]
    fn asset_ref_roundtrip() {
        let reference = AssetRef::new("https://cdn.example/a1");
        assert_eq!(reference.as_str(), "https://cdn.example/a1");
        assert_eq!(reference.to_string(), "https://cdn.example/a1");
    }
}
