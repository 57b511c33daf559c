// SPDX-License-Identifier: MPL-2.0
//! Byte-level image format sniffing.
//!
//! Used when a payload arrives without a trusted mime type (e.g. a fetch
//! response missing its content-type header). Detection is based on magic
//! bytes only; no decoding happens here.

/// Guesses the `image/*` mime type of a payload from its magic bytes.
///
/// Returns `None` when the payload is not a recognizable image format.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image_rs::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png_magic() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(sniff_mime(&bytes), Some("image/png"));
    }

    #[test]
    fn sniffs_jpeg_magic() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(sniff_mime(&bytes), Some("image/jpeg"));
    }

    #[test]
    fn rejects_unknown_payloads() {
        assert_eq!(sniff_mime(b"definitely not an image"), None);
        assert_eq!(sniff_mime(&[]), None);
    }
}
