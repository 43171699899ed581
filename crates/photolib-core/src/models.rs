//! Data models for photolib
//!
//! Defines the core data structures: catalog entries, pending uploads,
//! and write receipts. Upload validation happens at construction time so
//! that an invalid file can never reach the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// One stored image object in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Object key, always carrying the configured prefix
    pub key: String,
    /// Timestamp assigned by the store at upload time
    pub last_modified: DateTime<Utc>,
}

impl CatalogEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            last_modified,
        }
    }
}

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Parse from a MIME type; anything but JPEG and PNG is rejected
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Infer from a file name's extension (case-insensitive)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase())?;
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// The MIME type sent as the object's content type
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// A selected local file not yet part of the library
///
/// Construction validates the MIME type, so holding a `PendingUpload`
/// guarantees the file is eligible for upload. Discarded after the batch
/// either merges or fails.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    /// Original file name (key is derived from this)
    pub file_name: String,
    /// Validated image format
    pub format: ImageFormat,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl PendingUpload {
    /// Validate and wrap a selected file
    ///
    /// Fails with `UnsupportedFileType` before any network call is made.
    pub fn new(
        file_name: impl Into<String>,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CatalogResult<Self> {
        let file_name = file_name.into();
        let format = ImageFormat::from_mime(content_type).ok_or_else(|| {
            CatalogError::UnsupportedFileType {
                file_name: file_name.clone(),
                content_type: content_type.to_string(),
            }
        })?;

        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }
}

/// Acknowledgement of a successful `put`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The key the object was written under
    pub key: String,
}

/// Prepend the catalog prefix to a bare file name
///
/// Keys that already carry the prefix pass through unchanged, so the
/// function is idempotent.
pub fn normalize_key(prefix: &str, name: &str) -> String {
    if name.starts_with(prefix) {
        name.to_string()
    } else {
        format!("{prefix}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_mime() {
        assert_eq!(ImageFormat::from_mime("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime("image/gif"), None);
        assert_eq!(ImageFormat::from_mime("application/pdf"), None);
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(ImageFormat::from_file_name("a.jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_file_name("a.JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_file_name("a.png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_file_name("a.webp"), None);
        assert_eq!(ImageFormat::from_file_name("no-extension"), None);
    }

    #[test]
    fn test_pending_upload_accepts_jpeg_and_png() {
        let jpeg = PendingUpload::new("a.jpg", "image/jpeg", vec![1, 2, 3]).unwrap();
        assert_eq!(jpeg.format, ImageFormat::Jpeg);
        assert_eq!(jpeg.format.content_type(), "image/jpeg");

        let png = PendingUpload::new("b.png", "image/png", vec![4, 5]).unwrap();
        assert_eq!(png.format, ImageFormat::Png);
    }

    #[test]
    fn test_pending_upload_rejects_other_types() {
        let err = PendingUpload::new("clip.gif", "image/gif", vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFileType { .. }));
        assert!(err.to_string().contains("clip.gif"));
    }

    #[test]
    fn test_normalize_key_prepends_prefix() {
        assert_eq!(normalize_key("people/", "ana.jpg"), "people/ana.jpg");
    }

    #[test]
    fn test_normalize_key_is_idempotent() {
        let once = normalize_key("people/", "ana.jpg");
        let twice = normalize_key("people/", &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = CatalogEntry::new("people/ana.jpg", Utc::now());
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
