//! URL resolution
//!
//! Pure mapping from a catalog entry to its public object URL. No network
//! access; same entry and same bucket/region always yield the same
//! locator. The format must stay byte-compatible with links already
//! stored elsewhere.

use crate::error::{CatalogError, CatalogResult};
use crate::models::CatalogEntry;

/// Resolve the public URL for a catalog entry
///
/// Fails with `InvalidEntry` when the key is empty. This is the one
/// validation enforced strictly and synchronously, unlike the soft-fail
/// listing path.
pub fn resolve(entry: &CatalogEntry, bucket: &str, region: &str) -> CatalogResult<String> {
    if entry.key.is_empty() {
        return Err(CatalogError::invalid_entry("missing key"));
    }

    Ok(format!(
        "https://{bucket}.s3.{region}.amazonaws.com/{key}",
        key = entry.key
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_resolve_exact_format() {
        let entry = CatalogEntry::new("people/a.png", Utc::now());
        let url = resolve(&entry, "b", "r").unwrap();
        assert_eq!(url, "https://b.s3.r.amazonaws.com/people/a.png");
    }

    #[test]
    fn test_resolve_empty_key_fails() {
        let entry = CatalogEntry::new("", Utc::now());
        let err = resolve(&entry, "bucket", "us-east-1").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { .. }));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let entry = CatalogEntry::new("people/ana.jpg", Utc::now());
        let first = resolve(&entry, "photos", "eu-west-1").unwrap();
        let second = resolve(&entry, "photos", "eu-west-1").unwrap();
        assert_eq!(first, second);
    }
}
