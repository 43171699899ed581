//! Remote catalog gateway
//!
//! Thin contract over any object-storage backend, scoped to the
//! configured key prefix. Policy (soft-fail listing, best-effort delete)
//! lives in the [`Library`](crate::library::Library) facade; backends
//! report every failure so tests can exercise both paths.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{CatalogEntry, Receipt};

pub mod memory;
pub mod s3;

pub use memory::MemoryGateway;
pub use s3::S3Gateway;

/// Contract the library requires from an object-storage backend
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// List one page of entries under the configured prefix
    ///
    /// Placeholder/marker objects are excluded (see [`is_placeholder`]).
    /// Fails with `Unavailable` on transport or auth errors.
    async fn list(&self) -> CatalogResult<Vec<CatalogEntry>>;

    /// Retrieve the raw bytes of an entry
    ///
    /// Fails with `ObjectNotFound` or `Unavailable`; never swallowed.
    async fn fetch_content(&self, key: &str) -> CatalogResult<Vec<u8>>;

    /// Write an object; same key overwrites prior content
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> CatalogResult<Receipt>;

    /// Remove an object; deleting an absent key succeeds
    async fn delete(&self, key: &str) -> CatalogResult<()>;
}

/// Whether a listed object is a directory placeholder rather than an image
///
/// Some consoles create a zero-byte marker object for the prefix itself.
/// An explicit predicate keeps real images even when no marker exists,
/// unlike positionally dropping the first listing result.
pub fn is_placeholder(key: &str, size: i64, prefix: &str) -> bool {
    key == prefix || key.ends_with('/') || size == 0
}
