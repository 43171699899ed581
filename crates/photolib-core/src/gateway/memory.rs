//! In-memory catalog backend
//!
//! Implements the gateway contract against a process-local map. Used as
//! the test double for the facade and reconciler, and for offline runs.
//! Failure switches simulate transport outages per operation so both the
//! soft-fail and hard-fail propagation paths can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{is_placeholder, CatalogGateway};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogEntry, Receipt};

struct StoredObject {
    bytes: Vec<u8>,
    last_modified: DateTime<Utc>,
}

/// Catalog gateway over an in-process map
#[derive(Default)]
pub struct MemoryGateway {
    prefix: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_list: AtomicBool,
    fail_delete: AtomicBool,
    // Puts for this exact key fail; others succeed.
    fail_put_key: Mutex<Option<String>>,
}

impl MemoryGateway {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Seed an object with an explicit timestamp
    pub async fn insert(&self, key: impl Into<String>, bytes: Vec<u8>, last_modified: DateTime<Utc>) {
        self.objects.lock().await.insert(
            key.into(),
            StoredObject {
                bytes,
                last_modified,
            },
        );
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.lock().await.contains_key(key)
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Make subsequent `list` calls fail with `Unavailable`
    pub fn set_list_failure(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete` calls fail with `Unavailable`
    pub fn set_delete_failure(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Make `put` fail for one specific key (other keys still succeed)
    pub async fn set_put_failure_for(&self, key: Option<String>) {
        *self.fail_put_key.lock().await = key;
    }

    fn outage() -> CatalogError {
        CatalogError::unavailable(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "simulated outage",
        ))
    }
}

#[async_trait]
impl CatalogGateway for MemoryGateway {
    async fn list(&self) -> CatalogResult<Vec<CatalogEntry>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }

        let objects = self.objects.lock().await;
        let mut entries: Vec<CatalogEntry> = objects
            .iter()
            .filter(|(key, obj)| {
                key.starts_with(&self.prefix)
                    && !is_placeholder(key, obj.bytes.len() as i64, &self.prefix)
            })
            .map(|(key, obj)| CatalogEntry::new(key.clone(), obj.last_modified))
            .collect();

        // S3 lists lexicographically within a page.
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    async fn fetch_content(&self, key: &str) -> CatalogResult<Vec<u8>> {
        let objects = self.objects.lock().await;
        objects
            .get(key)
            .map(|obj| obj.bytes.clone())
            .ok_or_else(|| CatalogError::ObjectNotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> CatalogResult<Receipt> {
        if self.fail_put_key.lock().await.as_deref() == Some(key) {
            return Err(Self::outage());
        }

        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                last_modified: Utc::now(),
            },
        );

        Ok(Receipt {
            key: key.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }

        // Absent keys are fine, matching S3 delete semantics.
        self.objects.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_fetch_roundtrip() {
        let gateway = MemoryGateway::new("people/");
        gateway
            .put("people/ana.jpg", &[1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        let bytes = gateway.fetch_content("people/ana.jpg").await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_missing_key_is_not_found() {
        let gateway = MemoryGateway::new("people/");
        let err = gateway.fetch_content("people/ghost.jpg").await.unwrap_err();
        assert!(matches!(err, CatalogError::ObjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_excludes_placeholders_and_foreign_prefixes() {
        let gateway = MemoryGateway::new("people/");
        let now = Utc::now();
        gateway.insert("people/", vec![], now).await;
        gateway.insert("people/ana.jpg", vec![1], now).await;
        gateway.insert("people/sub/", vec![7], now).await;
        gateway.insert("pets/rex.jpg", vec![2], now).await;

        let entries = gateway.list().await.unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["people/ana.jpg"]);
    }

    #[tokio::test]
    async fn test_list_failure_switch() {
        let gateway = MemoryGateway::new("people/");
        gateway.set_list_failure(true);

        let err = gateway.list().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable { .. }));

        gateway.set_list_failure(false);
        assert!(gateway.list().await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        let gateway = MemoryGateway::new("people/");
        assert!(gateway.delete("people/ghost.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let gateway = MemoryGateway::new("people/");
        gateway
            .put("people/ana.jpg", &[1], "image/jpeg")
            .await
            .unwrap();
        gateway
            .put("people/ana.jpg", &[2, 3], "image/jpeg")
            .await
            .unwrap();

        assert_eq!(gateway.object_count().await, 1);
        let bytes = gateway.fetch_content("people/ana.jpg").await.unwrap();
        assert_eq!(bytes, vec![2, 3]);
    }
}
