//! Library facade
//!
//! `Library` owns the in-memory state and applies the propagation
//! policies on top of the gateway contract:
//! - listing failures are recovered locally as an empty library
//! - content fetches propagate errors untouched
//! - deletes are optimistic and best-effort (failure is logged, never
//!   rolled back)
//! - upload batches merge all-or-nothing
//!
//! All state transitions go through one `tokio::sync::Mutex`, so the next
//! state is always derived from the current one and transitions never
//! interleave.

use chrono::Utc;
use futures_util::future::try_join_all;
use rand::Rng;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};
use crate::gateway::CatalogGateway;
use crate::models::{normalize_key, CatalogEntry, PendingUpload};
use crate::reconciler::LibraryState;
use crate::resolver;

/// Placeholder shown instead of an error when the library is empty
pub const EMPTY_LIBRARY_MSG: &str = "No images found.";
/// Batch-level success status
pub const UPLOAD_OK_MSG: &str = "Upload successful!";
/// Batch-level failure status, prompting a retry
pub const UPLOAD_FAILED_MSG: &str = "Upload failed. Please try again.";
/// Shown when an upload is requested with no files selected
pub const NO_SELECTION_MSG: &str = "Please select files to upload.";

/// Result of merging an upload batch into the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Entries newly added to the library
    pub merged: usize,
    /// Batch entries skipped because their key was already present
    pub skipped: usize,
}

/// Client over one bucket's photo catalog
///
/// Construct with an explicit [`Config`] and gateway; nothing here is
/// process-global.
pub struct Library<G: CatalogGateway> {
    config: Config,
    gateway: G,
    state: Mutex<LibraryState>,
}

impl<G: CatalogGateway> Library<G> {
    /// Create a library with an empty state
    ///
    /// Call [`refresh`](Self::refresh) to seed it from the remote catalog.
    pub fn new(config: Config, gateway: G) -> Self {
        Self {
            config,
            gateway,
            state: Mutex::new(LibraryState::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reload the library from the remote catalog
    ///
    /// On a listing failure the library is presented as empty rather than
    /// erroring; the failure is logged. Returns the seeded snapshot.
    pub async fn refresh(&self) -> Vec<CatalogEntry> {
        let entries = match self.gateway.list().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "catalog listing failed, presenting empty library");
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;
        state.seed(entries);
        debug!(count = state.len(), "library seeded");
        state.entries().to_vec()
    }

    /// Upload a batch of validated files and merge them into the library
    ///
    /// All puts run concurrently. The merge is all-or-nothing at the batch
    /// level: if any put fails, nothing is merged and the error propagates
    /// so the caller can surface [`UPLOAD_FAILED_MSG`]. An empty batch is
    /// a no-op.
    pub async fn upload(&self, batch: Vec<PendingUpload>) -> CatalogResult<UploadOutcome> {
        if batch.is_empty() {
            return Ok(UploadOutcome {
                merged: 0,
                skipped: 0,
            });
        }

        let puts = batch.iter().map(|upload| {
            let key = normalize_key(&self.config.prefix, &upload.file_name);
            async move {
                self.gateway
                    .put(&key, &upload.bytes, upload.format.content_type())
                    .await
            }
        });

        let receipts = try_join_all(puts).await?;
        let total = receipts.len();

        // Server timestamps would need another list round-trip; the batch
        // is prepended regardless, so local time is enough.
        let now = Utc::now();
        let additions: Vec<CatalogEntry> = receipts
            .into_iter()
            .map(|receipt| CatalogEntry::new(receipt.key, now))
            .collect();

        let mut state = self.state.lock().await;
        let merged = state.merge_uploads(additions);
        info!(merged, total, "upload batch merged");

        Ok(UploadOutcome {
            merged,
            skipped: total - merged,
        })
    }

    /// Remove an entry, optimistically
    ///
    /// The entry leaves local state immediately; the remote delete is
    /// best-effort and a failure is only logged. Returns whether the key
    /// was present locally.
    pub async fn remove(&self, key: &str) -> bool {
        let removed = {
            let mut state = self.state.lock().await;
            state.remove(key)
        };

        if let Err(err) = self.gateway.delete(key).await {
            warn!(key, error = %err, "best-effort delete failed");
        }

        removed
    }

    /// Fetch the raw bytes of an entry
    ///
    /// Bare file names are normalized with the configured prefix. Errors
    /// propagate; a caller (e.g. a downstream recognition step) needs to
    /// know the content is missing.
    pub async fn fetch_content(&self, key: &str) -> CatalogResult<Vec<u8>> {
        let full_key = normalize_key(&self.config.prefix, key);
        self.gateway.fetch_content(&full_key).await
    }

    /// Snapshot of the current library state, newest-first
    pub async fn entries(&self) -> Vec<CatalogEntry> {
        self.state.lock().await.entries().to_vec()
    }

    /// Public URL for an entry, bound to the configured bucket/region
    pub fn url_for(&self, entry: &CatalogEntry) -> CatalogResult<String> {
        resolver::resolve(entry, &self.config.bucket, &self.config.region)
    }

    /// Pick a uniformly random entry after refreshing the catalog
    pub async fn random_entry(&self) -> CatalogResult<CatalogEntry> {
        let entries = self.refresh().await;
        if entries.is_empty() {
            return Err(CatalogError::EmptyLibrary);
        }

        let index = rand::thread_rng().gen_range(0..entries.len());
        Ok(entries[index].clone())
    }
}
