//! photolib Core Library
//!
//! This crate provides the core functionality for photolib, a client that
//! treats an object-storage bucket as a mutable photo library: list,
//! upload, resolve, and delete images while keeping an in-memory view
//! consistent with the remote store.
//!
//! # Architecture
//!
//! - **Gateway**: thin async contract over the object store, scoped to a
//!   fixed key prefix (`people/` by default). S3 and in-memory backends.
//! - **Reconciler**: the authoritative ordered in-memory collection;
//!   seed / merge / remove transitions preserve ordering and uniqueness.
//! - **Resolver**: pure entry-to-URL mapping.
//! - **Library**: facade applying the propagation policies (soft-fail
//!   listing, all-or-nothing batch merge, optimistic delete).
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let gateway = S3Gateway::connect(&config).await;
//! let library = Library::new(config, gateway);
//!
//! let entries = library.refresh().await;
//! let url = library.url_for(&entries[0])?;
//! ```
//!
//! # Modules
//!
//! - `library`: client facade (main entry point)
//! - `reconciler`: library state and its three transitions
//! - `gateway`: object-storage contract and backends
//! - `resolver`: entry-to-URL resolution
//! - `models`: catalog entries, pending uploads, receipts
//! - `config`: application configuration
//! - `error`: catalog error taxonomy

pub mod config;
pub mod error;
pub mod gateway;
pub mod library;
pub mod models;
pub mod reconciler;
pub mod resolver;

pub use config::Config;
pub use error::{CatalogError, CatalogResult};
pub use gateway::{CatalogGateway, MemoryGateway, S3Gateway};
pub use library::{Library, UploadOutcome};
pub use models::{normalize_key, CatalogEntry, ImageFormat, PendingUpload, Receipt};
pub use reconciler::LibraryState;
pub use resolver::resolve;
