//! # maqra-store
//!
//! The catalog reconciliation and persistence core.
//!
//! An authoritative in-memory [`Catalog`] is seeded from a compiled-in
//! default dataset, superseded by a persisted snapshot when one exists,
//! and filtered by a persisted soft-delete set.  Every mutation updates
//! the in-memory catalog first and then re-persists a full snapshot to
//! the key/value store; raw media bytes for uploaded videos live in a
//! separate blob store.

pub mod blobs;
pub mod catalog;
pub mod filter;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod playback;
pub mod seed;
pub mod session;

mod error;

pub use blobs::BlobStore;
pub use catalog::{CatalogRepository, CatalogStats, Durability, MediaPayload, UpdateFields};
pub use error::{CatalogError, Result, StoreError};
pub use kv::KvStore;
pub use models::{Catalog, VideoRecord, VideoSource};
pub use playback::{Playback, PlaybackSource};
pub use session::Session;
