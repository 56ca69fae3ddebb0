//! The catalog repository.
//!
//! Owns the authoritative in-memory [`Catalog`] and reconciles it with the
//! two durable backends.  Merge order on [`CatalogRepository::initialize`]
//! is fixed and explicit: compiled-in defaults, then the persisted
//! snapshot (full replacement, not a field merge), then the soft-delete
//! filter.
//!
//! Every mutation ends by re-persisting the whole catalog ("snapshot on
//! write").  Callers are expected to serialize mutations; blob reads for
//! playback may run concurrently with catalog reads.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use maqra_shared::constants::{
    DEFAULT_DURATION, DELETED_IDS_KEY, MAX_UPLOAD_SIZE, SNAPSHOT_KEY,
};
use maqra_shared::{media, BlobKey, Subject, VideoId};

use crate::blobs::BlobStore;
use crate::error::CatalogError;
use crate::filter::apply_soft_deletes;
use crate::kv::KvStore;
use crate::models::{Catalog, VideoRecord, VideoSource};
use crate::playback::{Playback, PlaybackSource};
use crate::seed;
use crate::session::Session;

/// Media supplied when creating or editing a record.
#[derive(Debug, Clone)]
pub enum MediaPayload {
    /// External link: platform URL or direct media URL.
    RemoteUrl(String),
    /// Uploaded file: bytes go to the blob store before the record exists.
    Upload { file_name: String, bytes: Vec<u8> },
}

/// Editable fields of an existing record.
#[derive(Debug, Clone)]
pub struct UpdateFields {
    pub title: String,
    pub description: String,
    /// `None` keeps the stored duration.
    pub duration: Option<String>,
}

/// How durable the last snapshot write was.
///
/// `Degraded` means the in-memory mutation succeeded but the persisted
/// snapshot is incomplete (or absent); the user's action is honored for
/// this session even if it may not survive a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Durability {
    Durable,
    Degraded,
}

impl Durability {
    fn and(self, other: Durability) -> Durability {
        if self == Durability::Durable && other == Durability::Durable {
            Durability::Durable
        } else {
            Durability::Degraded
        }
    }
}

/// Per-subject record counts for the admin stats pane.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub per_subject: BTreeMap<Subject, usize>,
    pub total: usize,
}

/// Repository owning the in-memory catalog and both storage backends.
pub struct CatalogRepository {
    kv: KvStore,
    blobs: BlobStore,
    session: Session,
    catalog: Catalog,
    deleted: HashSet<VideoId>,
}

impl CatalogRepository {
    /// Open the default stores under the platform data directory.
    pub fn new() -> Result<Self, CatalogError> {
        let kv = KvStore::new().map_err(CatalogError::StorageRead)?;
        let blobs = BlobStore::new().map_err(CatalogError::StorageRead)?;
        Ok(Self::with_stores(
            kv,
            blobs,
            maqra_shared::constants::DEFAULT_ADMIN_PASSWORD,
        ))
    }

    /// Build a repository over explicit stores (tests, custom layouts).
    pub fn with_stores(kv: KvStore, blobs: BlobStore, admin_secret: &str) -> Self {
        Self {
            kv,
            blobs,
            session: Session::new(admin_secret),
            catalog: Catalog::empty(),
            deleted: HashSet::new(),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Build the in-memory catalog: defaults, superseded by the persisted
    /// snapshot when one exists, every subject key ensured, then the
    /// soft-delete filter.  Idempotent.
    pub async fn initialize(&mut self) -> Result<(), CatalogError> {
        let snapshot: Option<Catalog> = self
            .kv
            .get_json(SNAPSHOT_KEY)
            .map_err(CatalogError::StorageRead)?;

        let from_snapshot = snapshot.is_some();
        let mut catalog = match snapshot {
            Some(snapshot) => snapshot,
            None => seed::default_catalog(),
        };
        catalog.ensure_subjects();

        let deleted: HashSet<VideoId> = self
            .kv
            .get_json(DELETED_IDS_KEY)
            .map_err(CatalogError::StorageRead)?
            .unwrap_or_default();

        self.catalog = apply_soft_deletes(&catalog, &deleted);
        self.deleted = deleted;

        info!(
            from_snapshot,
            records = self.catalog.total(),
            soft_deleted = self.deleted.len(),
            "catalog initialized"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Ordered records for one subject; empty for an unknown or empty
    /// subject.  Never fails.
    pub fn list_by_subject(&self, subject: Subject) -> &[VideoRecord] {
        self.catalog.records(subject)
    }

    /// Next catalog-wide unique id: max over all subjects, plus one.
    pub fn next_id(&self) -> VideoId {
        VideoId(self.catalog.max_id() + 1)
    }

    /// Per-subject counts and the grand total.
    pub fn stats(&self) -> CatalogStats {
        let per_subject: BTreeMap<Subject, usize> = Subject::ALL
            .iter()
            .map(|s| (*s, self.catalog.records(*s).len()))
            .collect();
        let total = per_subject.values().sum();
        CatalogStats { per_subject, total }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create a record under `subject`.
    ///
    /// For uploads the bytes are written to the blob store *before* the
    /// record is added, so a failed blob write leaves the catalog
    /// untouched — no orphan metadata pointing at a missing blob.
    pub async fn create_record(
        &mut self,
        subject: Subject,
        title: &str,
        description: &str,
        duration: Option<&str>,
        media: MediaPayload,
    ) -> Result<(VideoRecord, Durability), CatalogError> {
        let title = non_empty(title, "title")?;
        let description = non_empty(description, "description")?;

        let (id, source) = match media {
            MediaPayload::RemoteUrl(url) => {
                let url = non_empty(&url, "video link")?;
                (self.next_id(), VideoSource::Remote { url })
            }
            MediaPayload::Upload { file_name, bytes } => {
                let file_name = non_empty(&file_name, "file name")?;
                if bytes.is_empty() {
                    return Err(CatalogError::Validation(
                        "uploaded file is empty".to_string(),
                    ));
                }
                if bytes.len() > MAX_UPLOAD_SIZE {
                    return Err(CatalogError::Validation(format!(
                        "file too large: {} bytes (max {})",
                        bytes.len(),
                        MAX_UPLOAD_SIZE
                    )));
                }

                let blob_key = self.mint_blob_key();
                self.blobs
                    .put(blob_key, &bytes)
                    .await
                    .map_err(CatalogError::StorageWrite)?;

                (self.mint_upload_id(), VideoSource::Local { blob_key, file_name })
            }
        };

        let record = VideoRecord {
            id,
            title,
            description,
            source,
            duration: duration
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(DEFAULT_DURATION)
                .to_string(),
            upload_date: Utc::now().format("%Y-%m-%d").to_string(),
        };

        self.catalog.push(subject, record.clone());
        let durability = self.persist_snapshot();

        info!(id = %record.id, %subject, local = record.source.is_local(), "video added");
        Ok((record, durability))
    }

    /// Edit a record in place.  Requires an elevated session.
    ///
    /// Replacement bytes reuse the record's existing blob key when it is
    /// already a local reference; otherwise a fresh key is minted and the
    /// old blob (if any) is left orphaned — acceptable, no cleanup pass.
    pub async fn update_record(
        &mut self,
        id: VideoId,
        subject: Subject,
        fields: UpdateFields,
        new_media: Option<MediaPayload>,
    ) -> Result<(VideoRecord, Durability), CatalogError> {
        if !self.session.is_elevated() {
            return Err(CatalogError::Unauthorized);
        }

        let title = non_empty(&fields.title, "title")?;
        let description = non_empty(&fields.description, "description")?;

        let existing = self
            .catalog
            .find(subject, id)
            .cloned()
            .ok_or(CatalogError::NotFound { id, subject })?;

        // Resolve the new source (and write bytes) before touching the
        // record, so a failed blob write leaves it unchanged.
        let new_source = match new_media {
            None => None,
            Some(MediaPayload::RemoteUrl(url)) => {
                let url = non_empty(&url, "video link")?;
                Some(VideoSource::Remote { url })
            }
            Some(MediaPayload::Upload { file_name, bytes }) => {
                let file_name = non_empty(&file_name, "file name")?;
                if bytes.is_empty() {
                    return Err(CatalogError::Validation(
                        "uploaded file is empty".to_string(),
                    ));
                }
                if bytes.len() > MAX_UPLOAD_SIZE {
                    return Err(CatalogError::Validation(format!(
                        "file too large: {} bytes (max {})",
                        bytes.len(),
                        MAX_UPLOAD_SIZE
                    )));
                }

                let blob_key = match existing.source {
                    VideoSource::Local { blob_key, .. } => blob_key,
                    VideoSource::Remote { .. } => self.mint_blob_key(),
                };
                self.blobs
                    .put(blob_key, &bytes)
                    .await
                    .map_err(CatalogError::StorageWrite)?;

                Some(VideoSource::Local { blob_key, file_name })
            }
        };

        let record = match self.catalog.find_mut(subject, id) {
            Some(record) => record,
            None => return Err(CatalogError::NotFound { id, subject }),
        };

        record.title = title;
        record.description = description;
        if let Some(duration) = fields.duration {
            let duration = duration.trim();
            if !duration.is_empty() {
                record.duration = duration.to_string();
            }
        }
        if let Some(source) = new_source {
            record.source = source;
        }

        let updated = record.clone();
        let durability = self.persist_snapshot();

        info!(id = %updated.id, %subject, "video updated");
        Ok((updated, durability))
    }

    /// Delete a record.  Requires an elevated session.  Irreversible.
    ///
    /// The id joins the persisted soft-delete set so the record cannot
    /// resurface when the defaults re-seed.  Blob deletion is best-effort:
    /// metadata removal is the authoritative action.
    pub async fn delete_record(
        &mut self,
        id: VideoId,
        subject: Subject,
    ) -> Result<Durability, CatalogError> {
        if !self.session.is_elevated() {
            return Err(CatalogError::Unauthorized);
        }

        let removed = self
            .catalog
            .remove(subject, id)
            .ok_or(CatalogError::NotFound { id, subject })?;

        self.deleted.insert(id);
        let deleted_durability = self.persist_deleted();

        if let VideoSource::Local { blob_key, .. } = removed.source {
            if let Err(e) = self.blobs.delete(blob_key).await {
                warn!(%blob_key, error = %e, "blob deletion failed; metadata removal stands");
            }
        }

        let snapshot_durability = self.persist_snapshot();

        info!(%id, %subject, "video deleted");
        Ok(deleted_durability.and(snapshot_durability))
    }

    // ------------------------------------------------------------------
    // Session gate
    // ------------------------------------------------------------------

    /// Compare against the admin secret; elevate the session on match.
    pub fn attempt_elevate(&mut self, password: &str) -> bool {
        self.session.attempt_elevate(password)
    }

    /// Drop elevation unconditionally.
    pub fn revoke(&mut self) {
        self.session.revoke();
    }

    pub fn is_elevated(&self) -> bool {
        self.session.is_elevated()
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Resolve a record into a ready-to-play [`Playback`] value.
    ///
    /// YouTube remotes become privacy-friendly embed URLs, other remotes
    /// are handed through as direct URLs, and local records are read from
    /// the blob store with their MIME type inferred from the file name.
    pub async fn open_playback(
        &self,
        id: VideoId,
        subject: Subject,
    ) -> Result<Playback, CatalogError> {
        let record = self
            .catalog
            .find(subject, id)
            .ok_or(CatalogError::NotFound { id, subject })?;

        let source = match &record.source {
            VideoSource::Remote { url } => {
                if media::is_youtube_url(url) {
                    match media::extract_youtube_id(url) {
                        Some(video_id) => PlaybackSource::Embed {
                            url: media::youtube_embed_url(&video_id),
                        },
                        // Unextractable id: let the player try the raw URL.
                        None => PlaybackSource::Direct { url: url.clone() },
                    }
                } else {
                    PlaybackSource::Direct { url: url.clone() }
                }
            }
            VideoSource::Local { blob_key, file_name } => {
                let bytes = self
                    .blobs
                    .get(*blob_key)
                    .await
                    .map_err(CatalogError::StorageRead)?
                    .ok_or_else(|| {
                        CatalogError::StorageRead(crate::error::StoreError::Io(
                            std::io::Error::new(
                                std::io::ErrorKind::NotFound,
                                format!("blob {blob_key} missing"),
                            ),
                        ))
                    })?;

                PlaybackSource::Media {
                    blob_key: *blob_key,
                    mime: media::mime_for_file_name(file_name),
                    bytes,
                }
            }
        };

        Ok(Playback {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            source,
        })
    }

    /// Resolve a record and acquire the session playback slot with it.
    pub async fn start_playback(
        &mut self,
        id: VideoId,
        subject: Subject,
    ) -> Result<Playback, CatalogError> {
        let playback = self.open_playback(id, subject).await?;
        self.session.begin_playback(playback.clone());
        Ok(playback)
    }

    /// Release the playback slot (player closed or navigated away).
    pub fn stop_playback(&mut self) -> Option<Playback> {
        self.session.end_playback()
    }

    pub fn active_playback(&self) -> Option<&Playback> {
        self.session.active_playback()
    }

    // ------------------------------------------------------------------
    // Persistence helpers
    // ------------------------------------------------------------------

    /// Serialize the whole catalog to the key/value store.
    ///
    /// A capacity failure retries once with local records stripped (the
    /// metadata-only fallback); any remaining failure degrades instead of
    /// rolling back the in-memory mutation.
    fn persist_snapshot(&self) -> Durability {
        match self.kv.put_json(SNAPSHOT_KEY, &self.catalog) {
            Ok(()) => Durability::Durable,
            Err(crate::error::StoreError::CapacityExceeded { size, limit, .. }) => {
                warn!(size, limit, "snapshot over capacity; retrying without local records");
                let slim = self.catalog.without_local_records();
                match self.kv.put_json(SNAPSHOT_KEY, &slim) {
                    Ok(()) => Durability::Degraded,
                    Err(e) => {
                        warn!(error = %e, "metadata-only snapshot also failed");
                        Durability::Degraded
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "snapshot persistence failed; in-memory catalog kept");
                Durability::Degraded
            }
        }
    }

    fn persist_deleted(&self) -> Durability {
        match self.kv.put_json(DELETED_IDS_KEY, &self.deleted) {
            Ok(()) => Durability::Durable,
            Err(e) => {
                warn!(error = %e, "soft-delete set persistence failed");
                Durability::Degraded
            }
        }
    }

    // ------------------------------------------------------------------
    // Id minting
    // ------------------------------------------------------------------

    /// Upload ids come from the millisecond clock, clamped above the
    /// current maximum so uniqueness holds even against seeded ids.
    fn mint_upload_id(&self) -> VideoId {
        VideoId(Utc::now().timestamp_millis().max(self.catalog.max_id() + 1))
    }

    /// Blob keys come from the same clock, clamped above every key already
    /// referenced by the catalog.
    fn mint_blob_key(&self) -> BlobKey {
        let max_existing = self
            .catalog
            .iter_records()
            .filter_map(|r| match r.source {
                VideoSource::Local { blob_key, .. } => Some(blob_key.0),
                VideoSource::Remote { .. } => None,
            })
            .max()
            .unwrap_or(0);
        BlobKey(Utc::now().timestamp_millis().max(max_existing + 1))
    }
}

fn non_empty(value: &str, field: &str) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CatalogError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}
