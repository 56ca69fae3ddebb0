//! Domain model structs persisted in the catalog snapshot.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer over IPC and written to the key/value store
//! as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use maqra_shared::{BlobKey, Subject, VideoId};

// ---------------------------------------------------------------------------
// VideoSource
// ---------------------------------------------------------------------------

/// Where a video's media lives.
///
/// Exactly two variants by design: an older format also allowed inline
/// media data on the record itself, which bloated snapshots past the
/// store's capacity.  That variant is not representable here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VideoSource {
    /// External URL: a video platform link or a direct media URL.
    Remote { url: String },
    /// Uploaded file: raw bytes live in the blob store under `blob_key`.
    /// The original file name is kept for MIME inference.
    Local { blob_key: BlobKey, file_name: String },
}

impl VideoSource {
    pub fn is_local(&self) -> bool {
        matches!(self, VideoSource::Local { .. })
    }
}

// ---------------------------------------------------------------------------
// VideoRecord
// ---------------------------------------------------------------------------

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    /// Unique across the whole catalog, not just within a subject.
    pub id: VideoId,
    /// Display title, non-empty after trimming.
    pub title: String,
    /// Display description, non-empty after trimming.
    pub description: String,
    /// Remote or local media source.
    pub source: VideoSource,
    /// Display duration string, `"--"` when unknown.
    pub duration: String,
    /// Display date, set at creation and immutable thereafter.
    pub upload_date: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Mapping from subject to its ordered video list.
///
/// Insertion order within a subject is display order.  The map always
/// holds an entry for every known subject once [`Catalog::ensure_subjects`]
/// has run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    subjects: BTreeMap<Subject, Vec<VideoRecord>>,
}

impl Catalog {
    /// An empty catalog with a (possibly empty) list for every subject.
    pub fn empty() -> Self {
        let mut catalog = Catalog::default();
        catalog.ensure_subjects();
        catalog
    }

    /// Insert an empty list for any subject that has none.
    pub fn ensure_subjects(&mut self) {
        for subject in Subject::ALL {
            self.subjects.entry(subject).or_default();
        }
    }

    /// The ordered records for one subject; empty slice if absent.
    pub fn records(&self, subject: Subject) -> &[VideoRecord] {
        self.subjects.get(&subject).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a record to a subject, preserving insertion order.
    pub fn push(&mut self, subject: Subject, record: VideoRecord) {
        self.subjects.entry(subject).or_default().push(record);
    }

    /// Find a record by id within one subject.
    pub fn find(&self, subject: Subject, id: VideoId) -> Option<&VideoRecord> {
        self.records(subject).iter().find(|r| r.id == id)
    }

    /// Mutable lookup by id within one subject.
    pub fn find_mut(&mut self, subject: Subject, id: VideoId) -> Option<&mut VideoRecord> {
        self.subjects
            .get_mut(&subject)?
            .iter_mut()
            .find(|r| r.id == id)
    }

    /// Remove a record by id from one subject, returning it if present.
    pub fn remove(&mut self, subject: Subject, id: VideoId) -> Option<VideoRecord> {
        let records = self.subjects.get_mut(&subject)?;
        let index = records.iter().position(|r| r.id == id)?;
        Some(records.remove(index))
    }

    /// Iterate `(subject, records)` pairs in subject order.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, &[VideoRecord])> {
        self.subjects.iter().map(|(s, v)| (*s, v.as_slice()))
    }

    /// Iterate every record across all subjects.
    pub fn iter_records(&self) -> impl Iterator<Item = &VideoRecord> {
        self.subjects.values().flatten()
    }

    /// Total record count across all subjects.
    pub fn total(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }

    /// Highest id currently present, or 0 on an empty catalog.
    pub fn max_id(&self) -> i64 {
        self.iter_records().map(|r| r.id.0).max().unwrap_or(0)
    }

    /// Copy of this catalog with every `Local`-source record dropped.
    ///
    /// Used as the metadata-only fallback snapshot when the full snapshot
    /// exceeds the key/value store's capacity.
    pub fn without_local_records(&self) -> Catalog {
        let subjects = self
            .subjects
            .iter()
            .map(|(subject, records)| {
                let kept = records
                    .iter()
                    .filter(|r| !r.source.is_local())
                    .cloned()
                    .collect();
                (*subject, kept)
            })
            .collect();
        Catalog { subjects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(id: i64, title: &str) -> VideoRecord {
        VideoRecord {
            id: VideoId(id),
            title: title.to_string(),
            description: "desc".to_string(),
            source: VideoSource::Remote {
                url: "https://example.com/v.mp4".to_string(),
            },
            duration: "10".to_string(),
            upload_date: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn max_id_spans_subjects() {
        let mut catalog = Catalog::empty();
        catalog.push(Subject::Basics, remote(3, "a"));
        catalog.push(Subject::TajweedRules, remote(5, "b"));
        assert_eq!(catalog.max_id(), 5);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut catalog = Catalog::empty();
        catalog.push(Subject::Basics, remote(1, "a"));
        catalog.push(Subject::Basics, remote(2, "b"));
        catalog.push(Subject::Basics, remote(3, "c"));

        let removed = catalog.remove(Subject::Basics, VideoId(2)).unwrap();
        assert_eq!(removed.title, "b");

        let titles: Vec<_> = catalog
            .records(Subject::Basics)
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut catalog = Catalog::empty();
        catalog.push(Subject::Letters, remote(7, "letters"));

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("\"letters\""));

        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn without_local_records_keeps_remotes() {
        let mut catalog = Catalog::empty();
        catalog.push(Subject::Basics, remote(1, "remote"));
        catalog.push(
            Subject::Basics,
            VideoRecord {
                source: VideoSource::Local {
                    blob_key: maqra_shared::BlobKey(99),
                    file_name: "x.mp4".to_string(),
                },
                ..remote(2, "local")
            },
        );

        let slim = catalog.without_local_records();
        assert_eq!(slim.records(Subject::Basics).len(), 1);
        assert_eq!(slim.records(Subject::Basics)[0].title, "remote");
        // The in-memory original is untouched.
        assert_eq!(catalog.records(Subject::Basics).len(), 2);
    }
}
