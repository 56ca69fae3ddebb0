//! Soft-delete filtering.
//!
//! Deleted ids are persisted separately from the catalog snapshot because
//! the compiled-in defaults re-seed on every load; without this filter a
//! deleted default record would resurface.

use std::collections::HashSet;

use maqra_shared::VideoId;

use crate::models::Catalog;

/// Return a catalog with every record whose id is in `deleted` removed
/// from every subject, preserving order.  Linear in total record count.
pub fn apply_soft_deletes(catalog: &Catalog, deleted: &HashSet<VideoId>) -> Catalog {
    if deleted.is_empty() {
        return catalog.clone();
    }

    let mut filtered = Catalog::empty();
    for (subject, records) in catalog.iter() {
        for record in records {
            if !deleted.contains(&record.id) {
                filtered.push(subject, record.clone());
            }
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VideoRecord, VideoSource};
    use maqra_shared::Subject;

    fn record(id: i64) -> VideoRecord {
        VideoRecord {
            id: VideoId(id),
            title: format!("video {id}"),
            description: "desc".to_string(),
            source: VideoSource::Remote {
                url: "https://example.com/v".to_string(),
            },
            duration: "--".to_string(),
            upload_date: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn removes_ids_across_subjects() {
        let mut catalog = Catalog::empty();
        catalog.push(Subject::Basics, record(1));
        catalog.push(Subject::Basics, record(2));
        catalog.push(Subject::Letters, record(3));

        let deleted: HashSet<VideoId> = [VideoId(1), VideoId(3)].into_iter().collect();
        let filtered = apply_soft_deletes(&catalog, &deleted);

        assert_eq!(filtered.total(), 1);
        assert_eq!(filtered.records(Subject::Basics)[0].id, VideoId(2));
        assert!(filtered.records(Subject::Letters).is_empty());
    }

    #[test]
    fn empty_set_is_identity() {
        let mut catalog = Catalog::empty();
        catalog.push(Subject::Practice, record(9));

        let filtered = apply_soft_deletes(&catalog, &HashSet::new());
        assert_eq!(filtered, catalog);
    }

    #[test]
    fn order_within_subject_is_preserved() {
        let mut catalog = Catalog::empty();
        for id in [10, 20, 30, 40] {
            catalog.push(Subject::Advanced, record(id));
        }

        let deleted: HashSet<VideoId> = [VideoId(20)].into_iter().collect();
        let filtered = apply_soft_deletes(&catalog, &deleted);

        let ids: Vec<_> = filtered
            .records(Subject::Advanced)
            .iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, [10, 30, 40]);
    }
}
