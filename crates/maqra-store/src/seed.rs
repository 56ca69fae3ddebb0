//! Compiled-in default catalog.
//!
//! Seeded on every start; a persisted snapshot, once one exists, fully
//! supersedes this dataset.  Deletions of seeded records are remembered
//! by the soft-delete set precisely because this data keeps coming back.

use chrono::Utc;

use maqra_shared::{Subject, VideoId};

use crate::models::{Catalog, VideoRecord, VideoSource};

/// Build the default catalog, with every subject present.
pub fn default_catalog() -> Catalog {
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let mut catalog = Catalog::empty();

    catalog.push(
        Subject::Basics,
        VideoRecord {
            id: VideoId(1),
            title: "مقدمة في التجويد".to_string(),
            description: "شرح شامل لمقدمة التجويد والقواعد الأساسية للبدء في رحلة التجويد الصحيح"
                .to_string(),
            source: VideoSource::Remote {
                url: "https://media.maqra.example/lessons/intro-tajweed.mp4".to_string(),
            },
            duration: "20".to_string(),
            upload_date: today.clone(),
        },
    );

    catalog.push(
        Subject::Basics,
        VideoRecord {
            id: VideoId(3),
            title: "أساسيات النطق الصحيح".to_string(),
            description: "دروس في أساسيات نطق الحروف والكلمات بشكل صحيح".to_string(),
            source: VideoSource::Remote {
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            },
            duration: "22".to_string(),
            upload_date: today.clone(),
        },
    );

    catalog.push(
        Subject::Letters,
        VideoRecord {
            id: VideoId(2),
            title: "أحكام الحروف الأساسية".to_string(),
            description: "تعلم كيفية نطق الحروف بشكل صحيح وفقاً لأحكام التجويد".to_string(),
            source: VideoSource::Remote {
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            },
            duration: "25".to_string(),
            upload_date: today.clone(),
        },
    );

    catalog.push(
        Subject::TajweedRules,
        VideoRecord {
            id: VideoId(5),
            title: "أحكام النون الساكنة".to_string(),
            description: "شرح مفصل لأحكام النون الساكنة والتنوين".to_string(),
            source: VideoSource::Remote {
                url: "https://media.maqra.example/lessons/noon-sakinah.mp4".to_string(),
            },
            duration: "30".to_string(),
            upload_date: today,
        },
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subject_is_present() {
        let catalog = default_catalog();
        for subject in Subject::ALL {
            // records() never fails, but the key itself must exist too.
            assert!(catalog.iter().any(|(s, _)| s == subject));
        }
    }

    #[test]
    fn seeded_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter_records().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.total());
        assert_eq!(catalog.max_id(), 5);
    }
}
