use serde::{Deserialize, Serialize};

/// The closed set of catalog subjects.
///
/// Serialized as kebab-case slugs; these slugs double as the map keys of
/// the persisted catalog snapshot, so renaming a variant is a storage
/// format change.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Basics,
    Letters,
    TajweedRules,
    Stopping,
    Practice,
    Advanced,
}

impl Subject {
    /// All subjects, in display order.
    pub const ALL: [Subject; 6] = [
        Subject::Basics,
        Subject::Letters,
        Subject::TajweedRules,
        Subject::Stopping,
        Subject::Practice,
        Subject::Advanced,
    ];

    /// The kebab-case slug used in persisted snapshots and URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Subject::Basics => "basics",
            Subject::Letters => "letters",
            Subject::TajweedRules => "tajweed-rules",
            Subject::Stopping => "stopping",
            Subject::Practice => "practice",
            Subject::Advanced => "advanced",
        }
    }

    /// Parse a slug back into a subject.
    pub fn from_slug(s: &str) -> Option<Subject> {
        match s {
            "basics" => Some(Subject::Basics),
            "letters" => Some(Subject::Letters),
            "tajweed-rules" => Some(Subject::TajweedRules),
            "stopping" => Some(Subject::Stopping),
            "practice" => Some(Subject::Practice),
            "advanced" => Some(Subject::Advanced),
            _ => None,
        }
    }

    /// Arabic display label shown in section headers.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Basics => "أساسيات التجويد",
            Subject::Letters => "أحكام الحروف",
            Subject::TajweedRules => "أحكام التجويد",
            Subject::Stopping => "الوقف والابتداء",
            Subject::Practice => "التطبيق العملي",
            Subject::Advanced => "المستوى المتقدم",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Catalog-wide unique video identifier.
///
/// Small ids come from the max-scan allocator; uploads use the millisecond
/// clock. Both schemes only ever mint values strictly greater than the
/// current catalog maximum.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct VideoId(pub i64);

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key naming one object in the blob store.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct BlobKey(pub i64);

impl std::fmt::Display for BlobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
