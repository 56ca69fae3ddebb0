//! # maqra-shared
//!
//! Domain vocabulary shared between the catalog core and the UI layer:
//! subject taxonomy, id newtypes, application constants and media-format
//! helpers (MIME inference, embed-URL construction).

pub mod constants;
pub mod media;
pub mod types;

pub use types::{BlobKey, Subject, VideoId};
