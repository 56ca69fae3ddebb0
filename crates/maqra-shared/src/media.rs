//! Media-format helpers: MIME inference for uploaded files and embed-URL
//! construction for YouTube sources.

use crate::constants::{YOUTUBE_EMBED_BASE, YOUTUBE_EMBED_PARAMS};

/// Infer a video MIME type from a file name's extension.
///
/// Unknown or missing extensions fall back to `video/mp4`, which every
/// player we target can at least attempt.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();

    match ext.to_ascii_lowercase().as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        _ => "video/mp4",
    }
}

/// Extract a YouTube video id from a full watch link.
///
/// Accepts `youtube.com/watch?v=<id>` and `youtu.be/<id>` forms; anything
/// else (including a bare id pasted directly) is returned as-is when it
/// already looks like an id, otherwise `None`.
pub fn extract_youtube_id(input: &str) -> Option<String> {
    let input = input.trim();

    let candidate = if let Some(rest) = input.split("youtu.be/").nth(1) {
        take_id_chars(rest)
    } else if input.contains("youtube.com") {
        input
            .split("v=")
            .nth(1)
            .map(take_id_chars)
            .unwrap_or_default()
    } else {
        take_id_chars(input)
    };

    // YouTube ids are 11 characters; tolerate nothing shorter than 10.
    if candidate.len() >= 10 {
        Some(candidate)
    } else {
        None
    }
}

/// Whether a URL points at YouTube at all.
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Build the privacy-friendly embed URL for a YouTube video id.
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("{YOUTUBE_EMBED_BASE}/{video_id}?{YOUTUBE_EMBED_PARAMS}")
}

fn take_id_chars(s: &str) -> String {
    s.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
