/// KV key holding the full catalog snapshot (JSON map subject -> records)
pub const SNAPSHOT_KEY: &str = "catalog-snapshot-v1";

/// KV key holding the persisted soft-delete set (JSON array of ids)
pub const DELETED_IDS_KEY: &str = "deleted-video-ids";

/// Duration shown when none was supplied
pub const DEFAULT_DURATION: &str = "--";

/// Default admin password.  A plain string comparison, deliberately:
/// the gate keeps casual visitors out of the admin panel and is not a
/// security boundary.
pub const DEFAULT_ADMIN_PASSWORD: &str = "omar4664664664";

/// Per-value capacity limit of the key/value store (5 MiB), matching the
/// quota of the storage the snapshot format was designed for.
pub const MAX_KV_VALUE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum accepted upload size in bytes (50 MiB)
pub const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Privacy-friendly YouTube embed host
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed";

/// Query string appended to every embed URL
pub const YOUTUBE_EMBED_PARAMS: &str = "modestbranding=1&rel=0&controls=1&enablejsapi=0";
