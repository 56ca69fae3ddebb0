//! Volatile session state: the admin elevation flag and the active
//! playback slot.  Nothing here survives a restart.

use crate::playback::Playback;

/// Per-process session state.
///
/// Elevation is a plain string comparison against a fixed secret.  No
/// lockout, no rate limiting, no hashing: this gate keeps casual visitors
/// out of the admin panel and is explicitly not a security boundary.
pub struct Session {
    secret: String,
    elevated: bool,
    active_playback: Option<Playback>,
}

impl Session {
    /// New session with the given admin secret; starts non-elevated.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            elevated: false,
            active_playback: None,
        }
    }

    /// Compare `password` against the secret; elevate on match.
    ///
    /// Returns whether the password matched.  A failed attempt never
    /// changes the flag.
    pub fn attempt_elevate(&mut self, password: &str) -> bool {
        if password == self.secret {
            self.elevated = true;
            tracing::info!("session elevated");
            true
        } else {
            tracing::warn!("failed elevation attempt");
            false
        }
    }

    /// Drop elevation unconditionally.
    pub fn revoke(&mut self) {
        self.elevated = false;
    }

    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Acquire the playback slot, replacing whatever was playing.
    pub fn begin_playback(&mut self, playback: Playback) {
        self.active_playback = Some(playback);
    }

    /// Release the playback slot, returning the playback that was active.
    pub fn end_playback(&mut self) -> Option<Playback> {
        self.active_playback.take()
    }

    pub fn active_playback(&self) -> Option<&Playback> {
        self.active_playback.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_flow() {
        let mut session = Session::new("secret");

        assert!(!session.is_elevated());
        assert!(!session.attempt_elevate("wrong"));
        assert!(!session.is_elevated());

        assert!(session.attempt_elevate("secret"));
        assert!(session.is_elevated());

        session.revoke();
        assert!(!session.is_elevated());
    }

    #[test]
    fn playback_slot_is_replace_and_release() {
        use crate::playback::{Playback, PlaybackSource};
        use maqra_shared::VideoId;

        let mut session = Session::new("secret");
        assert!(session.active_playback().is_none());

        let playback = Playback {
            id: VideoId(1),
            title: "t".to_string(),
            description: "d".to_string(),
            source: PlaybackSource::Direct {
                url: "https://example.com/v.mp4".to_string(),
            },
        };

        session.begin_playback(playback.clone());
        assert_eq!(session.active_playback(), Some(&playback));

        let released = session.end_playback();
        assert_eq!(released, Some(playback));
        assert!(session.active_playback().is_none());
    }
}
