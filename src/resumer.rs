//! Restores playback after a connectivity interruption.

use log::debug;
use serde::Serialize;

use crate::platform::PlayerSurface;
use crate::Result;

/// Last known playback state reported by the player
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub video_id: Option<String>,
    pub position_seconds: f32,
    pub is_playing: bool,
}

/// What `PlaybackResumer::resume` sent to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// No video was ever reported; nothing to restore
    Nothing,
    /// Reloaded at the last position and resumed playback
    Reloaded,
    /// Cued at the last position, left paused
    Cued,
}

#[derive(Debug, Default)]
pub struct PlaybackResumer {
    snapshot: PlaybackSnapshot,
}

impl PlaybackResumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a state change. Last write wins; nothing is validated.
    pub fn on_state_changed(&mut self, video_id: Option<String>, position_seconds: f32, is_playing: bool) {
        self.snapshot = PlaybackSnapshot {
            video_id,
            position_seconds,
            is_playing,
        };
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    /// Reissue commands so the player is back where it was before the drop.
    ///
    /// One shot: a failing command is returned to the caller as is.
    pub fn resume(&self, surface: &mut dyn PlayerSurface) -> Result<ResumeOutcome> {
        let Some(video_id) = self.snapshot.video_id.as_deref() else {
            debug!("Nothing to resume: no video reported yet");
            return Ok(ResumeOutcome::Nothing);
        };
        let position = self.snapshot.position_seconds;

        if self.snapshot.is_playing {
            debug!("Resuming {} at {}s (playing)", video_id, position);
            surface.load_video(video_id, position)?;
            surface.play()?;
            Ok(ResumeOutcome::Reloaded)
        } else {
            debug!("Resuming {} at {}s (paused)", video_id, position);
            surface.cue_video(video_id, position)?;
            Ok(ResumeOutcome::Cued)
        }
    }
}
