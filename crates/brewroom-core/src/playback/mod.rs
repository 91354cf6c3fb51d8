//! Background music: playback modes, the player interface, and the policy
//! that ties player directives to session transitions.

mod coordinator;
mod player;
mod tracks;

pub use coordinator::PlaybackCoordinator;
pub use player::MusicPlayer;
pub use tracks::{MusicTrack, TrackLibrary};

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// How long preview playback runs before stopping on its own.
pub const DEFAULT_PREVIEW_WINDOW_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Browsing outside a session: playback auto-stops after the preview window.
    #[default]
    Preview,
    /// During a session: the track repeats until explicitly stopped.
    Loop,
}

impl PlaybackMode {
    pub fn is_looping(self) -> bool {
        self == PlaybackMode::Loop
    }
}

/// Audio player collaborator driven by [`PlaybackCoordinator`].
///
/// The preview auto-stop timer belongs to the implementation.
pub trait AudioPlayer {
    fn set_mode(&mut self, mode: PlaybackMode);

    fn play(&mut self, track_id: u32) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn stop(&mut self);
}

impl<P: AudioPlayer + ?Sized> AudioPlayer for Box<P> {
    fn set_mode(&mut self, mode: PlaybackMode) {
        (**self).set_mode(mode)
    }

    fn play(&mut self, track_id: u32) -> Result<(), PlaybackError> {
        (**self).play(track_id)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
