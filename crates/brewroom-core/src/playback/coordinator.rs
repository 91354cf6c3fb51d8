use super::{AudioPlayer, PlaybackMode};
use crate::error::PlaybackError;

/// Translates session transitions into player directives.
///
/// Holds no session state of its own; the only thing it remembers is which
/// track the user picked for sessions.
#[derive(Debug)]
pub struct PlaybackCoordinator<P> {
    player: P,
    selected_track: Option<u32>,
}

impl<P: AudioPlayer> PlaybackCoordinator<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            selected_track: None,
        }
    }

    pub fn with_track(mut self, track_id: Option<u32>) -> Self {
        self.selected_track = track_id;
        self
    }

    pub fn select_track(&mut self, track_id: Option<u32>) {
        self.selected_track = track_id;
    }

    pub fn selected_track(&self) -> Option<u32> {
        self.selected_track
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Session started from idle: loop the selected track.
    pub fn on_start(&mut self) -> Result<(), PlaybackError> {
        self.player.set_mode(PlaybackMode::Loop);
        self.play_selected()
    }

    /// Session resumed after a pause: same directives as a fresh start.
    pub fn on_resume(&mut self) -> Result<(), PlaybackError> {
        self.on_start()
    }

    pub fn on_pause(&mut self) {
        self.player.pause();
    }

    /// Session stopped or completed: back to preview mode, silence.
    pub fn on_stop(&mut self) {
        self.player.set_mode(PlaybackMode::Preview);
        self.player.stop();
    }

    fn play_selected(&mut self) -> Result<(), PlaybackError> {
        match self.selected_track {
            Some(track_id) => self.player.play(track_id),
            None => Ok(()),
        }
    }
}
