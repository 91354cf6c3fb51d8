//! Headless music player.
//!
//! Tracks what is loaded and whether it is playing, enforces the preview
//! window on a logical clock, and validates that track assets exist. Audio
//! output itself belongs to the platform layer.

use std::path::PathBuf;

use super::tracks::{MusicTrack, TrackLibrary};
use super::{AudioPlayer, PlaybackMode, DEFAULT_PREVIEW_WINDOW_SECS};
use crate::error::PlaybackError;

#[derive(Debug, Clone)]
pub struct MusicPlayer {
    library: TrackLibrary,
    mode: PlaybackMode,
    preview_window_secs: u64,
    current: Option<MusicTrack>,
    source: Option<PathBuf>,
    is_playing: bool,
    /// Seconds left before preview playback stops itself.
    preview_remaining: Option<u64>,
    last_error: Option<PlaybackError>,
}

impl MusicPlayer {
    pub fn new(library: TrackLibrary) -> Self {
        Self {
            library,
            mode: PlaybackMode::Preview,
            preview_window_secs: DEFAULT_PREVIEW_WINDOW_SECS,
            current: None,
            source: None,
            is_playing: false,
            preview_remaining: None,
            last_error: None,
        }
    }

    pub fn with_preview_window(mut self, secs: u64) -> Self {
        self.preview_window_secs = secs;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn library(&self) -> &TrackLibrary {
        &self.library
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn current_track(&self) -> Option<&MusicTrack> {
        self.current.as_ref()
    }

    /// Audio file backing the loaded track, while one is loaded.
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn preview_remaining(&self) -> Option<u64> {
        self.preview_remaining
    }

    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    /// Take the last error so the host shows it once.
    pub fn take_error(&mut self) -> Option<PlaybackError> {
        self.last_error.take()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Browse-list behaviour: tapping the loaded track toggles pause/play,
    /// tapping another track stops the current one and starts the new one.
    pub fn toggle_play(&mut self, track_id: u32) -> Result<(), PlaybackError> {
        let same_track = self.current.as_ref().is_some_and(|t| t.id == track_id);
        if same_track && self.is_playing {
            self.pause();
            return Ok(());
        }
        if !same_track {
            self.stop();
        }
        self.play(track_id)
    }

    /// Advance the preview clock. Returns `true` if playback stopped because
    /// the preview window ran out.
    pub fn advance(&mut self, secs: u64) -> bool {
        if !self.is_playing {
            return false;
        }
        let Some(remaining) = self.preview_remaining else {
            return false;
        };
        let remaining = remaining.saturating_sub(secs);
        if remaining == 0 {
            tracing::debug!("preview window elapsed");
            self.pause();
            return true;
        }
        self.preview_remaining = Some(remaining);
        false
    }

    fn fail(&mut self, err: PlaybackError) -> PlaybackError {
        tracing::error!("{}", err);
        self.is_playing = false;
        self.preview_remaining = None;
        self.last_error = Some(err.clone());
        err
    }
}

impl AudioPlayer for MusicPlayer {
    fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
        if mode.is_looping() {
            self.preview_remaining = None;
        }
    }

    /// Load `track_id` and play it from the start.
    fn play(&mut self, track_id: u32) -> Result<(), PlaybackError> {
        let track = match self.library.get(track_id).cloned() {
            Ok(track) => track,
            Err(e) => return Err(self.fail(e)),
        };
        let path = match self.library.resolve(&track) {
            Ok(path) => path,
            Err(e) => {
                self.current = Some(track);
                self.source = None;
                return Err(self.fail(e));
            }
        };

        tracing::debug!(
            "playing {} ({}) in {:?} mode",
            track.title,
            path.display(),
            self.mode
        );
        self.current = Some(track);
        self.source = Some(path);
        self.is_playing = true;
        self.last_error = None;
        self.preview_remaining = match self.mode {
            PlaybackMode::Preview => Some(self.preview_window_secs),
            PlaybackMode::Loop => None,
        };
        Ok(())
    }

    fn pause(&mut self) {
        self.is_playing = false;
        self.preview_remaining = None;
    }

    /// Stop and unload the audio. The track stays selected.
    fn stop(&mut self) {
        self.is_playing = false;
        self.preview_remaining = None;
        self.source = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn player_with_assets(files: &[&str]) -> (TempDir, MusicPlayer) {
        let dir = tempfile::tempdir().unwrap();
        for f in files {
            std::fs::write(dir.path().join(format!("{f}.mp3")), b"ID3").unwrap();
        }
        let player = MusicPlayer::new(TrackLibrary::builtin(dir.path()));
        (dir, player)
    }

    #[test]
    fn preview_stops_after_window() {
        let (_dir, mut player) = player_with_assets(&["jazz1"]);
        player.play(0).unwrap();
        assert!(player.is_playing());
        assert_eq!(player.preview_remaining(), Some(15));

        assert!(!player.advance(14));
        assert!(player.is_playing());
        assert!(player.advance(1));
        assert!(!player.is_playing());
        assert!(!player.advance(1));
    }

    #[test]
    fn loop_mode_never_auto_stops() {
        let (_dir, mut player) = player_with_assets(&["jazz1"]);
        player.set_mode(PlaybackMode::Loop);
        player.play(0).unwrap();
        assert!(player.preview_remaining().is_none());
        assert!(!player.advance(3600));
        assert!(player.is_playing());
    }

    #[test]
    fn switching_to_loop_cancels_preview_countdown() {
        let (_dir, mut player) = player_with_assets(&["jazz1"]);
        player.play(0).unwrap();
        player.set_mode(PlaybackMode::Loop);
        assert!(!player.advance(60));
        assert!(player.is_playing());
    }

    #[test]
    fn missing_asset_is_reported() {
        let (_dir, mut player) = player_with_assets(&[]);
        let err = player.play(2).unwrap_err();
        assert_eq!(
            err,
            PlaybackError::MissingAsset {
                filename: "jazz3".into()
            }
        );
        assert!(!player.is_playing());
        assert_eq!(player.last_error(), Some(&err));
        assert_eq!(player.take_error(), Some(err));
        assert!(player.last_error().is_none());
    }

    #[test]
    fn toggle_play_semantics() {
        let (_dir, mut player) = player_with_assets(&["jazz1", "jazz2"]);
        player.toggle_play(0).unwrap();
        assert!(player.is_playing());
        player.toggle_play(0).unwrap();
        assert!(!player.is_playing());
        player.toggle_play(0).unwrap();
        assert!(player.is_playing());

        player.toggle_play(1).unwrap();
        assert!(player.is_playing());
        assert_eq!(player.current_track().unwrap().id, 1);
    }

    #[test]
    fn stop_keeps_selection_but_unloads() {
        let (_dir, mut player) = player_with_assets(&["jazz1"]);
        player.play(0).unwrap();
        assert!(player.source().is_some());
        player.stop();
        assert!(!player.is_playing());
        assert!(player.source().is_none());
        assert_eq!(player.current_track().unwrap().id, 0);
    }

    #[test]
    fn custom_preview_window() {
        let (_dir, player) = player_with_assets(&["jazz1"]);
        let mut player = player.with_preview_window(5);
        player.play(0).unwrap();
        assert!(player.advance(5));
    }
}
