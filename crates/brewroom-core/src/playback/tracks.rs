use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicTrack {
    pub id: u32,
    pub title: String,
    pub artist: String,
    /// Display length, e.g. `"3:45"`.
    pub duration: String,
    /// Asset file stem; the audio lives at `<assets>/<filename>.mp3`.
    pub filename: String,
}

impl MusicTrack {
    fn new(id: u32, title: &str, artist: &str, duration: &str, filename: &str) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            duration: duration.into(),
            filename: filename.into(),
        }
    }

    /// The built-in jazz playlist.
    pub fn builtin() -> Vec<MusicTrack> {
        vec![
            Self::new(0, "Autumn Leaves", "Jazz Café", "3:45", "jazz1"),
            Self::new(1, "Rainy Day Jazz", "Coffee House", "4:12", "jazz2"),
            Self::new(2, "Smooth Evening", "Jazz Ensemble", "3:58", "jazz3"),
            Self::new(3, "Coffee Break", "Jazz Trio", "3:30", "jazz4"),
            Self::new(4, "Midnight Piano", "Jazz Piano", "4:05", "jazz5"),
            Self::new(5, "Café Ambience", "Smooth Jazz", "3:50", "jazz6"),
            Self::new(6, "Gentle Sax", "Jazz Quartet", "4:20", "jazz7"),
            Self::new(7, "Study Time", "Jazz Lounge", "3:40", "jazz8"),
            Self::new(8, "Cozy Night", "Jazz Club", "4:15", "jazz9"),
            Self::new(9, "Morning Jazz", "Coffee Jazz", "3:55", "jazz10"),
        ]
    }
}

/// Track list plus the directory their audio files live in.
#[derive(Debug, Clone)]
pub struct TrackLibrary {
    assets_dir: PathBuf,
    tracks: Vec<MusicTrack>,
}

impl TrackLibrary {
    pub fn new(assets_dir: impl Into<PathBuf>, tracks: Vec<MusicTrack>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            tracks,
        }
    }

    /// The built-in playlist served from `assets_dir`.
    pub fn builtin(assets_dir: impl Into<PathBuf>) -> Self {
        Self::new(assets_dir, MusicTrack::builtin())
    }

    pub fn tracks(&self) -> &[MusicTrack] {
        &self.tracks
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn get(&self, id: u32) -> Result<&MusicTrack, PlaybackError> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .ok_or(PlaybackError::UnknownTrack(id))
    }

    /// Path of the track's audio file, if it exists on disk.
    pub fn resolve(&self, track: &MusicTrack) -> Result<PathBuf, PlaybackError> {
        let path = self.assets_dir.join(format!("{}.mp3", track.filename));
        if path.is_file() {
            Ok(path)
        } else {
            Err(PlaybackError::MissingAsset {
                filename: track.filename.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_playlist() {
        let tracks = MusicTrack::builtin();
        assert_eq!(tracks.len(), 10);
        assert_eq!(tracks[0].title, "Autumn Leaves");
        assert_eq!(tracks[9].filename, "jazz10");
    }

    #[test]
    fn resolve_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let library = TrackLibrary::builtin(dir.path());
        let track = library.get(0).unwrap().clone();
        assert_eq!(
            library.resolve(&track),
            Err(PlaybackError::MissingAsset {
                filename: "jazz1".into()
            })
        );

        std::fs::write(dir.path().join("jazz1.mp3"), b"ID3").unwrap();
        assert_eq!(library.resolve(&track).unwrap(), dir.path().join("jazz1.mp3"));
    }

    #[test]
    fn unknown_track_id() {
        let library = TrackLibrary::builtin("/nonexistent");
        assert_eq!(library.get(42), Err(PlaybackError::UnknownTrack(42)));
    }
}
