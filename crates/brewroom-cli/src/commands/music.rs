use brewroom_core::{Config, MusicTrack, TrackLibrary};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum MusicAction {
    /// List the built-in tracks and whether their audio is installed
    List,
    /// Resolve the audio file for a track
    Locate {
        /// Track id
        id: u32,
    },
}

#[derive(Serialize)]
struct TrackRow<'a> {
    #[serde(flatten)]
    track: &'a MusicTrack,
    available: bool,
}

pub fn run(action: MusicAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let library = TrackLibrary::builtin(config.assets_dir());

    match action {
        MusicAction::List => {
            let rows: Vec<TrackRow> = library
                .tracks()
                .iter()
                .map(|track| TrackRow {
                    track,
                    available: library.resolve(track).is_ok(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        MusicAction::Locate { id } => {
            let track = library.get(id)?;
            let path = library.resolve(track)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
