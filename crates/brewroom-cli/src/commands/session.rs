use std::sync::Arc;

use brewroom_core::timer::format_clock;
use brewroom_core::{
    BrewStage, Config, Event, FocusSession, IntervalTicker, MusicPlayer, PlaybackCoordinator,
    SessionConfig, SessionTimer, StoredEntitlement, TrackLibrary,
};
use clap::Subcommand;
use serde::Serialize;

use super::{load_collection, open_store};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run a session in the foreground, printing events as JSON lines.
    /// Ctrl-C stops the session early.
    Run {
        /// Session length in minutes (defaults to the configured length)
        #[arg(long, conflicts_with = "preset")]
        minutes: Option<u64>,
        /// Extra seconds added to --minutes
        #[arg(long, requires = "minutes")]
        seconds: Option<u64>,
        /// Quick-pick preset in minutes (25, 45 or 60)
        #[arg(long)]
        preset: Option<u64>,
        /// Track id to loop during the session (overrides config)
        #[arg(long)]
        track: Option<u32>,
    },
    /// Show when each brewing stage begins for a session length
    Stages {
        /// Session length in minutes
        #[arg(long, default_value_t = 25)]
        minutes: u64,
        /// Extra seconds
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },
}

#[derive(Serialize)]
struct StageRow {
    stage: BrewStage,
    label: &'static str,
    animation: &'static str,
    starts_at_secs: u64,
    /// Countdown display at the moment the stage begins.
    clock: String,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Run {
            minutes,
            seconds,
            preset,
            track,
        } => {
            let config = Config::load()?;
            let session_config = match (minutes, preset) {
                (Some(m), _) => SessionConfig::from_minutes_seconds(m, seconds.unwrap_or(0))?,
                (None, Some(p)) => SessionConfig::preset(p)?,
                (None, None) => config.session_config()?,
            };
            let track = track.or(config.playback.selected_track);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_session(config, session_config, track))?;
        }
        SessionAction::Stages { minutes, seconds } => {
            let duration = SessionConfig::from_minutes_seconds(minutes, seconds)?.duration_secs();
            let rows: Vec<StageRow> = BrewStage::ALL
                .iter()
                .map(|&stage| {
                    let starts_at_secs = stage.starts_at(duration);
                    StageRow {
                        stage,
                        label: stage.label(),
                        animation: stage.animation_name(),
                        starts_at_secs,
                        clock: format_clock(duration - starts_at_secs),
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

async fn run_session(
    config: Config,
    session_config: SessionConfig,
    track: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let collection = load_collection(&config, store.clone());
    let player = MusicPlayer::new(TrackLibrary::builtin(config.assets_dir()))
        .with_preview_window(config.playback.preview_window_secs);
    let playback = PlaybackCoordinator::new(player).with_track(track);
    let entitlement = Arc::new(StoredEntitlement::new(store));

    let mut session = FocusSession::new(
        SessionTimer::new(session_config),
        collection,
        playback,
        entitlement,
        IntervalTicker::every_second(),
    );

    tracing::info!(
        duration_secs = session_config.duration_secs(),
        ?track,
        "running focus session"
    );
    for event in session.start() {
        emit(&event)?;
    }

    loop {
        tokio::select! {
            _ = session.ticker_mut().next_tick() => {
                if let Some(event) = session.tick() {
                    emit(&event)?;
                    if matches!(event, Event::SessionCompleted { .. }) {
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                for event in session.stop() {
                    emit(&event)?;
                }
                break;
            }
        }
    }

    emit(&session.snapshot())?;
    Ok(())
}

fn emit(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
