use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::CollectibleItem;
use crate::timer::{BrewStage, SessionStatus};

/// Every state change in a session produces an Event.
/// The host renders them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Emitted only when the derived stage actually changes.
    StageChanged {
        from: BrewStage,
        to: BrewStage,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. `drawn_item` is `None` when nothing was
    /// left to unlock, so the host can skip the unlock notification.
    SessionCompleted {
        duration_secs: u64,
        drawn_item: Option<CollectibleItem>,
        at: DateTime<Utc>,
    },
    /// Relayed from the audio player; the session keeps running.
    PlaybackError {
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: SessionStatus,
        stage: BrewStage,
        remaining_secs: u64,
        duration_secs: u64,
        clock: String,
        progress: f64,
        collected: usize,
        catalog_size: usize,
        at: DateTime<Utc>,
    },
}
