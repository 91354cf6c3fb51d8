use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Default session length: one classic 25 minute focus block.
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;

/// Quick-pick session lengths, in minutes.
pub const PRESET_MINUTES: [u64; 3] = [25, 45, 60];

/// Immutable per-session configuration.
///
/// Serialized as the bare duration in seconds; deserializing a zero fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SessionConfig {
    duration_secs: u64,
}

impl SessionConfig {
    /// # Errors
    /// Returns `SessionError::InvalidConfig` for a zero duration.
    pub fn new(duration_secs: u64) -> Result<Self, SessionError> {
        if duration_secs == 0 {
            return Err(SessionError::InvalidConfig { duration_secs });
        }
        Ok(Self { duration_secs })
    }

    /// Build from a minutes/seconds picker pair. `0:00` is rejected.
    ///
    /// Uses saturating arithmetic so absurd minute values cannot overflow.
    pub fn from_minutes_seconds(minutes: u64, seconds: u64) -> Result<Self, SessionError> {
        Self::new(minutes.saturating_mul(60).saturating_add(seconds))
    }

    pub fn preset(minutes: u64) -> Result<Self, SessionError> {
        Self::from_minutes_seconds(minutes, 0)
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Split back into the picker's (minutes, seconds) pair.
    pub fn minutes_seconds(&self) -> (u64, u64) {
        (self.duration_secs / 60, self.duration_secs % 60)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl TryFrom<u64> for SessionConfig {
    type Error = SessionError;

    fn try_from(duration_secs: u64) -> Result<Self, Self::Error> {
        Self::new(duration_secs)
    }
}

impl From<SessionConfig> for u64 {
    fn from(config: SessionConfig) -> Self {
        config.duration_secs
    }
}

/// Format seconds as a zero-padded `MM:SS` clock.
///
/// Minutes are not wrapped into hours; 90 minutes renders as `90:00`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
