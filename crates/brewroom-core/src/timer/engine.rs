//! Session timer implementation.
//!
//! The timer is a tick-driven state machine. It does not use internal
//! threads or read the wall clock - the caller delivers one `tick()` per
//! elapsed second through a tick source.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           +-> Completed
//! (any) -stop-> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(SessionConfig::default());
//! timer.start();
//! // Once per second:
//! timer.tick(); // Some(Event) on stage change or completion
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::duration::{format_clock, SessionConfig};
use super::stage::BrewStage;
use crate::error::SessionError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Countdown state machine for a single focus session.
///
/// Owns `SessionState` exclusively; every mutation goes through the
/// command methods below. Deserialization validates the countdown against
/// the status and rederives the stage, so a restored timer obeys the same
/// invariants as a live one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTimer")]
pub struct SessionTimer {
    config: SessionConfig,
    status: SessionStatus,
    remaining_secs: u64,
    stage: BrewStage,
}

impl SessionTimer {
    /// Create an idle timer with the full duration remaining.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            status: SessionStatus::Idle,
            remaining_secs: config.duration_secs(),
            stage: BrewStage::Grinding,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn stage(&self) -> BrewStage {
        self.stage
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.config.duration_secs()
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs().saturating_sub(self.remaining_secs)
    }

    /// Fraction of the session still remaining: 1.0 at start, 0.0 at completion.
    pub fn progress(&self) -> f64 {
        // SessionConfig guarantees a non-zero duration.
        self.remaining_secs as f64 / self.duration_secs() as f64
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the session duration and return to `Idle`.
    ///
    /// # Errors
    /// `InvalidConfig` for a zero duration, `SessionRunning` while counting down.
    pub fn configure(&mut self, duration_secs: u64) -> Result<(), SessionError> {
        if self.status == SessionStatus::Running {
            return Err(SessionError::SessionRunning);
        }
        self.config = SessionConfig::new(duration_secs)?;
        self.status = SessionStatus::Idle;
        self.remaining_secs = duration_secs;
        self.stage = BrewStage::Grinding;
        tracing::debug!("session configured for {}", format_clock(duration_secs));
        Ok(())
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.status {
            SessionStatus::Idle => {
                self.status = SessionStatus::Running;
                self.stage = BrewStage::Grinding;
                Some(Event::SessionStarted {
                    duration_secs: self.duration_secs(),
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            SessionStatus::Paused => {
                self.status = SessionStatus::Running;
                Some(Event::SessionResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            // Already running, or finished and waiting for stop/configure.
            SessionStatus::Running | SessionStatus::Completed => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.status {
            SessionStatus::Running => {
                self.status = SessionStatus::Paused;
                Some(Event::SessionPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Return to `Idle` with the last configured duration. Valid from any state.
    pub fn stop(&mut self) -> Event {
        self.status = SessionStatus::Idle;
        self.remaining_secs = self.duration_secs();
        self.stage = BrewStage::Grinding;
        Event::SessionStopped {
            duration_secs: self.duration_secs(),
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `SessionCompleted` (with no drawn item yet) when the countdown
    /// reaches zero, `StageChanged` on a stage transition, `None` otherwise.
    pub fn tick(&mut self) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = SessionStatus::Completed;
            tracing::debug!("session completed after {}s", self.duration_secs());
            return Some(Event::SessionCompleted {
                duration_secs: self.duration_secs(),
                drawn_item: None,
                at: Utc::now(),
            });
        }

        let next = BrewStage::for_elapsed(self.duration_secs(), self.remaining_secs);
        if next == self.stage {
            return None;
        }
        let from = std::mem::replace(&mut self.stage, next);
        tracing::debug!(
            "changing stage from {} to {} at {}/{}",
            from,
            next,
            self.elapsed_secs(),
            self.duration_secs()
        );
        Some(Event::StageChanged {
            from,
            to: next,
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        })
    }
}

/// Persisted timer fields, before validation. The stored stage is ignored.
#[derive(Deserialize)]
struct RawTimer {
    config: SessionConfig,
    status: SessionStatus,
    remaining_secs: u64,
}

impl TryFrom<RawTimer> for SessionTimer {
    type Error = SessionError;

    fn try_from(raw: RawTimer) -> Result<Self, Self::Error> {
        let duration = raw.config.duration_secs();
        let remaining = raw.remaining_secs;
        let invalid = |reason: String| Err(SessionError::InvalidState(reason));

        if remaining > duration {
            return invalid(format!("{remaining}s remaining exceeds {duration}s duration"));
        }
        match raw.status {
            SessionStatus::Idle if remaining != duration => {
                return invalid(format!("idle with {remaining}s of {duration}s remaining"));
            }
            SessionStatus::Running | SessionStatus::Paused if remaining == 0 => {
                return invalid(format!("{:?} with no time remaining", raw.status));
            }
            SessionStatus::Completed if remaining != 0 => {
                return invalid(format!("completed with {remaining}s remaining"));
            }
            _ => {}
        }

        Ok(Self {
            config: raw.config,
            status: raw.status,
            remaining_secs: remaining,
            stage: stage_at(duration, remaining),
        })
    }
}

/// The stage a live timer holds at `remaining` seconds.
///
/// Grinding until the first tick; the completing tick keeps the stage of
/// the last second.
fn stage_at(duration_secs: u64, remaining_secs: u64) -> BrewStage {
    let remaining = remaining_secs.max(1);
    if remaining >= duration_secs {
        return BrewStage::Grinding;
    }
    BrewStage::for_elapsed(duration_secs, remaining)
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
