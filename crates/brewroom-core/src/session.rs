//! Focus session orchestration.
//!
//! [`FocusSession`] owns the timer, the sticker collection and the playback
//! coordinator, plus the injected tick source and entitlement provider. Every
//! command takes `&mut self`, so all state changes are serialized through a
//! single owner.

use std::sync::Arc;

use chrono::Utc;

use crate::collection::{CollectionProgress, StickerCollection};
use crate::entitlement::EntitlementProvider;
use crate::error::{PlaybackError, SessionError};
use crate::events::Event;
use crate::playback::{AudioPlayer, PlaybackCoordinator};
use crate::timer::{BrewStage, SessionStatus, SessionTimer, TickSource};

pub struct FocusSession<P, T> {
    timer: SessionTimer,
    collection: StickerCollection,
    playback: PlaybackCoordinator<P>,
    entitlement: Arc<dyn EntitlementProvider>,
    ticker: T,
}

impl<P: AudioPlayer, T: TickSource> FocusSession<P, T> {
    pub fn new(
        timer: SessionTimer,
        collection: StickerCollection,
        playback: PlaybackCoordinator<P>,
        entitlement: Arc<dyn EntitlementProvider>,
        ticker: T,
    ) -> Self {
        Self {
            timer,
            collection,
            playback,
            entitlement,
            ticker,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.timer.status()
    }

    pub fn stage(&self) -> BrewStage {
        self.timer.stage()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.timer.remaining_secs()
    }

    pub fn collection_progress(&self) -> CollectionProgress {
        self.collection.progress()
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn collection(&self) -> &StickerCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut StickerCollection {
        &mut self.collection
    }

    pub fn playback(&self) -> &PlaybackCoordinator<P> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackCoordinator<P> {
        &mut self.playback
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let progress = self.collection.progress();
        Event::StateSnapshot {
            status: self.timer.status(),
            stage: self.timer.stage(),
            remaining_secs: self.timer.remaining_secs(),
            duration_secs: self.timer.duration_secs(),
            clock: self.timer.clock(),
            progress: self.timer.progress(),
            collected: progress.collected,
            catalog_size: progress.catalog_size,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the session length. Leaving a paused or finished session this
    /// way also silences its music.
    pub fn configure(&mut self, duration_secs: u64) -> Result<(), SessionError> {
        let previous = self.timer.status();
        self.timer.configure(duration_secs)?;
        if previous != SessionStatus::Idle {
            self.playback.on_stop();
        }
        Ok(())
    }

    /// Start from idle, resume from paused, or restart a completed session
    /// from its full duration. No-op while running.
    pub fn start(&mut self) -> Vec<Event> {
        if self.timer.status() == SessionStatus::Completed {
            self.timer.stop();
        }
        let from = self.timer.status();
        let Some(event) = self.timer.start() else {
            return Vec::new();
        };
        self.ticker.arm();

        let mut events = vec![event];
        let playback = match from {
            SessionStatus::Paused => self.playback.on_resume(),
            _ => self.playback.on_start(),
        };
        if let Err(e) = playback {
            events.push(playback_error(&e));
        }
        events
    }

    /// Pause a running session. The tick source is cancelled before the
    /// events are returned; from any other state nothing changes.
    pub fn pause(&mut self) -> Vec<Event> {
        match self.timer.pause() {
            Some(event) => {
                self.ticker.cancel();
                self.playback.on_pause();
                vec![event]
            }
            None => Vec::new(),
        }
    }

    pub fn stop(&mut self) -> Vec<Event> {
        self.ticker.cancel();
        let event = self.timer.stop();
        self.playback.on_stop();
        vec![event]
    }

    /// Apply one tick from the tick source.
    ///
    /// On completion the tick source is cancelled, a sticker is drawn with
    /// the entitlement as it stands right now, and playback is stopped.
    pub fn tick(&mut self) -> Option<Event> {
        let mut event = self.timer.tick()?;
        if let Event::SessionCompleted { drawn_item, .. } = &mut event {
            self.ticker.cancel();
            let premium = self.entitlement.is_premium_unlocked();
            *drawn_item = self.collection.draw_unclaimed(premium);
            self.playback.on_stop();
        }
        Some(event)
    }
}

fn playback_error(err: &PlaybackError) -> Event {
    Event::PlaybackError {
        message: err.to_string(),
        at: Utc::now(),
    }
}
