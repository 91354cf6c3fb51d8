//! Property tests for the session timer.

use brewroom_core::{BrewStage, Event, SessionConfig, SessionStatus, SessionTimer};
use proptest::prelude::*;

proptest! {
    #[test]
    fn completes_after_exactly_duration_ticks(duration in 1u64..2_000) {
        let mut timer = SessionTimer::new(SessionConfig::new(duration).unwrap());
        timer.start();
        for tick in 1..duration {
            let event = timer.tick();
            prop_assert!(!matches!(event, Some(Event::SessionCompleted { .. })), "early completion at {}", tick);
            prop_assert_eq!(timer.status(), SessionStatus::Running);
            prop_assert_eq!(timer.remaining_secs(), duration - tick);
        }
        let completed = matches!(timer.tick(), Some(Event::SessionCompleted { .. }));
        prop_assert!(completed);
        prop_assert_eq!(timer.status(), SessionStatus::Completed);
        prop_assert_eq!(timer.remaining_secs(), 0);
        prop_assert!(timer.tick().is_none());
    }

    #[test]
    fn stage_always_matches_derivation(duration in 4u64..1_000, ticks in 0u64..1_000) {
        let mut timer = SessionTimer::new(SessionConfig::new(duration).unwrap());
        timer.start();
        for _ in 0..ticks.min(duration - 1) {
            timer.tick();
        }
        prop_assert_eq!(
            timer.stage(),
            BrewStage::for_elapsed(duration, timer.remaining_secs())
        );
    }

    #[test]
    fn stages_never_go_backwards(duration in 1u64..500) {
        let mut timer = SessionTimer::new(SessionConfig::new(duration).unwrap());
        timer.start();
        let mut last = timer.stage().index();
        while timer.status() == SessionStatus::Running {
            if let Some(Event::StageChanged { from, to, .. }) = timer.tick() {
                prop_assert_eq!(from.index(), last);
                prop_assert!(to.index() > from.index());
                last = to.index();
            }
        }
    }

    #[test]
    fn pausing_never_loses_or_gains_time(duration in 2u64..300, pause_at in 1u64..300) {
        let pause_at = pause_at.min(duration - 1);
        let mut timer = SessionTimer::new(SessionConfig::new(duration).unwrap());
        timer.start();
        for _ in 0..pause_at {
            timer.tick();
        }
        timer.pause();
        for _ in 0..10 {
            timer.tick();
        }
        timer.start();
        prop_assert_eq!(timer.remaining_secs(), duration - pause_at);
        prop_assert_eq!(timer.stage(), BrewStage::for_elapsed(duration, timer.remaining_secs()));
    }
}
