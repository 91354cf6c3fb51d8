mod duration;
mod engine;
mod stage;
mod ticker;

pub use duration::{format_clock, SessionConfig, DEFAULT_DURATION_SECS, PRESET_MINUTES};
pub use engine::{SessionStatus, SessionTimer};
pub use stage::BrewStage;
pub use ticker::{IntervalTicker, ManualTicker, TickSource};
