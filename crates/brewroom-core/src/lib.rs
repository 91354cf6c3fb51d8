//! # Brewroom Core Library
//!
//! This library provides the session/reward engine behind the Brewroom
//! coffee-themed focus timer. Everything a host needs to run a session is
//! here; screens, animation and audio output stay in the host.
//!
//! ## Architecture
//!
//! - **Session Timer**: A tick-driven countdown state machine whose four
//!   brewing stages are derived from elapsed time
//! - **Sticker Collection**: Persisted collectible catalog with a uniform
//!   draw over unclaimed items, gated by a premium entitlement
//! - **Playback**: Policy that switches background music between preview
//!   and loop mode as sessions start and stop
//! - **Storage**: SQLite key-value persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`FocusSession`]: Composition root wiring the pieces together
//! - [`SessionTimer`]: Core timer state machine
//! - [`StickerCollection`]: Collection state and unlock draw
//! - [`PlaybackCoordinator`]: Session-to-playback directive policy
//! - [`Database`]: Persistence store
//! - [`Config`]: Application configuration management

pub mod collection;
pub mod entitlement;
pub mod error;
pub mod events;
pub mod playback;
pub mod session;
pub mod storage;
pub mod timer;

pub use collection::{Catalog, CollectibleItem, CollectionProgress, StickerCollection};
pub use entitlement::{EntitlementProvider, StoredEntitlement};
pub use error::{ConfigError, CoreError, PlaybackError, SessionError, StoreError};
pub use events::Event;
pub use playback::{AudioPlayer, MusicPlayer, MusicTrack, PlaybackCoordinator, PlaybackMode, TrackLibrary};
pub use session::FocusSession;
pub use storage::{Config, Database, MemoryStore, PersistenceStore};
pub use timer::{
    BrewStage, IntervalTicker, ManualTicker, SessionConfig, SessionStatus, SessionTimer,
    TickSource,
};
