//! Sky Hop - an endless vertical platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, platform field)
//! - `runner`: Cooperative game loop driving two independent cadences
//! - `ledger`: Encrypted score submission via external collaborators
//! - `highscores`: Session leaderboard
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod ledger;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use runner::{GameLoop, InputSource, Pulse, RunToken};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Viewport width in world units
    pub const GAME_WIDTH: f32 = 400.0;
    /// Viewport height; a character that falls past it ends the run
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Square character sprite edge length
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Platform footprint
    pub const PLATFORM_WIDTH: f32 = 64.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;

    /// Physics cadence (50 Hz fixed tick)
    pub const TICK_MS: u64 = 20;
    /// Scroll controller cadence, independent of the physics tick
    pub const SCROLL_INTERVAL_MS: u64 = 1000;
    /// Scroll distance worth one score point
    pub const SCORE_DIVISOR: f32 = 10.0;

    /// Maximum physics ticks replayed per advance to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;
}
