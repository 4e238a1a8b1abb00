//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platform insertion order)
//! - No rendering, timing, or I/O dependencies

pub mod collision;
pub mod platforms;
pub mod scroll;
pub mod state;
pub mod tick;

pub use collision::{Bounce, resolve_bounce};
pub use platforms::PlatformField;
pub use scroll::{ScrollState, scroll_step};
pub use state::{
    Character, GameState, Platform, PlatformKind, PlatformView, RunOutcome, RunPhase, Snapshot,
};
pub use tick::{TickInput, tick};
