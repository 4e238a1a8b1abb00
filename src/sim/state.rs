//! Game state and core simulation types
//!
//! Two coordinate frames meet here. The character and all collision math live
//! in viewport coordinates (y grows downward, positive vertical velocity means
//! falling). The platform field and the scroll offset live on an altitude axis
//! that grows upward from the starting floor; `Platform::viewport_y` converts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

use super::platforms::PlatformField;
use super::scroll::ScrollState;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run in progress
    Idle,
    /// Active gameplay; both periodic tasks advance state
    Running,
    /// Run ended; terminal until a new run is started
    GameOver,
}

/// Platform behavior variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    /// Drifts sideways each tick, reversing at the viewport edges
    Oscillating { dir: f32 },
    /// Vanishes after its first bounce
    Breakable,
}

/// A platform in the live field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Left edge in viewport x
    pub x: f32,
    /// Height above the starting floor; grows with ascent
    pub altitude: f32,
    pub kind: PlatformKind,
}

impl Platform {
    /// Top edge in viewport coordinates at the given scroll offset
    #[inline]
    pub fn viewport_y(&self, scroll_offset: f32) -> f32 {
        GAME_HEIGHT - (self.altitude - scroll_offset)
    }

    /// Horizontal footprint overlap with a character at `x`
    #[inline]
    pub fn overlaps_x(&self, x: f32) -> bool {
        x + PLAYER_SIZE > self.x && x < self.x + PLATFORM_WIDTH
    }
}

/// The player-controlled character
///
/// `pos.y` is the foot line: the character occupies
/// `[pos.x, pos.x + PLAYER_SIZE] x [pos.y - PLAYER_SIZE, pos.y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub pos: Vec2,
    /// Vertical velocity; positive while falling
    pub vy: f32,
}

impl Character {
    /// Initial spawn: horizontally centered, standing height above the floor
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new((GAME_WIDTH - PLAYER_SIZE) / 2.0, GAME_HEIGHT - 200.0),
            vy: 0.0,
        }
    }
}

/// Terminal result of one run, captured exactly once at game-over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub score: u64,
    pub ticks: u64,
}

/// Complete simulation state for one run
///
/// Owned by the active run's `GameLoop`; the scheduled callbacks are the only
/// writers, readers take a `Snapshot`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub player: Character,
    /// Live platform set, exclusively owned by the generator
    pub field: PlatformField,
    pub scroll: ScrollState,
    /// Physics tick counter
    pub ticks: u64,
    /// Set once at the `Running -> GameOver` transition
    pub outcome: Option<RunOutcome>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh state in `Idle`: spawn position, zero scroll, one seed platform
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Character::spawn();
        // Seed platform directly under the spawn; the generator extends from it
        let start = Platform {
            x: player.pos.x + (PLAYER_SIZE - PLATFORM_WIDTH) / 2.0,
            altitude: GAME_HEIGHT - player.pos.y,
            kind: PlatformKind::Static,
        };
        Self {
            seed,
            tuning,
            phase: RunPhase::Idle,
            player,
            field: PlatformField::seeded(start),
            scroll: ScrollState::default(),
            ticks: 0,
            outcome: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current score, a pure function of scroll distance
    pub fn score(&self) -> u64 {
        self.scroll.score()
    }

    /// End the run, capturing the outcome if not already captured
    pub(crate) fn finish(&mut self) {
        self.phase = RunPhase::GameOver;
        if self.outcome.is_none() {
            self.outcome = Some(RunOutcome {
                score: self.score(),
                ticks: self.ticks,
            });
        }
    }

    /// Immutable per-tick view for rendering/UI
    pub fn snapshot(&self) -> Snapshot {
        let offset = self.scroll.offset;
        let platforms = self
            .field
            .platforms()
            .iter()
            .filter_map(|p| {
                let y = p.viewport_y(offset);
                (y > -PLATFORM_HEIGHT && y < GAME_HEIGHT + PLATFORM_HEIGHT).then_some(
                    PlatformView {
                        x: p.x,
                        y,
                        kind: p.kind,
                    },
                )
            })
            .collect();
        Snapshot {
            player: self.player.pos,
            rising: self.player.vy < 0.0,
            platforms,
            score: self.score(),
            phase: self.phase,
        }
    }
}

/// A platform as seen by the renderer, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformView {
    pub x: f32,
    pub y: f32,
    pub kind: PlatformKind,
}

/// Per-tick immutable view of the run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: Vec2,
    /// Velocity sign; true while moving up
    pub rising: bool,
    /// Visible platforms only
    pub platforms: Vec<PlatformView>,
    pub score: u64,
    pub phase: RunPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_with_seed_platform() {
        let state = GameState::new(7);
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.field.platforms().len(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.player.vy, 0.0);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_seed_platform_sits_under_spawn() {
        let state = GameState::new(7);
        let start = state.field.platforms()[0];
        // Top edge level with the character's feet, horizontally centered
        assert_eq!(start.viewport_y(0.0), state.player.pos.y);
        assert!(start.overlaps_x(state.player.pos.x));
        assert_eq!(start.kind, PlatformKind::Static);
    }

    #[test]
    fn test_viewport_y_tracks_scroll() {
        let p = Platform {
            x: 0.0,
            altitude: 200.0,
            kind: PlatformKind::Static,
        };
        let before = p.viewport_y(0.0);
        // A scroll of 20 sinks the platform by 20 on screen
        assert_eq!(p.viewport_y(20.0), before + 20.0);
    }

    #[test]
    fn test_outcome_is_captured_once() {
        let mut state = GameState::new(7);
        state.phase = RunPhase::Running;
        state.scroll.offset = 50.0;
        state.finish();
        assert_eq!(state.outcome.as_ref().map(|o| o.score), Some(5));

        // A second finish must not overwrite the captured outcome
        state.scroll.offset = 500.0;
        state.finish();
        assert_eq!(state.outcome.as_ref().map(|o| o.score), Some(5));
    }

    #[test]
    fn test_snapshot_filters_offscreen_platforms() {
        let mut state = GameState::new(7);
        state.field.push(Platform {
            x: 10.0,
            altitude: GAME_HEIGHT + 300.0, // far above the viewport
            kind: PlatformKind::Static,
        });
        let snap = state.snapshot();
        assert_eq!(snap.platforms.len(), 1); // only the seed platform
    }
}
