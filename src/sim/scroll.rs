//! Scroll controller
//!
//! Runs on its own cadence, independent of the physics tick: raises the world
//! origin by a fixed step, which sinks every platform on screen, then extends
//! the generation frontier and culls platforms that fell out of relevance.
//! The score is a pure function of cumulative scroll distance and therefore
//! never decreases during a run.

use crate::consts::SCORE_DIVISOR;

use super::state::{GameState, RunPhase};

/// Cumulative world-to-viewport shift for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Monotonically increasing ascent, advanced only by `scroll_step`
    pub offset: f32,
}

impl ScrollState {
    /// Score derived from scroll distance
    pub fn score(&self) -> u64 {
        (self.offset / SCORE_DIVISOR).floor() as u64
    }
}

/// One firing of the scroll controller
///
/// No-op outside `Running`.
pub fn scroll_step(state: &mut GameState) {
    if state.phase != RunPhase::Running {
        return;
    }
    state.scroll.offset += state.tuning.scroll_step;

    let ascent = state.scroll.offset;
    state
        .field
        .extend(ascent, &state.tuning, &mut state.rng);
    state.field.cull(ascent, state.tuning.cull_margin);
}
