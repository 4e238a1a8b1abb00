//! Fixed timestep physics integration
//!
//! Advances the character one tick: horizontal input once per tick, vertical
//! motion sub-stepped so no single step can skip past a platform edge, gravity
//! applied once per full tick after sub-stepping completes.

use crate::consts::*;

use super::collision::resolve_bounce;
use super::state::{GameState, PlatformKind, RunPhase};

/// Held-key state sampled once per physics tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the simulation by one fixed tick
///
/// No-op outside `Running`. Ends the run when the character's foot line falls
/// past the bottom of the viewport.
pub fn tick(state: &mut GameState, input: TickInput) {
    if state.phase != RunPhase::Running {
        return;
    }
    state.ticks += 1;

    // Horizontal update once per tick, clamped to the viewport
    let tuning = state.tuning;
    if input.left {
        state.player.pos.x -= tuning.move_speed;
    }
    if input.right {
        state.player.pos.x += tuning.move_speed;
    }
    state.player.pos.x = state.player.pos.x.clamp(0.0, GAME_WIDTH - PLAYER_SIZE);

    // Moving platforms drift before the character is integrated
    state.field.advance_oscillating(tuning.oscillate_speed);

    // Sub-step the vertical span: ceil(|v|) steps of v/n each keeps every
    // step shorter than a platform is thick
    let vy = state.player.vy;
    let substeps = vy.abs().ceil().max(1.0) as u32;
    let step = vy / substeps as f32;
    for _ in 0..substeps {
        let y = state.player.pos.y;
        let next_y = y + step;
        if let Some(bounce) = resolve_bounce(
            state.player.pos.x,
            y,
            next_y,
            state.player.vy,
            state.field.platforms(),
            state.scroll.offset,
            tuning.jump_power,
        ) {
            state.player.vy = bounce.velocity;
            if state.field.platforms()[bounce.index].kind == PlatformKind::Breakable {
                state.field.remove(bounce.index);
            }
        }
        state.player.pos.y = next_y;
    }

    // Gravity once per full tick, after sub-stepping
    state.player.vy += tuning.gravity;

    if state.player.pos.y > GAME_HEIGHT {
        state.finish();
    }
}
