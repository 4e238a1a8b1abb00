//! Swept bounce detection against the platform field
//!
//! A bounce requires a downward velocity, the character's foot line crossing a
//! platform's top edge within the tick's vertical span, and horizontal overlap
//! of the two footprints. The first matching platform in iteration order wins;
//! insertion order is the canonical tie-break. Purely functional: the caller
//! applies the returned velocity and any platform removal.

use super::state::Platform;

/// A detected bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Index of the platform hit, in field iteration order
    pub index: usize,
    /// Replacement vertical velocity (the negated bounce impulse)
    pub velocity: f32,
}

/// Test one vertical sub-step `y -> next_y` against the live platform set.
///
/// Returns `None` while ascending: passing up through a platform is not a
/// collision.
pub fn resolve_bounce(
    x: f32,
    y: f32,
    next_y: f32,
    vy: f32,
    platforms: &[Platform],
    scroll_offset: f32,
    jump_power: f32,
) -> Option<Bounce> {
    if vy <= 0.0 {
        return None;
    }
    for (index, platform) in platforms.iter().enumerate() {
        let top = platform.viewport_y(scroll_offset);
        if y <= top && next_y >= top && platform.overlaps_x(x) {
            return Some(Bounce {
                index,
                velocity: -jump_power,
            });
        }
    }
    None
}
