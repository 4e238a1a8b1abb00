//! Procedural platform field
//!
//! The generator owns the live platform set. `extend` fills the field ahead of
//! the rising frontier, `cull` discards platforms that have scrolled out of
//! relevance, and oscillating platforms drift once per physics tick. The
//! topmost generated altitude only ever increases, so no vertical slot is
//! generated twice.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

use super::state::{Platform, PlatformKind};

/// Live platform set plus the generation frontier tracker
#[derive(Debug, Clone)]
pub struct PlatformField {
    platforms: Vec<Platform>,
    /// Altitude of the topmost platform ever generated; never decreases
    highest: f32,
}

impl PlatformField {
    /// Field holding only the run's starting platform
    pub fn seeded(start: Platform) -> Self {
        Self {
            highest: start.altitude,
            platforms: vec![start],
        }
    }

    /// Live platforms in insertion order
    ///
    /// Insertion order is the canonical collision tie-break, so the order of
    /// this slice is part of the field's contract.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Topmost generated altitude
    pub fn highest(&self) -> f32 {
        self.highest
    }

    pub(crate) fn push(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    /// Remove one platform, preserving insertion order for the survivors
    pub(crate) fn remove(&mut self, index: usize) {
        self.platforms.remove(index);
    }

    /// Append platforms until the topmost altitude clears
    /// `frontier + GAME_HEIGHT`, spacing them by gaps drawn uniformly from
    /// `[gap_min, gap_max]`.
    pub fn extend(&mut self, frontier: f32, tuning: &Tuning, rng: &mut Pcg32) {
        while self.highest <= frontier + GAME_HEIGHT {
            let gap = rng.random_range(tuning.gap_min..=tuning.gap_max);
            let platform = Platform {
                x: rng.random_range(0.0..=GAME_WIDTH - PLATFORM_WIDTH),
                altitude: self.highest + gap,
                kind: roll_kind(tuning, rng),
            };
            self.highest = platform.altitude;
            self.platforms.push(platform);
        }
    }

    /// Discard every platform at or below `ascent - margin`
    pub fn cull(&mut self, ascent: f32, margin: f32) {
        let floor = ascent - margin;
        self.platforms.retain(|p| p.altitude > floor);
    }

    /// Drift oscillating platforms sideways, reversing at the viewport edges
    pub fn advance_oscillating(&mut self, speed: f32) {
        let max_x = GAME_WIDTH - PLATFORM_WIDTH;
        for platform in &mut self.platforms {
            if let PlatformKind::Oscillating { dir } = &mut platform.kind {
                platform.x += *dir * speed;
                if platform.x <= 0.0 || platform.x >= max_x {
                    platform.x = platform.x.clamp(0.0, max_x);
                    *dir = -*dir;
                }
            }
        }
    }
}

/// Weighted kind draw; static platforms heavily favored
fn roll_kind(tuning: &Tuning, rng: &mut Pcg32) -> PlatformKind {
    let total = tuning.static_weight + tuning.oscillating_weight + tuning.breakable_weight;
    let roll = rng.random_range(0..total);
    if roll < tuning.static_weight {
        PlatformKind::Static
    } else if roll < tuning.static_weight + tuning.oscillating_weight {
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        PlatformKind::Oscillating { dir }
    } else {
        PlatformKind::Breakable
    }
}
