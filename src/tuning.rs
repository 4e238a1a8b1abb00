//! Data-driven game balance
//!
//! Geometry lives in `consts`; everything a designer would want to retune
//! lives here, with defaults matching the shipped balance. A tuning document
//! is plain JSON and may override any subset of fields.

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward velocity gained per tick while airborne
    pub gravity: f32,
    /// Upward impulse applied on bounce
    pub jump_power: f32,
    /// Horizontal distance per tick while a key is held
    pub move_speed: f32,
    /// Sideways drift per tick for oscillating platforms
    pub oscillate_speed: f32,
    /// Vertical spacing range between generated platforms
    pub gap_min: f32,
    pub gap_max: f32,
    /// Platforms this far below the ascent are discarded
    pub cull_margin: f32,
    /// World rise per scroll-controller firing
    pub scroll_step: f32,
    /// Platform kind weights; static should dominate
    pub static_weight: u32,
    pub oscillating_weight: u32,
    pub breakable_weight: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            jump_power: 8.5,
            move_speed: 5.0,
            oscillate_speed: 2.0,
            gap_min: 40.0,
            gap_max: 100.0,
            cull_margin: 200.0,
            scroll_step: 20.0,
            static_weight: 80,
            oscillating_weight: 15,
            breakable_weight: 5,
        }
    }
}

impl Tuning {
    /// Parse a tuning document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apex height of a single bounce under this balance
    pub fn max_bounce_height(&self) -> f32 {
        self.jump_power * self.jump_power / (2.0 * self.gravity)
    }

    /// Whether every generated gap is clearable by a single bounce
    pub fn is_climbable(&self) -> bool {
        self.gap_max < self.max_bounce_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_balance_is_climbable() {
        let tuning = Tuning::default();
        assert!(tuning.is_climbable());
        assert!(tuning.gap_min > 0.0);
        assert!(tuning.gap_min <= tuning.gap_max);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"gravity": 0.5, "scroll_step": 30.0}"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.scroll_step, 30.0);
        assert_eq!(tuning.jump_power, Tuning::default().jump_power);
    }

    #[test]
    fn test_heavy_gravity_breaks_climbability() {
        let tuning = Tuning::from_json(r#"{"gravity": 2.0}"#).unwrap();
        assert!(!tuning.is_climbable());
    }
}
