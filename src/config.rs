// ── Tuning ────────────────────────────────────────────────────────────────────

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Every gameplay constant, grouped by owner.
///
/// Per-frame quantities (accelerations, speeds) are in tiles per 1/60 s frame;
/// durations are in seconds. Any field missing from a JSON file falls back to
/// its default, so a file only needs to list what it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub scene: SceneTuning,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Rejects values the simulation would divide by or sample from: timers
    /// that are used as divisors must be positive, other durations and speed
    /// caps non-negative, and the firework interval ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (p, e, s) = (&self.player, &self.enemy, &self.scene);

        let positive = [
            ("player.turn_time", p.turn_time),
            ("player.charge_time", p.charge_time),
            ("player.dash_time", p.dash_time),
            ("player.cool_down_time", p.cool_down_time),
            ("enemy.turn_time", e.turn_time),
            ("enemy.death_time", e.death_time),
            ("enemy.bob_period", e.bob_period),
            ("scene.clear_slow_time", s.clear_slow_time),
            ("scene.clear_banner_time", s.clear_banner_time),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
        }

        let non_negative = [
            ("player.max_speed", p.max_speed),
            ("player.max_fall_speed", p.max_fall_speed),
            ("enemy.wait_time", e.wait_time),
            ("scene.fade_time", s.fade_time),
            ("scene.tutorial_fade_time", s.tutorial_fade_time),
            ("scene.countdown_time", s.countdown_time),
            ("scene.start_banner_time", s.start_banner_time),
            ("scene.firework_interval[0]", s.firework_interval[0]),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
        }

        let [min, max] = s.firework_interval;
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "scene.firework_interval is inverted: [{min}, {max}]"
            )));
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&text)?;
        info!(path = %path.display(), "tuning loaded");
        Ok(tuning)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub acceleration: f32,
    /// Braking when reversing, and decay with no input.
    pub attenuation: f32,
    pub max_speed: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_speed: f32,
    /// Horizontal decay applied once on touchdown.
    pub landing_attenuation: f32,
    /// Horizontal decay applied on every wall contact.
    pub wall_attenuation: f32,
    pub max_air_jumps: u32,
    pub wall_jump_speed: [f32; 2],
    pub turn_time: f32,
    pub charge_time: f32,
    pub dash_time: f32,
    pub cool_down_time: f32,
    pub dash_speed: f32,
    pub clearance: f32,
    /// How far below the feet the grounded probe samples. Must exceed
    /// `clearance`, otherwise a resting player probes its own tile boundary.
    pub ground_check_offset: f32,
    /// Spawn tile as (column, row).
    pub spawn_tile: [i32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.0025,
            attenuation: 0.05,
            max_speed: 3.0,
            gravity: 0.03,
            max_fall_speed: 5.0,
            jump_speed: 0.5,
            landing_attenuation: 0.0005,
            wall_attenuation: 0.05,
            max_air_jumps: 2,
            wall_jump_speed: [0.4, 0.6],
            turn_time: 0.3,
            charge_time: 0.08,
            dash_time: 0.08,
            cool_down_time: 0.04,
            dash_speed: 0.5,
            clearance: 0.01,
            ground_check_offset: 0.02,
            spawn_tile: [5, 15],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub walk_speed: f32,
    pub wait_time: f32,
    pub turn_time: f32,
    pub death_time: f32,
    /// Peak forward tilt of the walk bob, in degrees.
    pub bob_degrees: f32,
    pub bob_period: f32,
    pub clearance: f32,
    pub spawn_count: u32,
    /// First spawn tile as (column, row); later ones step right.
    pub spawn_tile: [i32; 2],
    pub spawn_spacing: i32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            walk_speed: 0.03,
            wait_time: 0.15,
            turn_time: 0.2,
            death_time: 0.5,
            bob_degrees: 15.0,
            bob_period: 1.0,
            clearance: 0.01,
            spawn_count: 3,
            spawn_tile: [30, 18],
            spawn_spacing: 10,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    pub fade_time: f32,
    pub tutorial_fade_time: f32,
    pub countdown_time: f32,
    pub start_banner_time: f32,
    pub clear_slow_time: f32,
    pub clear_banner_time: f32,
    pub vignette_max: f32,
    pub firework_interval: [f32; 2],
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            fade_time: 1.0,
            tutorial_fade_time: 1.5,
            countdown_time: 3.0,
            start_banner_time: 0.7,
            clear_slow_time: 0.25,
            clear_banner_time: 0.6,
            vignette_max: 0.55,
            firework_interval: [0.20, 0.45],
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Tuning::from_json("{ player: }"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }
}
