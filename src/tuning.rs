//! Data-driven game balance
//!
//! [`Tuning`] mirrors every constant in [`crate::consts`]. A JSON document can
//! override any subset of fields; missing keys keep the compile-time default.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::AsteroidSize;

/// Rejected tuning document or value
#[derive(Debug)]
pub enum TuningError {
    /// The document was not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A quantity that must be strictly positive was not
    NonPositive { name: &'static str, value: f32 },
    /// Outline vertex count range is empty or too small for a polygon
    OutlineRange { min: usize, max: usize },
    /// No point of the field could ever satisfy the wave spawn clearance
    SpawnClearance { clearance: f32, half_diagonal: f32 },
    /// Something could cross a whole field extent in one maximum-length frame
    TooFast {
        name: &'static str,
        per_frame: f32,
        limit: f32,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning document: {e}"),
            TuningError::NonPositive { name, value } => {
                write!(f, "{name} must be positive (got {value})")
            }
            TuningError::OutlineRange { min, max } => {
                write!(f, "outline point range {min}..={max} is invalid (need 3 <= min <= max)")
            }
            TuningError::SpawnClearance {
                clearance,
                half_diagonal,
            } => write!(
                f,
                "spawn clearance {clearance} does not fit a field with half-diagonal {half_diagonal}"
            ),
            TuningError::TooFast {
                name,
                per_frame,
                limit,
            } => write!(
                f,
                "{name} covers {per_frame} per {MAX_FRAME_DT}s frame, must stay below {limit}"
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Runtime game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_turn_speed: f32,
    pub ship_accel: f32,
    /// Velocity factor per 1/60 s
    pub ship_friction: f32,
    pub ship_max_speed: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_cooldown: f32,
    pub bullet_radius: f32,
    pub muzzle_offset: f32,

    // === Asteroids ===
    pub asteroid_base_speed: f32,
    pub asteroid_speed_jitter: f32,
    pub asteroid_speed_per_tier: f32,
    pub outline_min_points: usize,
    pub outline_max_points: usize,
    pub outline_min_scale: f32,
    pub outline_max_scale: f32,

    // === Rules ===
    pub starting_lives: u8,
    pub invulnerability_secs: f32,
    pub wave_base_count: u32,
    pub spawn_asteroid_clearance: f32,
    pub spawn_player_clearance: f32,
    pub points_per_tier: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            ship_radius: SHIP_RADIUS,
            ship_turn_speed: SHIP_TURN_SPEED,
            ship_accel: SHIP_ACCEL,
            ship_friction: SHIP_FRICTION,
            ship_max_speed: SHIP_MAX_SPEED,

            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,
            bullet_cooldown: BULLET_COOLDOWN,
            bullet_radius: BULLET_RADIUS,
            muzzle_offset: MUZZLE_OFFSET,

            asteroid_base_speed: ASTEROID_BASE_SPEED,
            asteroid_speed_jitter: ASTEROID_SPEED_JITTER,
            asteroid_speed_per_tier: ASTEROID_SPEED_PER_TIER,
            outline_min_points: OUTLINE_MIN_POINTS,
            outline_max_points: OUTLINE_MAX_POINTS,
            outline_min_scale: OUTLINE_MIN_SCALE,
            outline_max_scale: OUTLINE_MAX_SCALE,

            starting_lives: LIVES_START,
            invulnerability_secs: INVULNERABILITY_SECS,
            wave_base_count: WAVE_BASE_COUNT,
            spawn_asteroid_clearance: SPAWN_ASTEROID_CLEARANCE,
            spawn_player_clearance: SPAWN_PLAYER_CLEARANCE,
            points_per_tier: POINTS_PER_TIER,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Playfield size as a vector (wrap extent)
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Centre of the playfield (ship spawn point)
    pub fn field_center(&self) -> Vec2 {
        self.field() * 0.5
    }

    /// Minimum distance between a freshly spawned asteroid and the player
    pub fn spawn_clearance(&self) -> f32 {
        self.spawn_asteroid_clearance + self.spawn_player_clearance
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_radius", self.ship_radius),
            ("ship_friction", self.ship_friction),
            ("ship_max_speed", self.ship_max_speed),
            ("bullet_lifetime", self.bullet_lifetime),
            ("bullet_radius", self.bullet_radius),
            ("outline_min_scale", self.outline_min_scale),
            ("invulnerability_secs", self.invulnerability_secs),
        ];
        for (name, value) in positive {
            // Written so NaN is rejected too
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }
        if self.starting_lives == 0 {
            return Err(TuningError::NonPositive {
                name: "starting_lives",
                value: 0.0,
            });
        }
        if self.outline_max_scale < self.outline_min_scale {
            return Err(TuningError::NonPositive {
                name: "outline_max_scale - outline_min_scale",
                value: self.outline_max_scale - self.outline_min_scale,
            });
        }
        if self.outline_min_points < 3 || self.outline_max_points < self.outline_min_points {
            return Err(TuningError::OutlineRange {
                min: self.outline_min_points,
                max: self.outline_max_points,
            });
        }
        // Some corner of the field is always at least half a diagonal away
        let half_diagonal = self.field().length() * 0.5;
        let clearance = self.spawn_clearance();
        if clearance >= half_diagonal {
            return Err(TuningError::SpawnClearance {
                clearance,
                half_diagonal,
            });
        }
        self.validate_speeds()
    }

    /// Wrapping is single-step, so no displacement in a `MAX_FRAME_DT` frame
    /// may reach the smaller field dimension
    fn validate_speeds(&self) -> Result<(), TuningError> {
        let limit = self.screen_width.min(self.screen_height);
        let asteroid_top_speed = self.asteroid_base_speed.abs()
            + self.asteroid_speed_jitter.abs()
            + (AsteroidSize::Large.tier() - AsteroidSize::Small.tier()) as f32
                * self.asteroid_speed_per_tier.abs();
        let checks = [
            ("ship_max_speed", self.ship_max_speed * MAX_FRAME_DT),
            (
                "ship_max_speed + bullet_speed",
                (self.ship_max_speed + self.bullet_speed.abs()) * MAX_FRAME_DT,
            ),
            ("asteroid speed", asteroid_top_speed * MAX_FRAME_DT),
            ("muzzle distance", self.ship_radius + self.muzzle_offset.abs()),
        ];
        for (name, per_frame) in checks {
            if !(per_frame < limit) {
                return Err(TuningError::TooFast {
                    name,
                    per_frame,
                    limit,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "ship_max_speed": 500.0, "starting_lives": 5 }"#)
            .expect("valid document");
        assert_eq!(tuning.ship_max_speed, 500.0);
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.bullet_speed, BULLET_SPEED);
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_field() {
        let err = Tuning::from_json(r#"{ "screen_width": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NonPositive {
                name: "screen_width",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_outline_range() {
        let err = Tuning::from_json(r#"{ "outline_min_points": 12, "outline_max_points": 8 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::OutlineRange { min: 12, max: 8 }));
    }

    #[test]
    fn test_rejects_unreachable_spawn_clearance() {
        let err = Tuning::from_json(r#"{ "screen_width": 200.0, "screen_height": 200.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::SpawnClearance { .. }));
        assert!(err.to_string().contains("spawn clearance"));
    }

    #[test]
    fn test_rejects_ship_faster_than_field() {
        let err = Tuning::from_json(r#"{ "ship_max_speed": 100000.0, "ship_accel": 10000000.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::TooFast {
                name: "ship_max_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bullet_faster_than_field() {
        // Ship alone is fine, but a bullet inherits ship velocity
        let err = Tuning::from_json(r#"{ "ship_max_speed": 3000.0, "bullet_speed": 4000.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::TooFast {
                name: "ship_max_speed + bullet_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_asteroid_faster_than_field() {
        let err = Tuning::from_json(r#"{ "asteroid_speed_per_tier": 4000.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::TooFast {
                name: "asteroid speed",
                ..
            }
        ));
    }

    #[test]
    fn test_accepts_fast_but_bounded_tuning() {
        // 6000 * 0.1 = 600 < 650
        let tuning = Tuning::from_json(r#"{ "ship_max_speed": 1000.0, "bullet_speed": 5000.0 }"#)
            .expect("within one field extent per frame");
        assert_eq!(tuning.bullet_speed, 5000.0);
    }

    #[test]
    fn test_field_center() {
        let tuning = Tuning::default();
        assert_eq!(tuning.field_center(), Vec2::new(450.0, 325.0));
        assert_eq!(tuning.spawn_clearance(), 200.0);
    }
}
