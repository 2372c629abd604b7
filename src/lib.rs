//! ZayDroids - a wraparound asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, lives)
//! - `scene`: Read-only render description handed to the host each frame
//! - `tuning`: Data-driven game balance

pub mod scene;
pub mod sim;
pub mod tuning;

pub use scene::{Hud, Scene, ShipPose};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions (toroidal)
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 650.0;

    /// Ship collision radius
    pub const SHIP_RADIUS: f32 = 12.0;
    /// Turn rate (radians/sec)
    pub const SHIP_TURN_SPEED: f32 = 3.5;
    /// Thrust acceleration (pixels/s²)
    pub const SHIP_ACCEL: f32 = 260.0;
    /// Per-frame velocity factor at 60 Hz
    pub const SHIP_FRICTION: f32 = 0.98;
    pub const SHIP_MAX_SPEED: f32 = 360.0;
    /// Facing angle on spawn (pointing up the screen)
    pub const SHIP_SPAWN_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;

    pub const BULLET_SPEED: f32 = 520.0;
    /// Seconds before a bullet expires
    pub const BULLET_LIFETIME: f32 = 1.2;
    /// Seconds between shots
    pub const BULLET_COOLDOWN: f32 = 0.18;
    pub const BULLET_RADIUS: f32 = 2.0;
    /// Extra distance past the ship radius where bullets appear
    pub const MUZZLE_OFFSET: f32 = 6.0;

    pub const ASTEROID_BASE_SPEED: f32 = 40.0;
    pub const ASTEROID_SPEED_JITTER: f32 = 40.0;
    /// Added speed per tier below Large
    pub const ASTEROID_SPEED_PER_TIER: f32 = 20.0;
    pub const ASTEROID_RADIUS_LARGE: f32 = 42.0;
    pub const ASTEROID_RADIUS_MEDIUM: f32 = 26.0;
    pub const ASTEROID_RADIUS_SMALL: f32 = 14.0;

    /// Outline vertex count range (inclusive)
    pub const OUTLINE_MIN_POINTS: usize = 10;
    pub const OUTLINE_MAX_POINTS: usize = 14;
    /// Outline radial jitter as a fraction of the collision radius
    pub const OUTLINE_MIN_SCALE: f32 = 0.7;
    pub const OUTLINE_MAX_SCALE: f32 = 1.1;

    pub const LIVES_START: u8 = 3;
    /// Grace period after spawn, respawn and wave clear (seconds)
    pub const INVULNERABILITY_SECS: f32 = 2.0;

    /// Large asteroids per wave = WAVE_BASE_COUNT + wave
    pub const WAVE_BASE_COUNT: u32 = 3;
    /// Wave spawns keep asteroid + player clearance apart
    pub const SPAWN_ASTEROID_CLEARANCE: f32 = 80.0;
    pub const SPAWN_PLAYER_CLEARANCE: f32 = 120.0;

    pub const POINTS_PER_TIER: u64 = 10;

    /// Longest frame `tick` will simulate in one step (seconds). Longer `dt`
    /// is clamped so nothing can cross more than one field extent per frame.
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

/// Rescale `v` so its length is at most `max_len`.
///
/// Shorter vectors (and the zero vector) come back unchanged.
#[inline]
pub fn clamp_length(v: Vec2, max_len: f32) -> Vec2 {
    v.clamp_length_max(max_len)
}

/// Wrap a position onto the torus `[0, extent.x) x [0, extent.y)`.
///
/// Single-step: assumes the position is at most one extent outside the field.
#[inline]
pub fn wrap_position(pos: Vec2, extent: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, extent.x), wrap_axis(pos.y, extent.y))
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        let wrapped = value + extent;
        // Tiny negatives round up to `extent` in f32
        if wrapped >= extent { 0.0 } else { wrapped }
    } else if value >= extent {
        value - extent
    } else {
        value
    }
}
