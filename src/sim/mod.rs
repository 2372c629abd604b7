//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time only through the `dt` passed to `tick`
//! - Randomness only through the state's RNG
//! - Stable iteration order (insertion order of entity vectors)

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, first_player_hit, first_projectile_hit};
pub use state::{Asteroid, AsteroidSize, GameEvent, GamePhase, GameState, Player, Projectile};
pub use tick::{TickInput, spawn_wave, tick};
