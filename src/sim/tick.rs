//! Per-frame simulation step
//!
//! Advances the game by a variable `dt`. All motion is scaled by `dt`, so the
//! host may call this at whatever rate it renders. Frames longer than
//! [`MAX_FRAME_DT`] are simulated as `MAX_FRAME_DT`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{circles_overlap, first_player_hit, first_projectile_hit};
use super::state::{AsteroidSize, GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_DT;
use crate::wrap_position;

/// Fragments left behind by a destroyed Large or Medium asteroid
const FRAGMENTS_PER_SPLIT: usize = 2;

/// Logical controls for one frame
///
/// The host ORs its physical bindings (keys, mouse, touch) into these.
/// Fire is level-triggered: holding it shoots whenever the cooldown allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Start a new game (only honoured after game over)
    pub restart: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    state.events.clear();
    // A stalled host must not teleport anything past the single-step wrap
    let dt = dt.min(MAX_FRAME_DT);

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.player.update(input, dt, &state.tuning);

    if input.fire {
        if let Some(shot) = state.player.fire(&state.tuning) {
            state.projectiles.push(shot);
            state.events.push(GameEvent::ShotFired);
        }
    }

    let extent = state.tuning.field();
    for projectile in &mut state.projectiles {
        projectile.update(dt, extent);
    }
    state.projectiles.retain(|p| !p.is_expired());

    for asteroid in &mut state.asteroids {
        asteroid.update(dt, extent);
    }

    resolve_projectile_hits(state);
    resolve_player_hits(state);

    if state.phase == GamePhase::Playing && state.asteroids.is_empty() {
        state.wave += 1;
        state.player.invulnerability = state.tuning.invulnerability_secs;
        state.events.push(GameEvent::WaveCleared {
            next_wave: state.wave,
        });
        spawn_wave(state);
    }
}

/// Bullets vs asteroids. Each asteroid is destroyed by at most one bullet,
/// and a spent bullet cannot hit anything else this frame.
fn resolve_projectile_hits<R: Rng>(state: &mut GameState<R>) {
    let bullet_radius = state.tuning.bullet_radius;
    let asteroids = std::mem::take(&mut state.asteroids);
    let mut survivors = Vec::with_capacity(asteroids.len());
    let mut fragments = Vec::new();

    for asteroid in asteroids {
        let Some(hit) = first_projectile_hit(&asteroid, &state.projectiles, bullet_radius) else {
            survivors.push(asteroid);
            continue;
        };
        state.projectiles[hit].expire();

        let size = asteroid.size();
        let points = size.points(&state.tuning);
        state.score += points;

        if let Some(child) = size.split() {
            for _ in 0..FRAGMENTS_PER_SPLIT {
                fragments.push(state.make_asteroid(asteroid.pos, child));
            }
        }

        log::debug!("{:?} asteroid destroyed at {} (+{})", size, asteroid.pos, points);
        state.events.push(GameEvent::AsteroidDestroyed {
            size,
            pos: asteroid.pos,
            points,
        });
    }

    survivors.append(&mut fragments);
    state.asteroids = survivors;
    state.projectiles.retain(|p| !p.is_expired());
}

/// Ship vs asteroids. At most one life is lost per frame.
fn resolve_player_hits<R>(state: &mut GameState<R>) {
    if state.player.is_invulnerable() {
        return;
    }
    if first_player_hit(&state.player, state.tuning.ship_radius, &state.asteroids).is_none() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.player.reset(&state.tuning);
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.player.alive = false;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            wave: state.wave,
        });
        log::info!("Game over: score {} on wave {}", state.score, state.wave);
    }
}

/// Replace the asteroid set with a fresh wave of Large asteroids.
///
/// Positions are rejection-sampled so nothing spawns on top of the player.
pub fn spawn_wave<R: Rng>(state: &mut GameState<R>) {
    let count = state.tuning.wave_base_count + state.wave;
    let extent = state.tuning.field();
    let asteroid_clearance = state.tuning.spawn_asteroid_clearance;
    let player_clearance = state.tuning.spawn_player_clearance;
    let player_pos = state.player.pos;

    state.asteroids.clear();
    for _ in 0..count {
        let pos = loop {
            let candidate = wrap_position(
                Vec2::new(
                    state.rng.random::<f32>() * extent.x,
                    state.rng.random::<f32>() * extent.y,
                ),
                extent,
            );
            if !circles_overlap(candidate, asteroid_clearance, player_pos, player_clearance) {
                break candidate;
            }
        };
        let asteroid = state.make_asteroid(pos, AsteroidSize::Large);
        state.asteroids.push(asteroid);
    }

    log::info!("Wave {}: {} asteroids", state.wave, count);
}
