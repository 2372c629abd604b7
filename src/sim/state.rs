//! Game state and core simulation types

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::{TickInput, spawn_wave};
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};
use crate::{clamp_length, heading, wrap_position};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted, waiting for restart
    GameOver,
}

/// Something the host may want to react to (sound, particles, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    ShotFired,
    AsteroidDestroyed {
        size: AsteroidSize,
        pos: Vec2,
        points: u64,
    },
    PlayerHit {
        lives_left: u8,
    },
    WaveCleared {
        next_wave: u32,
    },
    GameOver {
        score: u64,
        wave: u32,
    },
    Restarted,
}

/// Asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidSize {
    /// Numeric tier (Large = 3)
    pub const fn tier(self) -> u32 {
        self as u32
    }

    /// Collision radius for this tier
    pub const fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => ASTEROID_RADIUS_LARGE,
            AsteroidSize::Medium => ASTEROID_RADIUS_MEDIUM,
            AsteroidSize::Small => ASTEROID_RADIUS_SMALL,
        }
    }

    /// Tier of the fragments left behind, if any
    pub const fn split(self) -> Option<Self> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Score for destroying an asteroid of this tier
    pub fn points(self, tuning: &Tuning) -> u64 {
        tuning.points_per_tier * u64::from(self.tier())
    }
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before the bullet fizzles
    pub life: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, life: f32) -> Self {
        Self { pos, vel, life }
    }

    pub fn update(&mut self, dt: f32, extent: Vec2) {
        self.pos = wrap_position(self.pos + self.vel * dt, extent);
        self.life -= dt;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Spend the bullet (it hit something)
    pub fn expire(&mut self) {
        self.life = 0.0;
    }
}

/// A drifting rock
///
/// The outline is sampled once at construction and never changes; only the
/// position moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    size: AsteroidSize,
    /// Vertex offsets relative to `pos`
    outline: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid with a random drift and a freshly sampled outline
    pub fn new(pos: Vec2, size: AsteroidSize, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let vel = drift_velocity(size, tuning, rng);
        let outline = generate_outline(size.radius(), tuning, rng);
        Self {
            pos,
            vel,
            size,
            outline,
        }
    }

    pub fn size(&self) -> AsteroidSize {
        self.size
    }

    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    /// Outline offsets relative to the asteroid centre
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    /// Outline in world coordinates (closed polygon, last vertex joins the first)
    pub fn outline_world(&self) -> Vec<Vec2> {
        self.outline.iter().map(|&p| self.pos + p).collect()
    }

    pub fn update(&mut self, dt: f32, extent: Vec2) {
        self.pos = wrap_position(self.pos + self.vel * dt, extent);
    }
}

/// Random drift: uniform heading, smaller rocks faster on average
fn drift_velocity(size: AsteroidSize, tuning: &Tuning, rng: &mut impl Rng) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let tiers_below_large = (AsteroidSize::Large.tier() - size.tier()) as f32;
    let speed = tuning.asteroid_base_speed
        + rng.random::<f32>() * tuning.asteroid_speed_jitter
        + tiers_below_large * tuning.asteroid_speed_per_tier;
    heading(angle) * speed
}

/// Evenly spaced vertices with jittered radii
fn generate_outline(radius: f32, tuning: &Tuning, rng: &mut impl Rng) -> Vec<Vec2> {
    let spread = tuning
        .outline_max_points
        .saturating_sub(tuning.outline_min_points);
    let count = tuning.outline_min_points + rng.random_range(0..=spread);
    let scale_span = tuning.outline_max_scale - tuning.outline_min_scale;

    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let r = radius * (tuning.outline_min_scale + rng.random::<f32>() * scale_span);
            heading(angle) * r
        })
        .collect()
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians, 0 = +x, screen y points down)
    pub angle: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Seconds of remaining immunity to asteroid contact
    pub invulnerability: f32,
    pub alive: bool,
}

impl Player {
    /// A freshly spawned ship (already inside its grace period)
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: SHIP_SPAWN_ANGLE,
            fire_cooldown: 0.0,
            invulnerability: 0.0,
            alive: true,
        };
        player.reset(tuning);
        player
    }

    /// Recentre and grant a fresh invulnerability window
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos = tuning.field_center();
        self.vel = Vec2::ZERO;
        self.angle = SHIP_SPAWN_ANGLE;
        self.fire_cooldown = 0.0;
        self.invulnerability = tuning.invulnerability_secs;
        self.alive = true;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Steering, thrust, damping and integration for one frame
    pub fn update(&mut self, input: &TickInput, dt: f32, tuning: &Tuning) {
        if input.turn_left {
            self.angle -= tuning.ship_turn_speed * dt;
        }
        if input.turn_right {
            self.angle += tuning.ship_turn_speed * dt;
        }
        if input.thrust {
            self.vel += heading(self.angle) * (tuning.ship_accel * dt);
        }

        // Friction is specified per 1/60 s; scale the exponent so it holds at any dt
        self.vel *= tuning.ship_friction.powf(dt * 60.0);
        self.vel = clamp_length(self.vel, tuning.ship_max_speed);

        self.pos = wrap_position(self.pos + self.vel * dt, tuning.field());

        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }
        if self.invulnerability > 0.0 {
            self.invulnerability -= dt;
        }
    }

    /// Shoot from the nose if the cooldown has elapsed
    pub fn fire(&mut self, tuning: &Tuning) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.fire_cooldown = tuning.bullet_cooldown;

        let dir = heading(self.angle);
        let muzzle = self.pos + dir * (tuning.ship_radius + tuning.muzzle_offset);
        Some(Projectile::new(
            wrap_position(muzzle, tuning.field()),
            self.vel + dir * tuning.bullet_speed,
            tuning.bullet_lifetime,
        ))
    }
}

/// Complete game state
///
/// Generic over the random source so tests can substitute their own stream;
/// the game itself runs on a seeded [`Pcg32`].
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub asteroids: Vec<Asteroid>,
    pub score: u64,
    pub lives: u8,
    /// Current wave (1-based)
    pub wave: u32,
    pub phase: GamePhase,
    pub(crate) tuning: Tuning,
    pub(crate) rng: R,
    /// Events raised by the most recent tick
    pub(crate) events: Vec<GameEvent>,
}

impl GameState<Pcg32> {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(Pcg32::seed_from_u64(seed), Tuning::default())
    }

    /// Create a new game with custom tuning, rejecting unplayable values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }
}

impl<R> GameState<R> {
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Events raised during the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game drawing randomness from `rng`
    pub fn with_rng(rng: R, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(rng, tuning))
    }

    /// `tuning` must already satisfy [`Tuning::validate`]
    fn build(rng: R, tuning: Tuning) -> Self {
        let mut state = Self {
            player: Player::new(&tuning),
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            score: 0,
            lives: tuning.starting_lives,
            wave: 1,
            phase: GamePhase::Playing,
            tuning,
            rng,
            events: Vec::new(),
        };
        spawn_wave(&mut state);
        state
    }

    /// Start over from wave 1 (keeps the RNG stream running)
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.wave = 1;
        self.phase = GamePhase::Playing;
        self.player.reset(&self.tuning);
        self.projectiles.clear();
        spawn_wave(self);
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    /// Build an asteroid from this game's random stream
    pub fn make_asteroid(&mut self, pos: Vec2, size: AsteroidSize) -> Asteroid {
        Asteroid::new(pos, size, &self.tuning, &mut self.rng)
    }
}
