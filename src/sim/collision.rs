//! Collision tests
//!
//! Everything collides as a circle. Asteroid outlines are render data only.

use glam::Vec2;

use super::state::{Asteroid, Player, Projectile};

/// Circle-circle overlap (touching counts)
#[inline]
pub fn circles_overlap(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    p1.distance_squared(p2) <= reach * reach
}

/// Index of the first live projectile overlapping `asteroid`
pub fn first_projectile_hit(
    asteroid: &Asteroid,
    projectiles: &[Projectile],
    projectile_radius: f32,
) -> Option<usize> {
    projectiles.iter().position(|p| {
        !p.is_expired()
            && circles_overlap(p.pos, projectile_radius, asteroid.pos, asteroid.radius())
    })
}

/// Index of the first asteroid overlapping the player's hull
pub fn first_player_hit(player: &Player, ship_radius: f32, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| circles_overlap(player.pos, ship_radius, a.pos, a.radius()))
}
