//! Render description for the host
//!
//! The simulation never draws. After each tick the host captures a [`Scene`]
//! and strokes/fills it with whatever backend it has.

use glam::Vec2;
use serde::Serialize;

use crate::heading;
use crate::sim::GameState;

/// Ship alpha during the "off" half of the invulnerability flicker
pub const INVULN_FLICKER_ALPHA: f32 = 80.0 / 255.0;

/// Angle between the nose and each wing of the ship triangle
const WING_ANGLE: f32 = 2.5;
/// How far the nose extends past the hull radius
const NOSE_EXTENSION: f32 = 8.0;

/// Where and how to draw the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShipPose {
    pub pos: Vec2,
    pub angle: f32,
    /// 0-1, dimmed on alternate tenths of a second while invulnerable
    pub alpha: f32,
}

impl ShipPose {
    /// Nose, right wing, left wing
    pub fn triangle(&self, ship_radius: f32) -> [Vec2; 3] {
        [
            self.pos + heading(self.angle) * (ship_radius + NOSE_EXTENSION),
            self.pos + heading(self.angle + WING_ANGLE) * ship_radius,
            self.pos + heading(self.angle - WING_ANGLE) * ship_radius,
        ]
    }
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Closed polygons in world coordinates
    pub asteroids: Vec<Vec<Vec2>>,
    pub projectiles: Vec<Vec2>,
    /// `None` once the ship is destroyed for good
    pub ship: Option<ShipPose>,
    pub hud: Hud,
    /// Show the "press restart" overlay
    pub game_over: bool,
}

impl Scene {
    pub fn capture<R>(state: &GameState<R>) -> Self {
        let player = &state.player;
        let ship = player.alive.then(|| ShipPose {
            pos: player.pos,
            angle: player.angle,
            alpha: flicker_alpha(player.invulnerability),
        });

        Self {
            asteroids: state.asteroids.iter().map(|a| a.outline_world()).collect(),
            projectiles: state.projectiles.iter().map(|p| p.pos).collect(),
            ship,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                wave: state.wave,
            },
            game_over: state.is_game_over(),
        }
    }
}

/// Blink at 5 Hz while the grace period lasts
fn flicker_alpha(invulnerability: f32) -> f32 {
    if invulnerability > 0.0 && ((invulnerability * 10.0) as i32) % 2 == 0 {
        INVULN_FLICKER_ALPHA
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AsteroidSize, TickInput, tick};
    use std::f32::consts::PI;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(21);
        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
            1.0 / 60.0,
        );
        let scene = Scene::capture(&state);

        assert_eq!(scene.asteroids.len(), state.asteroids.len());
        for (outline, rock) in scene.asteroids.iter().zip(&state.asteroids) {
            assert_eq!(outline.len(), rock.outline().len());
            assert_eq!(outline[0], rock.pos + rock.outline()[0]);
        }
        assert_eq!(scene.projectiles, vec![state.projectiles[0].pos]);
        assert_eq!(
            scene.hud,
            Hud {
                score: 0,
                lives: 3,
                wave: 1
            }
        );
        assert!(!scene.game_over);
        let ship = scene.ship.expect("ship visible");
        assert_eq!(ship.pos, state.player.pos);
    }

    #[test]
    fn test_flicker() {
        assert_eq!(flicker_alpha(0.0), 1.0);
        assert_eq!(flicker_alpha(-0.3), 1.0);
        // floor(1.95 * 10) = 19, odd
        assert_eq!(flicker_alpha(1.95), 1.0);
        // floor(1.85 * 10) = 18, even
        assert_eq!(flicker_alpha(1.85), INVULN_FLICKER_ALPHA);
    }

    #[test]
    fn test_ship_hidden_after_game_over() {
        let mut state = GameState::new(22);
        state.asteroids.clear();
        state.lives = 1;
        state.player.invulnerability = 0.0;
        let rock = state.make_asteroid(state.player.pos, AsteroidSize::Large);
        state.asteroids.push(rock);
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);

        let scene = Scene::capture(&state);
        assert!(scene.game_over);
        assert!(scene.ship.is_none());
        assert_eq!(scene.hud.lives, 0);
    }

    #[test]
    fn test_triangle_points_forward() {
        let pose = ShipPose {
            pos: Vec2::new(100.0, 100.0),
            angle: 0.0,
            alpha: 1.0,
        };
        let [nose, right, left] = pose.triangle(12.0);
        assert!((nose - Vec2::new(120.0, 100.0)).length() < 1e-4);
        // Wings sit behind the centre, mirrored across the heading
        assert!(right.x < 100.0 && left.x < 100.0);
        assert!((right.y - 100.0 + (left.y - 100.0)).abs() < 1e-4);

        let up = ShipPose {
            angle: -PI / 2.0,
            ..pose
        };
        assert!(up.triangle(12.0)[0].y < 100.0);
    }

    #[test]
    fn test_scene_serializes() {
        let scene = Scene::capture(&GameState::new(23));
        let json = serde_json::to_string(&scene).expect("scene is serializable");
        assert!(json.contains("\"hud\""));
        assert!(json.contains("\"game_over\":false"));
    }

    #[test]
    fn test_capture_without_random_source() {
        let live = GameState::new(24);
        // Replays and snapshots carry no RNG
        let snapshot: GameState<()> = GameState {
            player: live.player.clone(),
            projectiles: live.projectiles.clone(),
            asteroids: live.asteroids.clone(),
            score: live.score,
            lives: live.lives,
            wave: live.wave,
            phase: live.phase,
            tuning: live.tuning.clone(),
            rng: (),
            events: Vec::new(),
        };
        assert_eq!(Scene::capture(&snapshot), Scene::capture(&live));
    }
}
