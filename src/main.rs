//! ZayDroids headless runner
//!
//! Drives the simulation at a fixed 60 Hz with a scripted pilot and logs what
//! happens. A windowed host swaps the pilot for real input polling and draws
//! the captured [`Scene`] each frame.
//!
//! Usage: `zaydroids [tuning.json]`, seed from `ZAYDROIDS_SEED` (defaults to
//! the clock).

#[cfg(not(target_arch = "wasm32"))]
use zaydroids::sim::{GameEvent, GameState, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use zaydroids::{Scene, Tuning};

/// Fixed step. `tick` accepts any `dt` in `(0, MAX_FRAME_DT]`
/// (`zaydroids::consts::MAX_FRAME_DT`, 0.1 s) and clamps longer frames to it.
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;
/// Two minutes of play
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u32 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("ZayDroids (headless) starting...");

    let tuning = load_tuning();
    let seed = run_seed();
    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Unplayable tuning: {e}; using defaults");
            GameState::new(seed)
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    for frame in 0..MAX_FRAMES {
        tick(&mut state, &pilot(frame), FRAME_DT);

        for event in state.events() {
            match event {
                GameEvent::PlayerHit { lives_left } => {
                    log::info!("Frame {frame}: ship lost, {lives_left} left");
                }
                GameEvent::WaveCleared { next_wave } => {
                    log::info!("Frame {frame}: wave cleared, starting wave {next_wave}");
                }
                _ => {}
            }
        }

        if state.is_game_over() {
            break;
        }
    }

    let scene = Scene::capture(&state);
    match serde_json::to_string(&scene.hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode HUD: {e}"),
    }
}

/// Optional tuning overrides from the first CLI argument
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {path}: {e}; using default tuning");
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            log::warn!("Rejected {path}: {e}; using default tuning");
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    std::env::var("ZAYDROIDS_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        })
}

/// Sweep the guns around, with short thrust bursts to keep moving
#[cfg(not(target_arch = "wasm32"))]
fn pilot(frame: u32) -> TickInput {
    let phase = frame % 240;
    TickInput {
        turn_left: phase < 90,
        turn_right: (120..180).contains(&phase),
        thrust: phase % 60 < 8,
        fire: true,
        restart: false,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `zaydroids::sim::tick` from their own frame callback
}
