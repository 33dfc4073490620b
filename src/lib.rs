//! Tank Duel - a local two-player top-down tank arena
//!
//! Core modules:
//! - `sim`: Fixed-timestep match simulation (tanks, bullets, power-ups, safe zone)
//! - `input`: Key bindings and per-frame control snapshots
//! - `settings`: Runtime-tunable match parameters, cheats and preferences
//! - `ledger`: Persistent per-player rank points and net score
//! - `renderer`: Draw-call canvas abstraction and scene building
//! - `session`: Frame loop glue (substepping, result persistence, restart)
//! - `ui`: Menu screen flow

pub mod input;
pub mod ledger;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use ledger::ScoreLedger;
pub use session::Session;
pub use settings::{Cheats, MatchConfig, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena dimensions (pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 900.0;

    /// Tank defaults (overridable through `MatchConfig`)
    pub const TANK_WIDTH: f32 = 60.0;
    pub const TANK_HEIGHT: f32 = 75.0;
    pub const TANK_SPEED: f32 = 15.0;
    pub const TANK_HP: i32 = 10;
    /// Ticks between shots
    pub const FIRE_COOLDOWN_TICKS: u32 = 20;
    /// Ticks of post-hit grace (tracked, currently informational)
    pub const HIT_COOLDOWN_TICKS: u32 = 30;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 12.0;
    pub const BULLET_SPEED: f32 = 15.0;
    /// Distance from tank center to the muzzle
    pub const MUZZLE_OFFSET: f32 = 40.0;
    /// Heading offsets (degrees) of the double-shot pair
    pub const DOUBLE_SHOT_SPREAD: [f32; 2] = [-10.0, 10.0];
    /// Heading offsets (degrees) of the burst cheat volley
    pub const BURST_SPREAD: [f32; 4] = [-130.0, -75.0, 75.0, 130.0];

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 40.0;
    pub const POWERUP_EFFECT_TICKS: u32 = 300;
    pub const POWERUP_SPAWN_INTERVAL: u32 = 5 * FPS;
    pub const POWERUP_SPAWN_ATTEMPTS: u32 = 50;
    /// Minimum distance between a spawned power-up and the arena edge
    pub const POWERUP_SPAWN_MARGIN: f32 = 50.0;

    /// Safe zone
    pub const SAFE_ZONE_SHRINK_DELAY: u32 = 30 * FPS;
    pub const SAFE_ZONE_SHRINK_PER_TICK: f32 = 0.1;
    pub const SAFE_ZONE_MIN_RADIUS: f32 = 50.0;
    /// Ticks between damage while outside the zone
    pub const SAFE_ZONE_DAMAGE_COOLDOWN: u32 = FPS;
}

/// Normalize a heading to [0, 360) degrees
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Heading (degrees, 0 = right, counter-clockwise positive) of a screen-space direction
#[inline]
pub fn heading_of(dir: Vec2) -> f32 {
    normalize_degrees((-dir.y).atan2(dir.x).to_degrees())
}

/// Unit screen-space direction for a heading in degrees
#[inline]
pub fn direction_of(heading: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
