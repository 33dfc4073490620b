//! Match simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (Blue before Green)
//! - No rendering, file or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tank;
pub mod tick;

pub use arena::Difficulty;
pub use autopilot::autopilot;
pub use collision::{Rect, intersects};
pub use state::{
    Bullet, GameState, MatchOutcome, MatchSetup, Obstacle, Powerup, PowerupKind, Rgb, SafeZone,
    TankSlot,
};
pub use tank::{Arena, Tank};
pub use tick::{TickInput, spawn_powerup, tick};
