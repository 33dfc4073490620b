//! Rendering module
//!
//! Scenes are described as a short list of immediate-mode draw calls against a
//! `Canvas`. The window backend owns pixels; everything here is plain data.

pub mod canvas;
pub mod scene;
pub mod sprite;

pub use canvas::{Canvas, CommandList, DrawCommand};
pub use scene::{draw_match, health_blocks};
pub use sprite::TankSprite;

/// Color palette
pub mod colors {
    use crate::sim::Rgb;

    pub const BACKGROUND: Rgb = [255, 255, 255];
    pub const OBSTACLE: Rgb = [100, 100, 100];
    pub const HEALTH: Rgb = [220, 20, 60];
    pub const SAFE_ZONE: Rgb = [0, 0, 255];
    pub const SHIELD: Rgb = [135, 206, 250];

    pub const BANNER_WIN: Rgb = [220, 20, 60];
    pub const BANNER_DRAW: Rgb = [128, 128, 128];
    pub const BANNER_BORDER: Rgb = [0, 0, 0];
    pub const TEXT_LIGHT: Rgb = [255, 255, 255];
    pub const TEXT_HINT: Rgb = [200, 200, 200];
    pub const TEXT_DARK: Rgb = [0, 0, 0];
    pub const BUTTON: Rgb = [200, 200, 200];
}
