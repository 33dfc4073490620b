//! Drawing surface abstraction
//!
//! The simulation is drawn through a handful of immediate-mode calls. A
//! windowing backend implements `Canvas`; `CommandList` records calls so
//! frames can be inspected headlessly.

use glam::Vec2;

use super::sprite::TankSprite;
use crate::sim::{Rect, Rgb};

/// A surface that accepts per-frame draw calls
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Outline of a circle, `width` pixels thick
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgb);

    /// Text centered on `center`
    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Rgb);

    /// Sprite centered in `rect`, rotated counter-clockwise by `angle` degrees
    fn draw_sprite(&mut self, sprite: &TankSprite, rect: Rect, angle: f32);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgb,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Rgb,
    },
    Sprite {
        source: String,
        rect: Rect,
        angle: f32,
    },
}

/// Canvas that records every call in order
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop the previous frame
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// All text drawn this frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for CommandList {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgb) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size,
            color,
        });
    }

    fn draw_sprite(&mut self, sprite: &TankSprite, rect: Rect, angle: f32) {
        self.commands.push(DrawCommand::Sprite {
            source: sprite.source(),
            rect,
            angle,
        });
    }
}
