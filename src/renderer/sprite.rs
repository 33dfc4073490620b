//! Tank sprite assets
//!
//! A missing or unreadable image is not fatal: the tank is drawn as a flat
//! rectangle in its own color instead.

use std::fs;
use std::path::{Path, PathBuf};

use crate::sim::{Rgb, TankSlot};

/// Image file for each tank
pub fn default_sprite_path(slot: TankSlot) -> &'static str {
    match slot {
        TankSlot::Blue => "Player1_tank.png",
        TankSlot::Green => "Player2_tank.png",
    }
}

/// Loaded tank artwork
#[derive(Debug, Clone, PartialEq)]
pub enum TankSprite {
    /// Encoded image bytes, decoded by the canvas backend
    Image { path: PathBuf, bytes: Vec<u8> },
    /// Flat-colored stand-in
    Placeholder { color: Rgb },
}

impl TankSprite {
    /// Read the image at `path`, falling back to a `color` placeholder
    pub fn load(path: impl AsRef<Path>, color: Rgb) -> Self {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => TankSprite::Image {
                path: path.to_path_buf(),
                bytes,
            },
            Ok(_) => {
                log::warn!("Sprite {} is empty, using placeholder", path.display());
                TankSprite::Placeholder { color }
            }
            Err(e) => {
                log::warn!("Sprite {} unavailable ({}), using placeholder", path.display(), e);
                TankSprite::Placeholder { color }
            }
        }
    }

    /// Default sprites for both tanks, Blue then Green
    pub fn load_defaults(dir: impl AsRef<Path>) -> [TankSprite; 2] {
        let dir = dir.as_ref();
        TankSlot::BOTH.map(|slot| Self::load(dir.join(default_sprite_path(slot)), slot.color()))
    }

    /// Short description for logs and recorded frames
    pub fn source(&self) -> String {
        match self {
            TankSprite::Image { path, .. } => path.display().to_string(),
            TankSprite::Placeholder { color } => {
                format!("placeholder #{:02x}{:02x}{:02x}", color[0], color[1], color[2])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_image_falls_back() {
        let sprite = TankSprite::load("/nonexistent/Player1_tank.png", [0, 0, 255]);
        assert_eq!(sprite, TankSprite::Placeholder { color: [0, 0, 255] });
        assert_eq!(sprite.source(), "placeholder #0000ff");
    }

    #[test]
    fn test_existing_image_loads() {
        let path =
            std::env::temp_dir().join(format!("tank_duel_sprite_{}.png", std::process::id()));
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let sprite = TankSprite::load(&path, [0, 255, 0]);
        assert!(matches!(sprite, TankSprite::Image { ref bytes, .. } if bytes.len() == 4));
        let _ = fs::remove_file(&path);
    }
}
