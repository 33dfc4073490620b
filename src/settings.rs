//! Game settings and preferences
//!
//! Persisted as JSON next to the score ledger. The simulation only ever sees
//! the `MatchConfig` and `Cheats` copied into a `MatchSetup`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::KeyBindings;
use crate::ledger::clean_name;
use crate::sim::{Difficulty, TankSlot};

/// Default settings file location
pub const SETTINGS_PATH: &str = "tank_duel_settings.json";
/// Default score ledger location
pub const LEDGER_PATH: &str = "player_scores.csv";

/// Tunables injected into every match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Pixels per tick
    pub tank_speed: f32,
    pub tank_width: f32,
    pub tank_height: f32,
    /// Ticks between shots
    pub fire_cooldown: u32,
    pub starting_hp: i32,
    /// Upper bound for heart pickups (None = uncapped)
    #[serde(default)]
    pub hp_cap: Option<i32>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tank_speed: TANK_SPEED,
            tank_width: TANK_WIDTH,
            tank_height: TANK_HEIGHT,
            fire_cooldown: FIRE_COOLDOWN_TICKS,
            starting_hp: TANK_HP,
            hp_cap: None,
        }
    }
}

/// Which tanks fire homing bullets unconditionally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomingCheat {
    Blue,
    Green,
    Both,
}

impl HomingCheat {
    pub fn applies_to(&self, slot: TankSlot) -> bool {
        match self {
            HomingCheat::Blue => slot == TankSlot::Blue,
            HomingCheat::Green => slot == TankSlot::Green,
            HomingCheat::Both => true,
        }
    }
}

/// Cheat toggles from the cheat menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cheats {
    pub homing: Option<HomingCheat>,
    /// Tanks ignore obstacles and each other
    pub wall_hack: bool,
    /// Four extra bullets per shot
    pub burst: bool,
    /// Bullets pass through obstacles
    pub through_walls: bool,
}

impl Cheats {
    pub fn homing_for(&self, slot: TankSlot) -> bool {
        self.homing.is_some_and(|h| h.applies_to(slot))
    }

    pub fn any(&self) -> bool {
        self.homing.is_some() || self.wall_hack || self.burst || self.through_walls
    }
}

/// Slider-adjustable settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Speed,
    Size,
    FireRate,
    Hp,
}

impl Slider {
    pub const ALL: [Slider; 4] = [Slider::Speed, Slider::Size, Slider::FireRate, Slider::Hp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slider::Speed => "Speed",
            Slider::Size => "Size",
            Slider::FireRate => "FireRate",
            Slider::Hp => "HP",
        }
    }

    /// Inclusive (min, max)
    pub fn range(&self) -> (f32, f32) {
        match self {
            Slider::Speed => (1.0, 20.0),
            Slider::Size => (20.0, 200.0),
            Slider::FireRate => (1.0, 100.0),
            Slider::Hp => (1.0, 100.0),
        }
    }

    /// Value at `t` in [0, 1] along the slider track
    pub fn value_at(&self, t: f32) -> f32 {
        let (min, max) = self.range();
        min + t.clamp(0.0, 1.0) * (max - min)
    }

    pub fn read(&self, config: &MatchConfig) -> f32 {
        match self {
            Slider::Speed => config.tank_speed,
            Slider::Size => config.tank_width,
            Slider::FireRate => config.fire_cooldown as f32,
            Slider::Hp => config.starting_hp as f32,
        }
    }

    /// Write a slider value into `config` (clamped to range)
    pub fn write(&self, config: &mut MatchConfig, value: f32) {
        let (min, max) = self.range();
        let value = value.clamp(min, max);
        match self {
            Slider::Speed => config.tank_speed = value,
            Slider::Size => {
                config.tank_width = value;
                config.tank_height = value + 10.0;
            }
            Slider::FireRate => config.fire_cooldown = value as u32,
            Slider::Hp => config.starting_hp = value as i32,
        }
    }
}

/// Everything the menus can change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub match_config: MatchConfig,
    #[serde(default)]
    pub cheats: Cheats,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub bindings: [KeyBindings; 2],
    pub player_names: [String; 2],
    pub ledger_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            cheats: Cheats::default(),
            difficulty: Difficulty::Easy,
            bindings: [KeyBindings::player_one(), KeyBindings::player_two()],
            player_names: ["Player1".to_string(), "Player2".to_string()],
            ledger_path: LEDGER_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitize();
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Repair hand-edited values the match cannot use
    ///
    /// Names lose control characters (blank ones revert to the defaults) and
    /// bindings that share a key revert to the default tables.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        for (name, fallback) in self.player_names.iter_mut().zip(defaults.player_names) {
            let cleaned = clean_name(name);
            *name = if cleaned.is_empty() { fallback } else { cleaned };
        }
        let [blue, green] = &self.bindings;
        if blue.conflicts_with(green) {
            log::warn!("Key bindings share keys, restoring defaults");
            self.bindings = defaults.bindings;
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}
