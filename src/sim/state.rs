//! Match state and entity types
//!
//! `GameState` owns everything in the arena: obstacles, both tanks (which in
//! turn own their bullets), loose power-ups and the safe zone.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Difficulty;
use super::collision::Rect;
use super::tank::Tank;
use crate::consts::*;
use crate::settings::{Cheats, MatchConfig};

/// RGB color
pub type Rgb = [u8; 3];

pub const BLUE: Rgb = [0, 0, 255];
pub const GREEN: Rgb = [0, 255, 0];

/// Identifies one of the two tanks in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TankSlot {
    Blue,
    Green,
}

impl TankSlot {
    pub const BOTH: [TankSlot; 2] = [TankSlot::Blue, TankSlot::Green];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            TankSlot::Blue => 0,
            TankSlot::Green => 1,
        }
    }

    #[inline]
    pub fn other(self) -> TankSlot {
        match self {
            TankSlot::Blue => TankSlot::Green,
            TankSlot::Green => TankSlot::Blue,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            TankSlot::Blue => BLUE,
            TankSlot::Green => GREEN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TankSlot::Blue => "Blue",
            TankSlot::Green => "Green",
        }
    }
}

/// Static wall
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// A projectile owned by the tank that fired it
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Top-left anchored at the muzzle point
    pub rect: Rect,
    pub vel: Vec2,
    pub color: Rgb,
    /// Tank this bullet steers toward each tick
    pub target: Option<TankSlot>,
}

impl Bullet {
    /// Spawn at `muzzle` traveling along unit `dir`
    pub fn new(muzzle: Vec2, dir: Vec2, color: Rgb, target: Option<TankSlot>) -> Self {
        Self {
            rect: Rect::new(muzzle.x, muzzle.y, BULLET_SIZE, BULLET_SIZE),
            vel: dir.normalize_or(Vec2::X) * BULLET_SPEED,
            color,
            target,
        }
    }

    /// Re-aim toward `target_center` (if homing) then move one tick
    pub fn advance(&mut self, target_center: Option<Vec2>) {
        if let Some(center) = target_center {
            let to_target = center - self.rect.center();
            // Zero distance keeps the previous heading
            if to_target.length_squared() > 0.0 {
                self.vel = to_target.normalize() * BULLET_SPEED;
            }
        }
        self.rect = self.rect.translated(self.vel);
    }

    #[inline]
    pub fn is_off_screen(&self, bounds: &Rect) -> bool {
        self.rect.is_outside(bounds)
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    /// +1 hit point
    ExtraHeart,
    /// New bullets track the opponent
    HomingBullets,
    /// Shots split into a ±10° pair
    DoubleShot,
    /// Incoming bullets do no damage
    Shield,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::ExtraHeart,
        PowerupKind::HomingBullets,
        PowerupKind::DoubleShot,
        PowerupKind::Shield,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::ExtraHeart => "Extra Heart",
            PowerupKind::HomingBullets => "Homing Bullets",
            PowerupKind::DoubleShot => "Double Shot",
            PowerupKind::Shield => "Shield",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerupKind::ExtraHeart => [255, 50, 50],
            PowerupKind::HomingBullets => [100, 255, 255],
            PowerupKind::DoubleShot => [0, 255, 100],
            PowerupKind::Shield => [150, 150, 255],
        }
    }

    /// Apply this effect to `tank`
    pub fn apply(self, tank: &mut Tank, duration: u32, hp_cap: Option<i32>) {
        match self {
            // Never lowers HP, even when it already exceeds the cap
            PowerupKind::ExtraHeart => {
                let raised = tank.hp + 1;
                tank.hp = match hp_cap {
                    Some(cap) => raised.min(cap).max(tank.hp),
                    None => raised,
                };
            }
            PowerupKind::HomingBullets => tank.homing_ticks = duration,
            PowerupKind::DoubleShot => tank.double_shot_ticks = duration,
            PowerupKind::Shield => tank.shield_ticks = duration,
        }
    }
}

/// A collectible lying in the arena
#[derive(Debug, Clone)]
pub struct Powerup {
    pub rect: Rect,
    pub kind: PowerupKind,
    pub active: bool,
    /// Ticks the timed effect lasts once collected
    pub effect_duration: u32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, top_left: Vec2) -> Self {
        Self {
            rect: Rect::new(top_left.x, top_left.y, POWERUP_SIZE, POWERUP_SIZE),
            kind,
            active: true,
            effect_duration: POWERUP_EFFECT_TICKS,
        }
    }

    /// Apply the effect to `tank` and take this power-up out of play
    pub fn claim(&mut self, tank: &mut Tank, hp_cap: Option<i32>) {
        self.kind.apply(tank, self.effect_duration, hp_cap);
        self.active = false;
    }
}

/// Shrinking circle outside of which tanks take damage
#[derive(Debug, Clone)]
pub struct SafeZone {
    pub center: Vec2,
    pub radius: f32,
    pub min_radius: f32,
    /// Ring is drawn once shrinking begins
    pub visible: bool,
    pub shrinking: bool,
}

impl SafeZone {
    /// Zone that initially covers the whole arena
    pub fn covering(bounds: &Rect) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.w.hypot(bounds.h) / 2.0,
            min_radius: SAFE_ZONE_MIN_RADIUS,
            visible: false,
            shrinking: false,
        }
    }

    pub fn begin_shrinking(&mut self) {
        self.shrinking = true;
        self.visible = true;
    }

    /// Shrink one tick (no-op until shrinking begins)
    pub fn advance(&mut self) {
        if self.shrinking {
            self.radius = (self.radius - SAFE_ZONE_SHRINK_PER_TICK).max(self.min_radius);
        }
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(TankSlot),
    Draw,
}

/// Everything needed to start (and restart) a match
#[derive(Debug, Clone, Default)]
pub struct MatchSetup {
    pub difficulty: Difficulty,
    pub config: MatchConfig,
    pub cheats: Cheats,
    /// Blue then Green display names
    pub names: [String; 2],
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub difficulty: Difficulty,
    pub config: MatchConfig,
    pub cheats: Cheats,
    /// Playfield rectangle
    pub bounds: Rect,
    pub obstacles: Vec<Obstacle>,
    /// Indexed by `TankSlot::index`
    pub tanks: [Tank; 2],
    pub powerups: Vec<Powerup>,
    pub safe_zone: SafeZone,
    /// Ticks toward the safe zone starting to shrink
    pub shrink_timer: u32,
    /// Ticks toward the next power-up spawn
    pub powerup_spawn_timer: u32,
    pub outcome: Option<MatchOutcome>,
    /// Set once the outcome has been written to the ledger
    pub result_recorded: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh match
    pub fn new(seed: u64, setup: MatchSetup) -> Self {
        let bounds = Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);
        let tanks = Self::spawn_tanks(&setup);
        Self {
            difficulty: setup.difficulty,
            obstacles: setup.difficulty.obstacles(),
            config: setup.config,
            cheats: setup.cheats,
            bounds,
            tanks,
            powerups: Vec::new(),
            safe_zone: SafeZone::covering(&bounds),
            shrink_timer: 0,
            powerup_spawn_timer: 0,
            outcome: None,
            result_recorded: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn spawn_tanks(setup: &MatchSetup) -> [Tank; 2] {
        let size = Vec2::new(setup.config.tank_width, setup.config.tank_height);
        let spawns = setup.difficulty.spawn_points(size);
        TankSlot::BOTH.map(|slot| {
            Tank::new(
                slot,
                setup.names[slot.index()].clone(),
                spawns[slot.index()],
                &setup.config,
            )
        })
    }

    /// Setup that recreates this match
    pub fn setup(&self) -> MatchSetup {
        MatchSetup {
            difficulty: self.difficulty,
            config: self.config.clone(),
            cheats: self.cheats.clone(),
            names: self.names(),
        }
    }

    /// Reset arena, tanks and timers; config, cheats and names carry over
    pub fn restart(&mut self) {
        let setup = self.setup();
        self.obstacles = setup.difficulty.obstacles();
        self.tanks = Self::spawn_tanks(&setup);
        self.powerups.clear();
        self.safe_zone = SafeZone::covering(&self.bounds);
        self.shrink_timer = 0;
        self.powerup_spawn_timer = 0;
        self.outcome = None;
        self.result_recorded = false;
        self.time_ticks = 0;
        log::info!(
            "Match restarted ({}): {} vs {}",
            self.difficulty.as_str(),
            self.tanks[0].name,
            self.tanks[1].name
        );
    }

    pub fn names(&self) -> [String; 2] {
        [self.tanks[0].name.clone(), self.tanks[1].name.clone()]
    }

    #[inline]
    pub fn tank(&self, slot: TankSlot) -> &Tank {
        &self.tanks[slot.index()]
    }

    #[inline]
    pub fn tank_mut(&mut self, slot: TankSlot) -> &mut Tank {
        &mut self.tanks[slot.index()]
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<&Tank> {
        match self.outcome {
            Some(MatchOutcome::Winner(slot)) => Some(self.tank(slot)),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Some(MatchOutcome::Draw)
    }
}

/// Mutable access to the tank in `slot` and its opponent at once
pub fn split_tanks(tanks: &mut [Tank; 2], slot: TankSlot) -> (&mut Tank, &mut Tank) {
    let [blue, green] = tanks;
    match slot {
        TankSlot::Blue => (blue, green),
        TankSlot::Green => (green, blue),
    }
}
