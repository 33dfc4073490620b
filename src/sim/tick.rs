//! Fixed timestep simulation tick
//!
//! One call per frame. Once the match has an outcome the tick is a no-op;
//! only rendering and restart handling remain live.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, MatchOutcome, Powerup, PowerupKind, TankSlot, split_tanks};
use super::tank::Arena;
use crate::consts::*;
use crate::input::TankControls;

/// Control intent for both tanks for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Indexed by `TankSlot::index`
    pub controls: [TankControls; 2],
}

impl TickInput {
    pub fn new(blue: TankControls, green: TankControls) -> Self {
        Self {
            controls: [blue, green],
        }
    }

    pub fn for_slot(&self, slot: TankSlot) -> &TankControls {
        &self.controls[slot.index()]
    }
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_finished() {
        return;
    }

    state.time_ticks += 1;

    apply_input(state, input);

    // Global timers
    state.shrink_timer += 1;
    state.powerup_spawn_timer += 1;

    if state.powerup_spawn_timer >= POWERUP_SPAWN_INTERVAL {
        spawn_powerup(state);
        state.powerup_spawn_timer = 0;
    }

    if !state.safe_zone.shrinking && state.shrink_timer >= SAFE_ZONE_SHRINK_DELAY {
        state.safe_zone.begin_shrinking();
        state.shrink_timer = 0;
        log::debug!("Safe zone starts shrinking at tick {}", state.time_ticks);
    }
    state.safe_zone.advance();

    update_tanks(state);
    apply_zone_damage(state);
    resolve_eliminations(state);
    collect_powerups(state);

    if let Some(outcome) = state.outcome {
        match outcome {
            MatchOutcome::Winner(slot) => {
                log::info!("{} tank wins at tick {}", state.tank(slot).name, state.time_ticks)
            }
            MatchOutcome::Draw => log::info!("Match drawn at tick {}", state.time_ticks),
        }
    }
}

/// Movement and firing, Blue first
fn apply_input(state: &mut GameState, input: &TickInput) {
    let arena = Arena {
        bounds: state.bounds,
        obstacles: &state.obstacles,
        cheats: &state.cheats,
        config: &state.config,
    };
    for slot in TankSlot::BOTH {
        let (me, other) = split_tanks(&mut state.tanks, slot);
        me.handle_input(input.for_slot(slot), other, &arena);
    }
}

/// Tank timers and bullets; bullet eliminations resolve simultaneously
fn update_tanks(state: &mut GameState) {
    let arena = Arena {
        bounds: state.bounds,
        obstacles: &state.obstacles,
        cheats: &state.cheats,
        config: &state.config,
    };
    for slot in TankSlot::BOTH {
        let (me, other) = split_tanks(&mut state.tanks, slot);
        me.update(other, &arena);
    }

    state.outcome = elimination_outcome(state);
}

fn elimination_outcome(state: &GameState) -> Option<MatchOutcome> {
    let blue_out = state.tank(TankSlot::Blue).is_eliminated();
    let green_out = state.tank(TankSlot::Green).is_eliminated();
    match (blue_out, green_out) {
        (true, true) => Some(MatchOutcome::Draw),
        (true, false) => Some(MatchOutcome::Winner(TankSlot::Green)),
        (false, true) => Some(MatchOutcome::Winner(TankSlot::Blue)),
        (false, false) => None,
    }
}

/// Tanks outside the safe zone lose a hit point once per cooldown
fn apply_zone_damage(state: &mut GameState) {
    let zone = &state.safe_zone;
    for tank in state.tanks.iter_mut() {
        if tank.is_eliminated() || zone.contains(tank.center()) {
            continue;
        }
        if tank.zone_cooldown_ticks == 0 {
            tank.hp -= 1;
            tank.zone_cooldown_ticks = SAFE_ZONE_DAMAGE_COOLDOWN;
        }
    }
}

/// Late eliminations (zone damage) only decide a match that is still open
fn resolve_eliminations(state: &mut GameState) {
    if state.outcome.is_some() {
        return;
    }
    state.outcome = elimination_outcome(state);
}

/// Hand each touched power-up to the first tank (slot order) touching it
fn collect_powerups(state: &mut GameState) {
    let hp_cap = state.config.hp_cap;
    let tanks = &mut state.tanks;
    state.powerups.retain_mut(|powerup| {
        for tank in tanks.iter_mut() {
            if powerup.active && tank.rect.intersects(&powerup.rect) {
                powerup.claim(tank, hp_cap);
                log::debug!("{} picked up {}", tank.name, powerup.kind.as_str());
            }
        }
        powerup.active
    });
}

/// Try to drop a random power-up somewhere clear of obstacles
///
/// Gives up silently after `POWERUP_SPAWN_ATTEMPTS` rejected positions.
/// Returns true if a power-up was placed.
pub fn spawn_powerup(state: &mut GameState) -> bool {
    let max_x = state.bounds.right() - POWERUP_SPAWN_MARGIN - POWERUP_SIZE;
    let max_y = state.bounds.bottom() - POWERUP_SPAWN_MARGIN - POWERUP_SIZE;
    if max_x < POWERUP_SPAWN_MARGIN || max_y < POWERUP_SPAWN_MARGIN {
        return false;
    }

    for _ in 0..POWERUP_SPAWN_ATTEMPTS {
        let x = state.rng.random_range(POWERUP_SPAWN_MARGIN..=max_x).floor();
        let y = state.rng.random_range(POWERUP_SPAWN_MARGIN..=max_y).floor();
        let kind = PowerupKind::ALL[state.rng.random_range(0..PowerupKind::ALL.len())];
        let candidate = Powerup::new(kind, Vec2::new(x, y));

        if !state.obstacles.iter().any(|o| o.rect.intersects(&candidate.rect)) {
            log::debug!("Spawned {} at ({}, {})", kind.as_str(), x, y);
            state.powerups.push(candidate);
            return true;
        }
    }

    log::debug!("No clear spot for a power-up this interval");
    false
}
