//! Computer driver for a tank
//!
//! Produces the same `TankControls` a keyboard would, so the simulation cannot
//! tell the difference. Used for demo matches and soak tests.

use std::f32::consts::PI;

use glam::Vec2;

use super::state::{GameState, TankSlot};
use crate::heading_of;
use crate::input::TankControls;

/// Only detour for power-ups closer than this
const POWERUP_GREED_RANGE: f32 = 250.0;
/// Preferred distance to the opponent
const STANDOFF_RANGE: f32 = 220.0;
/// Stay this far inside the safe zone edge
const ZONE_MARGIN: f32 = 40.0;
/// Fire when facing within this many degrees of the opponent
const AIM_TOLERANCE: f32 = 25.0;

/// Pick controls for `slot` based on the current state
pub fn autopilot(state: &GameState, slot: TankSlot) -> TankControls {
    let me = state.tank(slot);
    let foe = state.tank(slot.other());
    let pos = me.center();
    let zone = &state.safe_zone;
    let to_foe = foe.center() - pos;

    let nearest_powerup = state
        .powerups
        .iter()
        .filter(|p| p.active)
        .map(|p| p.rect.center())
        .filter(|c| c.distance(pos) < POWERUP_GREED_RANGE)
        .min_by(|a, b| {
            a.distance(pos)
                .partial_cmp(&b.distance(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let goal_dir = if pos.distance(zone.center) > (zone.radius - ZONE_MARGIN).max(0.0) {
        (zone.center - pos).normalize_or_zero()
    } else if let Some(target) = nearest_powerup {
        (target - pos).normalize_or_zero()
    } else if to_foe.length() > STANDOFF_RANGE {
        to_foe.normalize_or_zero()
    } else {
        // Close enough: keep turning toward the opponent without closing in
        to_foe.normalize_or_zero() * 0.5
    };

    // Time-varying sidestep so tanks slide around walls instead of stalling
    let phase = state.time_ticks as f32 * 0.05 + slot.index() as f32 * PI;
    let side = Vec2::new(-goal_dir.y, goal_dir.x) * phase.sin() * 0.6;
    let steer = goal_dir + side;

    let aim_error = angle_between(me.angle, heading_of(to_foe));
    let shoot = aim_error <= AIM_TOLERANCE || me.homing_active();

    TankControls::toward(steer, shoot)
}

/// Smallest absolute difference between two headings, in degrees
fn angle_between(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MatchSetup;
    use crate::sim::tick::{TickInput, tick};

    fn new_state() -> GameState {
        GameState::new(
            7,
            MatchSetup {
                names: ["Alice".to_string(), "Bob".to_string()],
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_angle_between_wraps() {
        assert_eq!(angle_between(350.0, 10.0), 20.0);
        assert_eq!(angle_between(90.0, 270.0), 180.0);
        assert_eq!(angle_between(45.0, 45.0), 0.0);
    }

    #[test]
    fn test_heads_back_into_zone() {
        let mut state = new_state();
        state.safe_zone.begin_shrinking();
        state.safe_zone.radius = 100.0;
        state.time_ticks = 0;

        // Blue sits left of the zone and must drive right
        let controls = autopilot(&state, TankSlot::Blue);
        assert!(controls.right);
        assert!(!controls.left);
    }

    #[test]
    fn test_fires_when_facing_opponent() {
        let state = new_state();
        // Blue faces right (0°) toward Green on the same row
        let controls = autopilot(&state, TankSlot::Blue);
        assert!(controls.shoot);

        // Green also faces 0° (away from Blue)
        let controls = autopilot(&state, TankSlot::Green);
        assert!(!controls.shoot);
    }

    #[test]
    fn test_autopilot_match_finishes() {
        let mut state = new_state();
        let limit = 20_000;
        for _ in 0..limit {
            if state.is_finished() {
                break;
            }
            let input = TickInput::new(
                autopilot(&state, TankSlot::Blue),
                autopilot(&state, TankSlot::Green),
            );
            tick(&mut state, &input);
        }
        assert!(state.is_finished(), "match still running after {} ticks", limit);
        assert!(state.tanks.iter().all(|t| t.hp >= 0));
    }
}
