//! Tank entity: movement, shooting and per-tick bullet bookkeeping
//!
//! Tanks never reach arena state through globals; every operation that needs
//! obstacles, bounds or cheats receives an `Arena` view, and the opposing tank
//! is passed explicitly.

use glam::Vec2;

use super::collision::Rect;
use super::state::{Bullet, Obstacle, Rgb, TankSlot};
use crate::consts::*;
use crate::input::TankControls;
use crate::settings::{Cheats, MatchConfig};
use crate::{direction_of, heading_of};

/// Borrowed view of the static parts of a match
#[derive(Debug, Clone, Copy)]
pub struct Arena<'a> {
    pub bounds: Rect,
    pub obstacles: &'a [Obstacle],
    pub cheats: &'a Cheats,
    pub config: &'a MatchConfig,
}

impl Arena<'_> {
    pub fn hits_obstacle(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.rect.intersects(rect))
    }
}

/// A player tank
#[derive(Debug, Clone)]
pub struct Tank {
    pub slot: TankSlot,
    pub name: String,
    pub color: Rgb,
    pub rect: Rect,
    /// Facing in degrees (0 = right, counter-clockwise positive)
    pub angle: f32,
    pub hp: i32,
    /// Live bullets fired by this tank
    pub bullets: Vec<Bullet>,
    /// Ticks until the next shot is allowed
    pub reload_ticks: u32,
    /// Post-hit grace ticks
    pub hit_ticks: u32,
    /// Ticks until the safe zone may damage this tank again
    pub zone_cooldown_ticks: u32,
    /// Power-up timers (0 = inactive)
    pub homing_ticks: u32,
    pub double_shot_ticks: u32,
    pub shield_ticks: u32,
}

impl Tank {
    pub fn new(slot: TankSlot, name: String, center: Vec2, config: &MatchConfig) -> Self {
        Self {
            slot,
            name,
            color: slot.color(),
            rect: Rect::from_center(center, Vec2::new(config.tank_width, config.tank_height)),
            angle: 0.0,
            hp: config.starting_hp,
            bullets: Vec::new(),
            reload_ticks: 0,
            hit_ticks: 0,
            zone_cooldown_ticks: 0,
            homing_ticks: 0,
            double_shot_ticks: 0,
            shield_ticks: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn is_eliminated(&self) -> bool {
        self.hp <= 0
    }

    #[inline]
    pub fn homing_active(&self) -> bool {
        self.homing_ticks > 0
    }

    #[inline]
    pub fn double_shot_active(&self) -> bool {
        self.double_shot_ticks > 0
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Apply one tick of player intent: move (if unobstructed) and fire
    pub fn handle_input(&mut self, controls: &TankControls, other: &Tank, arena: &Arena) {
        let movement = controls.movement();
        if movement.length_squared() > 0.0 {
            // Diagonals are normalized so they are no faster than an axis move
            let dir = movement.normalize();
            self.angle = heading_of(dir);

            let proposed = self.rect.with_center(self.center() + dir * arena.config.tank_speed);
            if self.can_occupy(&proposed, other, arena) {
                self.rect = proposed;
            }
        }

        if controls.shoot && self.reload_ticks == 0 {
            self.shoot(other.slot, arena);
            self.reload_ticks = arena.config.fire_cooldown;
        }
    }

    fn can_occupy(&self, proposed: &Rect, other: &Tank, arena: &Arena) -> bool {
        if !proposed.is_within(&arena.bounds) {
            return false;
        }
        if arena.cheats.wall_hack {
            return true;
        }
        !arena.hits_obstacle(proposed) && !proposed.intersects(&other.rect)
    }

    /// Fire a volley along the current heading
    ///
    /// Double shot replaces the center bullet with a ±10° pair; the burst
    /// cheat adds four wide bullets on top of whatever else fires. Homing
    /// (power-up or cheat) applies to every bullet of the volley.
    pub fn shoot(&mut self, opponent: TankSlot, arena: &Arena) {
        let homing = self.homing_active() || arena.cheats.homing_for(self.slot);
        let target = homing.then_some(opponent);

        if self.double_shot_active() {
            for spread in DOUBLE_SHOT_SPREAD {
                self.fire(self.angle + spread, None, target);
            }
        } else {
            self.fire(self.angle, None, target);
        }

        if arena.cheats.burst {
            let muzzle = self.muzzle(self.angle);
            for spread in BURST_SPREAD {
                self.fire(self.angle + spread, Some(muzzle), target);
            }
        }
    }

    /// Muzzle point for a bullet leaving along `heading`
    fn muzzle(&self, heading: f32) -> Vec2 {
        self.center() + direction_of(heading) * MUZZLE_OFFSET
    }

    fn fire(&mut self, heading: f32, muzzle: Option<Vec2>, target: Option<TankSlot>) {
        let muzzle = muzzle.unwrap_or_else(|| self.muzzle(heading));
        self.bullets
            .push(Bullet::new(muzzle, direction_of(heading), self.color, target));
    }

    /// Take one bullet hit; the shield absorbs it entirely
    ///
    /// Returns true if hit points were lost.
    pub fn take_hit(&mut self) -> bool {
        if self.shield_active() {
            return false;
        }
        self.hp = (self.hp - 1).max(0);
        self.hit_ticks = HIT_COOLDOWN_TICKS;
        true
    }

    /// Per-tick update: count down timers and resolve this tank's bullets
    ///
    /// Bullets leave play when they exit `arena.bounds`, strike an obstacle
    /// (unless bullets pass through walls) or strike `opponent`.
    pub fn update(&mut self, opponent: &mut Tank, arena: &Arena) {
        self.zone_cooldown_ticks = self.zone_cooldown_ticks.saturating_sub(1);
        self.reload_ticks = self.reload_ticks.saturating_sub(1);
        self.hit_ticks = self.hit_ticks.saturating_sub(1);

        let own_center = self.center();
        let opponent_center = opponent.center();
        let opponent_slot = opponent.slot;

        self.bullets.retain_mut(|bullet| {
            let target_center = bullet.target.map(|slot| {
                if slot == opponent_slot {
                    opponent_center
                } else {
                    own_center
                }
            });
            bullet.advance(target_center);

            if bullet.is_off_screen(&arena.bounds) {
                return false;
            }
            if !arena.cheats.through_walls && arena.hits_obstacle(&bullet.rect) {
                return false;
            }
            if bullet.rect.intersects(&opponent.rect) {
                if !opponent.take_hit() {
                    log::debug!("{} shield absorbed a hit", opponent.name);
                }
                return false;
            }
            true
        });

        self.homing_ticks = self.homing_ticks.saturating_sub(1);
        self.double_shot_ticks = self.double_shot_ticks.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HomingCheat;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT)
    }

    fn view<'a>(
        obstacles: &'a [Obstacle],
        cheats: &'a Cheats,
        config: &'a MatchConfig,
    ) -> Arena<'a> {
        Arena {
            bounds: bounds(),
            obstacles,
            cheats,
            config,
        }
    }

    fn tanks() -> (Tank, Tank) {
        let config = MatchConfig::default();
        (
            Tank::new(TankSlot::Blue, "Blue".into(), Vec2::new(200.0, 450.0), &config),
            Tank::new(TankSlot::Green, "Green".into(), Vec2::new(1000.0, 450.0), &config),
        )
    }

    fn right() -> TankControls {
        TankControls {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_axis_move() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, green) = tanks();

        blue.handle_input(&right(), &green, &arena);
        assert_eq!(blue.center(), Vec2::new(200.0 + TANK_SPEED, 450.0));
        assert_eq!(blue.angle, 0.0);
    }

    #[test]
    fn test_diagonal_move_is_normalized() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, green) = tanks();
        let start = blue.center();

        let controls = TankControls {
            up: true,
            right: true,
            ..Default::default()
        };
        blue.handle_input(&controls, &green, &arena);
        let moved = blue.center() - start;
        assert!((moved.length() - TANK_SPEED).abs() < 1e-3);
        assert!((blue.angle - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_blocked_move_still_turns() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let wall = [Obstacle::new(Rect::new(240.0, 300.0, 20.0, 300.0))];
        let arena = view(&wall, &cheats, &config);
        let (mut blue, green) = tanks();
        blue.angle = 180.0;
        let start = blue.center();

        blue.handle_input(&right(), &green, &arena);
        assert_eq!(blue.center(), start);
        assert_eq!(blue.angle, 0.0);
    }

    #[test]
    fn test_wall_hack_ignores_obstacles_but_not_bounds() {
        let config = MatchConfig::default();
        let cheats = Cheats {
            wall_hack: true,
            ..Default::default()
        };
        let wall = [Obstacle::new(Rect::new(240.0, 300.0, 20.0, 300.0))];
        let arena = view(&wall, &cheats, &config);
        let (mut blue, green) = tanks();

        blue.handle_input(&right(), &green, &arena);
        assert_eq!(blue.center().x, 200.0 + TANK_SPEED);

        // Pushing against the left edge is still rejected
        blue.rect = blue.rect.with_center(Vec2::new(35.0, 450.0));
        let left = TankControls {
            left: true,
            ..Default::default()
        };
        blue.handle_input(&left, &green, &arena);
        assert_eq!(blue.center().x, 35.0);
    }

    #[test]
    fn test_cannot_drive_into_other_tank() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, mut green) = tanks();
        green.rect = green.rect.with_center(Vec2::new(270.0, 450.0));

        blue.handle_input(&right(), &green, &arena);
        assert_eq!(blue.center().x, 200.0);
    }

    #[test]
    fn test_shoot_respects_reload() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, green) = tanks();
        let fire = TankControls {
            shoot: true,
            ..Default::default()
        };

        blue.handle_input(&fire, &green, &arena);
        assert_eq!(blue.bullets.len(), 1);
        assert_eq!(blue.reload_ticks, FIRE_COOLDOWN_TICKS);

        blue.handle_input(&fire, &green, &arena);
        assert_eq!(blue.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_leaves_from_muzzle() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, _) = tanks();

        blue.shoot(TankSlot::Green, &arena);
        let bullet = &blue.bullets[0];
        assert_eq!(bullet.rect.x, 200.0 + MUZZLE_OFFSET);
        assert_eq!(bullet.vel, Vec2::new(BULLET_SPEED, 0.0));
        assert!(bullet.target.is_none());
    }

    #[test]
    fn test_double_shot_replaces_center_bullet() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, _) = tanks();
        blue.double_shot_ticks = 10;

        blue.shoot(TankSlot::Green, &arena);
        assert_eq!(blue.bullets.len(), 2);
        let headings: Vec<f32> = blue.bullets.iter().map(|b| heading_of(b.vel)).collect();
        assert!(headings.iter().any(|h| (h - 10.0).abs() < 1e-3));
        assert!(headings.iter().any(|h| (h - 350.0).abs() < 1e-3));
    }

    #[test]
    fn test_burst_and_homing_cheats() {
        let config = MatchConfig::default();
        let cheats = Cheats {
            burst: true,
            homing: Some(HomingCheat::Blue),
            ..Default::default()
        };
        let arena = view(&[], &cheats, &config);
        let (mut blue, mut green) = tanks();

        blue.shoot(TankSlot::Green, &arena);
        assert_eq!(blue.bullets.len(), 5);
        assert!(blue.bullets.iter().all(|b| b.target == Some(TankSlot::Green)));

        // Wide bullets leave from the center muzzle at ±75° and ±130°
        let center_muzzle = blue.bullets[0].rect;
        let headings: Vec<f32> = blue.bullets.iter().map(|b| heading_of(b.vel)).collect();
        for expected in [0.0, 75.0, 285.0, 130.0, 230.0] {
            assert!(
                headings.iter().any(|h| (h - expected).abs() < 1e-3),
                "missing heading {} in {:?}",
                expected,
                headings
            );
        }
        assert!(blue.bullets.iter().all(|b| b.rect == center_muzzle));

        green.shoot(TankSlot::Blue, &arena);
        assert_eq!(green.bullets.len(), 5);
        assert!(green.bullets.iter().all(|b| b.target.is_none()));
    }

    #[test]
    fn test_double_shot_with_burst_fires_six() {
        let config = MatchConfig::default();
        let cheats = Cheats {
            burst: true,
            ..Default::default()
        };
        let arena = view(&[], &cheats, &config);
        let (mut blue, _) = tanks();
        blue.double_shot_ticks = 1;

        blue.shoot(TankSlot::Green, &arena);
        assert_eq!(blue.bullets.len(), 6);
    }

    #[test]
    fn test_bullet_hit_damages_opponent() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, mut green) = tanks();
        let hp = green.hp;
        let target = green.center() - Vec2::new(20.0, 6.0);
        blue.bullets.push(Bullet::new(target, Vec2::X, blue.color, None));

        blue.update(&mut green, &arena);
        assert!(blue.bullets.is_empty());
        assert_eq!(green.hp, hp - 1);
    }

    #[test]
    fn test_shield_absorbs_hit_and_consumes_bullet() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, mut green) = tanks();
        green.shield_ticks = 50;
        let hp = green.hp;
        let target = green.center() - Vec2::new(20.0, 6.0);
        blue.bullets.push(Bullet::new(target, Vec2::X, blue.color, None));

        blue.update(&mut green, &arena);
        assert!(blue.bullets.is_empty());
        assert_eq!(green.hp, hp);
    }

    #[test]
    fn test_bullet_removed_on_obstacle_unless_through_walls() {
        let config = MatchConfig::default();
        let wall = [Obstacle::new(Rect::new(300.0, 300.0, 40.0, 300.0))];
        let (mut blue, mut green) = tanks();

        let cheats = Cheats::default();
        let arena = view(&wall, &cheats, &config);
        blue.bullets.push(Bullet::new(Vec2::new(280.0, 440.0), Vec2::X, blue.color, None));
        blue.update(&mut green, &arena);
        assert!(blue.bullets.is_empty());

        let cheats = Cheats {
            through_walls: true,
            ..Default::default()
        };
        let arena = view(&wall, &cheats, &config);
        blue.bullets.push(Bullet::new(Vec2::new(280.0, 440.0), Vec2::X, blue.color, None));
        blue.update(&mut green, &arena);
        assert_eq!(blue.bullets.len(), 1);
    }

    #[test]
    fn test_off_screen_bullet_removed_within_bounded_ticks() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, mut green) = tanks();
        // Heading straight up, away from the opponent
        blue.bullets.push(Bullet::new(Vec2::new(200.0, 300.0), -Vec2::Y, blue.color, None));

        let limit = (300.0 / BULLET_SPEED) as usize + 3;
        for _ in 0..limit {
            blue.update(&mut green, &arena);
        }
        assert!(blue.bullets.is_empty());
    }

    #[test]
    fn test_timers_count_down_to_zero() {
        let config = MatchConfig::default();
        let cheats = Cheats::default();
        let arena = view(&[], &cheats, &config);
        let (mut blue, mut green) = tanks();
        blue.reload_ticks = 1;
        blue.shield_ticks = 2;
        blue.homing_ticks = 1;

        blue.update(&mut green, &arena);
        blue.update(&mut green, &arena);
        blue.update(&mut green, &arena);
        assert_eq!(blue.reload_ticks, 0);
        assert_eq!(blue.shield_ticks, 0);
        assert!(!blue.homing_active());
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let (_, mut green) = tanks();
        green.hp = 1;
        assert!(green.take_hit());
        assert!(green.take_hit());
        assert_eq!(green.hp, 0);
        assert!(green.is_eliminated());
    }
}
