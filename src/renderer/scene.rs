//! Match scene drawing
//!
//! Draw order: background, safe-zone ring, obstacles, tanks with their
//! bullets, power-ups, then the outcome banner and menu button on top.

use glam::Vec2;

use super::canvas::Canvas;
use super::colors;
use super::sprite::TankSprite;
use crate::sim::{GameState, MatchOutcome, Rect, Tank};

/// Side length of one health block
const HEALTH_BLOCK: f32 = 20.0;
/// Horizontal pitch between health blocks
const HEALTH_PITCH: f32 = 22.0;
/// Gap between the tank top and the bottom of its health row
const HEALTH_LIFT: f32 = 25.0;
/// Shield ring sits this far outside the tank
const SHIELD_PADDING: f32 = 15.0;
const SHIELD_WIDTH: f32 = 4.0;
const SAFE_ZONE_WIDTH: f32 = 2.0;

const BANNER_TEXT_SIZE: f32 = 48.0;
const HINT_TEXT_SIZE: f32 = 32.0;
const BANNER_PADDING: f32 = 20.0;
const BANNER_BORDER: f32 = 5.0;

/// Top-right "Menu" button
pub const MENU_BUTTON: Rect = Rect::new(crate::consts::ARENA_WIDTH - 80.0, 15.0, 65.0, 30.0);

/// Draw one full frame of a match
pub fn draw_match(state: &GameState, sprites: &[TankSprite; 2], canvas: &mut impl Canvas) {
    canvas.clear(colors::BACKGROUND);

    let zone = &state.safe_zone;
    if zone.visible {
        canvas.stroke_circle(zone.center, zone.radius, SAFE_ZONE_WIDTH, colors::SAFE_ZONE);
    }

    for obstacle in &state.obstacles {
        canvas.fill_rect(obstacle.rect, colors::OBSTACLE);
    }

    for tank in &state.tanks {
        draw_tank(tank, &sprites[tank.slot.index()], canvas);
        for bullet in &tank.bullets {
            canvas.fill_rect(bullet.rect, bullet.color);
        }
    }

    for powerup in state.powerups.iter().filter(|p| p.active) {
        canvas.fill_rect(powerup.rect, powerup.kind.color());
    }

    if let Some(outcome) = state.outcome {
        draw_banner(state, outcome, canvas);
    }

    canvas.fill_rect(MENU_BUTTON, colors::BUTTON);
    canvas.draw_text("Menu", MENU_BUTTON.center(), 24.0, colors::TEXT_DARK);
}

fn draw_tank(tank: &Tank, sprite: &TankSprite, canvas: &mut impl Canvas) {
    match sprite {
        TankSprite::Placeholder { color } => canvas.fill_rect(tank.rect, *color),
        TankSprite::Image { .. } => canvas.draw_sprite(sprite, tank.rect, tank.angle),
    }

    if tank.shield_active() {
        let radius = tank.rect.w.max(tank.rect.h) / 2.0 + SHIELD_PADDING;
        canvas.stroke_circle(tank.center(), radius, SHIELD_WIDTH, colors::SHIELD);
    }

    for block in health_blocks(tank) {
        canvas.fill_rect(block, colors::HEALTH);
    }
}

/// One block per remaining hit point, in a row above the tank
pub fn health_blocks(tank: &Tank) -> impl Iterator<Item = Rect> + '_ {
    let left = tank.rect.left();
    let top = tank.rect.top() - HEALTH_LIFT;
    (0..tank.hp.max(0)).map(move |i| {
        Rect::new(left + i as f32 * HEALTH_PITCH, top, HEALTH_BLOCK, HEALTH_BLOCK)
    })
}

/// Text shown for a finished match
pub fn banner_text(state: &GameState, outcome: MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Draw => "Draw!".to_string(),
        MatchOutcome::Winner(slot) => format!("{} Tank Wins!", state.tank(slot).name),
    }
}

fn draw_banner(state: &GameState, outcome: MatchOutcome, canvas: &mut impl Canvas) {
    let text = banner_text(state, outcome);
    let fill = match outcome {
        MatchOutcome::Draw => colors::BANNER_DRAW,
        MatchOutcome::Winner(_) => colors::BANNER_WIN,
    };

    let center = state.bounds.center();
    // Rough glyph metrics; the backend lays out the real text
    let text_size = Vec2::new(
        text.chars().count() as f32 * BANNER_TEXT_SIZE * 0.5,
        BANNER_TEXT_SIZE,
    );
    let inner = Rect::from_center(center, text_size + Vec2::splat(BANNER_PADDING * 2.0));
    let outer = Rect::from_center(center, inner.size() + Vec2::splat(BANNER_BORDER * 2.0));

    canvas.fill_rect(outer, colors::BANNER_BORDER);
    canvas.fill_rect(inner, fill);
    canvas.draw_text(&text, center, BANNER_TEXT_SIZE, colors::TEXT_LIGHT);
    canvas.draw_text(
        "Press R to Restart",
        center + Vec2::new(0.0, 60.0),
        HINT_TEXT_SIZE,
        colors::TEXT_HINT,
    );
    canvas.draw_text(
        "Press ESC for Menu",
        center + Vec2::new(0.0, 100.0),
        HINT_TEXT_SIZE,
        colors::TEXT_HINT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::{CommandList, DrawCommand};
    use crate::sim::{MatchSetup, Powerup, PowerupKind, TankSlot};

    fn placeholders() -> [TankSprite; 2] {
        TankSlot::BOTH.map(|slot| TankSprite::Placeholder {
            color: slot.color(),
        })
    }

    fn new_state() -> GameState {
        GameState::new(
            1,
            MatchSetup {
                names: ["Alice".to_string(), "Bob".to_string()],
                ..Default::default()
            },
        )
    }

    fn fills_of(list: &CommandList, color: [u8; 3]) -> Vec<Rect> {
        list.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let mut list = CommandList::new();
        draw_match(&new_state(), &placeholders(), &mut list);
        assert_eq!(list.commands.first(), Some(&DrawCommand::Clear(colors::BACKGROUND)));
    }

    #[test]
    fn test_health_blocks_match_hp() {
        let mut state = new_state();
        state.tanks[0].hp = 3;
        let blocks: Vec<Rect> = health_blocks(&state.tanks[0]).collect();

        assert_eq!(blocks.len(), 3);
        let tank = &state.tanks[0].rect;
        assert_eq!(blocks[0].x, tank.left());
        assert_eq!(blocks[1].x - blocks[0].x, HEALTH_PITCH);
        assert_eq!(blocks[0].y, tank.top() - HEALTH_LIFT);

        let mut list = CommandList::new();
        draw_match(&state, &placeholders(), &mut list);
        // 3 for Blue + 10 for Green
        assert_eq!(fills_of(&list, colors::HEALTH).len(), 13);
    }

    #[test]
    fn test_safe_zone_ring_only_when_visible() {
        let mut state = new_state();
        let mut list = CommandList::new();
        draw_match(&state, &placeholders(), &mut list);
        assert!(!list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::StrokeCircle { color, .. } if *color == colors::SAFE_ZONE
        )));

        state.safe_zone.begin_shrinking();
        list.reset();
        draw_match(&state, &placeholders(), &mut list);
        assert!(list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::StrokeCircle { color, .. } if *color == colors::SAFE_ZONE
        )));
    }

    #[test]
    fn test_shield_ring_drawn() {
        let mut state = new_state();
        state.tanks[1].shield_ticks = 10;
        let mut list = CommandList::new();
        draw_match(&state, &placeholders(), &mut list);

        let rings: Vec<f32> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeCircle { radius, color, .. } if *color == colors::SHIELD => {
                    Some(*radius)
                }
                _ => None,
            })
            .collect();
        assert_eq!(rings, [75.0 / 2.0 + SHIELD_PADDING]);
    }

    #[test]
    fn test_claimed_powerups_hidden() {
        let mut state = new_state();
        state.powerups.push(Powerup::new(PowerupKind::Shield, Vec2::new(500.0, 100.0)));
        let mut claimed = Powerup::new(PowerupKind::DoubleShot, Vec2::new(600.0, 100.0));
        claimed.active = false;
        state.powerups.push(claimed);

        let mut list = CommandList::new();
        draw_match(&state, &placeholders(), &mut list);
        assert_eq!(fills_of(&list, PowerupKind::Shield.color()).len(), 1);
        assert!(fills_of(&list, PowerupKind::DoubleShot.color()).is_empty());
    }

    #[test]
    fn test_banner_text() {
        let mut state = new_state();
        let mut list = CommandList::new();
        draw_match(&state, &placeholders(), &mut list);
        assert!(!list.texts().any(|t| t.contains("Restart")));

        state.outcome = Some(MatchOutcome::Winner(TankSlot::Green));
        list.reset();
        draw_match(&state, &placeholders(), &mut list);
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Bob Tank Wins!"));
        assert!(texts.contains(&"Press R to Restart"));
        assert!(texts.contains(&"Press ESC for Menu"));

        assert_eq!(banner_text(&state, MatchOutcome::Draw), "Draw!");
    }

    #[test]
    fn test_image_sprite_is_rotated() {
        let mut state = new_state();
        state.tanks[0].angle = 90.0;
        let sprites = [
            TankSprite::Image {
                path: "Player1_tank.png".into(),
                bytes: vec![1, 2, 3],
            },
            TankSprite::Placeholder { color: [0, 255, 0] },
        ];
        let mut list = CommandList::new();
        draw_match(&state, &sprites, &mut list);

        let sprite_calls: Vec<&DrawCommand> = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .collect();
        assert_eq!(sprite_calls.len(), 1);
        assert!(matches!(
            sprite_calls[0],
            DrawCommand::Sprite { angle, .. } if *angle == 90.0
        ));
    }
}
