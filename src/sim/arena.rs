//! Arena layouts per difficulty

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Obstacle;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Arena difficulty (selects the obstacle layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Static obstacles for this layout
    pub fn obstacles(&self) -> Vec<Obstacle> {
        let rects: &[(f32, f32, f32, f32)] = match self {
            Difficulty::Easy => &[(460.0, 235.0, 60.0, 280.0)],
            Difficulty::Medium => &[
                (310.0, 160.0, 60.0, 430.0),
                (825.0, 150.0, 75.0, 450.0),
                (562.0, 0.0, 75.0, 225.0),
                (562.0, 675.0, 75.0, 225.0),
            ],
            Difficulty::Hard => &[
                (225.0, 120.0, 75.0, 300.0),
                (300.0, 525.0, 75.0, 300.0),
                (900.0, 120.0, 75.0, 300.0),
                (750.0, 525.0, 75.0, 300.0),
                (450.0, 225.0, 300.0, 30.0),
                (460.0, 650.0, 280.0, 20.0),
                (562.0, 30.0, 75.0, 150.0),
                (562.0, 720.0, 75.0, 150.0),
                (75.0, 412.0, 225.0, 75.0),
                (900.0, 412.0, 225.0, 75.0),
                (562.0, 412.0, 75.0, 75.0),
            ],
        };

        rects
            .iter()
            .map(|&(x, y, w, h)| Obstacle::new(Rect::new(x, y, w, h)))
            .collect()
    }

    /// Tank spawn centers, Blue then Green, for tanks of `size`
    ///
    /// Centers are pulled inward so the whole tank starts inside the arena.
    pub fn spawn_points(&self, size: Vec2) -> [Vec2; 2] {
        let half = size / 2.0;
        let max = (Vec2::new(ARENA_WIDTH, ARENA_HEIGHT) - half).max(half);
        let anchors = match self {
            // Hard puts the tanks in opposite corners, clear of the crossbars
            Difficulty::Hard => [
                Vec2::new(75.0, 100.0),
                Vec2::new(ARENA_WIDTH - 75.0, ARENA_HEIGHT - 100.0),
            ],
            _ => [
                Vec2::new(100.0, ARENA_HEIGHT / 2.0),
                Vec2::new(ARENA_WIDTH - 100.0, ARENA_HEIGHT / 2.0),
            ],
        };
        anchors.map(|anchor| anchor.clamp(half, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MatchConfig, Slider};

    #[test]
    fn test_obstacle_counts() {
        assert_eq!(Difficulty::Easy.obstacles().len(), 1);
        assert_eq!(Difficulty::Medium.obstacles().len(), 4);
        assert_eq!(Difficulty::Hard.obstacles().len(), 11);
    }

    #[test]
    fn test_spawns_are_clear_of_obstacles() {
        let bounds = Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);
        for t in [None, Some(0.0), Some(1.0)] {
            let mut config = MatchConfig::default();
            if let Some(t) = t {
                Slider::Size.write(&mut config, Slider::Size.value_at(t));
            }
            let size = Vec2::new(config.tank_width, config.tank_height);
            for difficulty in Difficulty::ALL {
                let spawns = difficulty.spawn_points(size);
                let tanks = spawns.map(|spawn| Rect::from_center(spawn, size));
                assert!(
                    !tanks[0].intersects(&tanks[1]),
                    "{:?} spawns overlap at {:?}",
                    difficulty,
                    size
                );
                for tank in tanks {
                    assert!(
                        tank.is_within(&bounds),
                        "{:?} spawn out of bounds at {:?}",
                        difficulty,
                        size
                    );
                    for obstacle in difficulty.obstacles() {
                        assert!(
                            !tank.intersects(&obstacle.rect),
                            "{:?} spawn overlaps obstacle at {:?}",
                            difficulty,
                            size
                        );
                    }
                }
            }
        }
    }


    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }
}
