use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{BASE_X, BASE_Y, MAX_OFFSET_X, MAX_OFFSET_Y};

/// A point on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangular region every player and coin must stay inside
///
/// Spans `[base_x, base_x + max_offset_x] × [base_y, base_y + max_offset_y]`,
/// both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayArea {
    pub base_x: i32,
    pub base_y: i32,
    pub max_offset_x: i32,
    pub max_offset_y: i32,
}

impl PlayArea {
    pub fn min_x(&self) -> i32 {
        self.base_x
    }

    pub fn max_x(&self) -> i32 {
        self.base_x.saturating_add(self.max_offset_x)
    }

    pub fn min_y(&self) -> i32 {
        self.base_y
    }

    pub fn max_y(&self) -> i32 {
        self.base_y.saturating_add(self.max_offset_y)
    }

    /// Whether the position lies inside the board (edges included)
    pub fn contains(&self, position: Position) -> bool {
        (self.min_x()..=self.max_x()).contains(&position.x)
            && (self.min_y()..=self.max_y()).contains(&position.y)
    }

    /// Pull a position back onto the board
    pub fn clamp(&self, position: Position) -> Position {
        Position {
            x: position.x.clamp(self.min_x(), self.max_x()),
            y: position.y.clamp(self.min_y(), self.max_y()),
        }
    }

    /// Uniformly random in-bounds position
    pub fn random_position<R: Rng>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(self.min_x()..=self.max_x()),
            y: rng.gen_range(self.min_y()..=self.max_y()),
        }
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            base_x: BASE_X,
            base_y: BASE_Y,
            max_offset_x: MAX_OFFSET_X,
            max_offset_y: MAX_OFFSET_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let area = PlayArea::default();

        assert_eq!(area.min_x(), 25);
        assert_eq!(area.max_x(), 615);
        assert_eq!(area.min_y(), 70);
        assert_eq!(area.max_y(), 455);
    }

    #[test]
    fn test_contains_edges() {
        let area = PlayArea::default();

        assert!(area.contains(Position::new(25, 70)));
        assert!(area.contains(Position::new(615, 455)));
        assert!(!area.contains(Position::new(24, 70)));
        assert!(!area.contains(Position::new(25, 456)));
    }

    #[test]
    fn test_clamp() {
        let area = PlayArea::default();

        assert_eq!(area.clamp(Position::new(-500, 1000)), Position::new(25, 455));
        assert_eq!(area.clamp(Position::new(300, 200)), Position::new(300, 200));
    }

    #[test]
    fn test_random_position_in_bounds() {
        let area = PlayArea::default();
        let mut rng = rand::thread_rng();

        for _ in 0..1000 {
            assert!(area.contains(area.random_position(&mut rng)));
        }
    }
}
