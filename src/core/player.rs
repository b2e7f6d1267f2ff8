use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Collectible, PlayArea, Position, COLLISION_RADIUS};

/// A movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a browser `KeyboardEvent.code` to a direction
    ///
    /// WASD and the arrow keys are recognised. Any other key counts as `Up`.
    pub fn from_key_code(code: &str) -> Self {
        match code {
            "KeyW" | "ArrowUp" => Direction::Up,
            "KeyS" | "ArrowDown" => Direction::Down,
            "KeyA" | "ArrowLeft" => Direction::Left,
            "KeyD" | "ArrowRight" => Direction::Right,
            _ => Direction::Up,
        }
    }
}

/// Unrecognised names fall back to `Up` instead of failing
impl From<&str> for Direction {
    fn from(name: &str) -> Self {
        match name {
            "Down" => Direction::Down,
            "Left" => Direction::Left,
            "Right" => Direction::Right,
            _ => Direction::Up,
        }
    }
}

/// Represents a player on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Connection identity, also the key in the shared players map
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub score: u32,
    /// Color token taken from the pool at join time
    pub color: String,
}

impl Player {
    /// Create a player at a random spot inside the play area with a zero score
    pub fn spawn<R: Rng>(
        id: String,
        color: String,
        area: &PlayArea,
        rng: &mut R,
    ) -> Self {
        let position = area.random_position(rng);
        Self {
            id,
            x: position.x,
            y: position.y,
            score: 0,
            color,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Move the player in place
    ///
    /// # Returns
    ///
    /// True if the position changed
    pub fn move_player(&mut self, direction: Direction, speed: i32, area: &PlayArea) -> bool {
        let (next, moved) = step(self.position(), direction, speed, area);
        self.x = next.x;
        self.y = next.y;
        moved
    }

    /// Whether this player is close enough to pick up the coin
    pub fn collision(&self, coin: &Collectible) -> bool {
        collides(self.position(), coin.position(), COLLISION_RADIUS)
    }

    /// Rank of this player's score among `scores` (1 is best)
    pub fn calculate_rank(&self, scores: &[u32]) -> Option<usize> {
        rank(self.score, scores)
    }
}

/// Compute where a movement intent lands
///
/// The candidate position is computed with saturating arithmetic and then
/// clamped to the play area.
///
/// # Returns
///
/// The new position and whether it differs from the starting one
pub fn step(
    from: Position,
    direction: Direction,
    distance: i32,
    area: &PlayArea,
) -> (Position, bool) {
    let candidate = match direction {
        Direction::Up => Position::new(from.x, from.y.saturating_sub(distance)),
        Direction::Down => Position::new(from.x, from.y.saturating_add(distance)),
        Direction::Left => Position::new(from.x.saturating_sub(distance), from.y),
        Direction::Right => Position::new(from.x.saturating_add(distance), from.y),
    };

    let next = area.clamp(candidate);
    (next, next != from)
}

/// True iff the Euclidean distance between `a` and `b` is strictly below `radius`
pub fn collides(a: Position, b: Position, radius: f64) -> bool {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy) < radius
}

/// Positional rank of `score` among `scores`
///
/// Scores are sorted descending and the 1-based index of the first equal
/// score is returned, so tied players share the best rank of the tie and
/// the next distinct score skips ahead (`[50, 30, 30, 10]` ranks 10 as 4th).
///
/// # Returns
///
/// None when `score` does not occur in `scores`
pub fn rank(score: u32, scores: &[u32]) -> Option<usize> {
    let mut sorted = scores.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().position(|&s| s == score).map(|index| index + 1)
}
