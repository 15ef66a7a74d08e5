use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Action;

/// A grid cell, addressed as `(column, row)`.
///
/// Row 0 is the bottom row of a layout. Serialized as a two-element array
/// (`[10, 3]`) so that landmark lists stay compact in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn neighbor(self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Point reflection through the center of a `width` x `height` board.
    ///
    /// Capture layouts are symmetric under this mapping, so it turns a red landmark into
    /// the matching blue one.
    #[must_use]
    pub fn mirrored(self, width: usize, height: usize) -> Self {
        let (w, h) = (grid_extent(width), grid_extent(height));
        Self::new(w - 1 - self.x, h - 1 - self.y)
    }
}

fn grid_extent(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A real-valued agent location.
///
/// Agents moving slower than one cell per move spend some turns between two cells. A
/// point is *aligned* when both coordinates are integral; only aligned points interact
/// with food, sides and other agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_aligned(self) -> bool {
        self.x.fract() == 0.0 && self.y.fract() == 0.0
    }

    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn nearest_cell(self) -> Position {
        Position::new(self.x.round() as i32, self.y.round() as i32)
    }

    #[must_use]
    pub fn moved(self, action: Action, speed: f64) -> Self {
        let (dx, dy) = action.delta();
        Self::new(
            self.x + f64::from(dx) * speed,
            self.y + f64::from(dy) * speed,
        )
    }
}

impl From<Position> for Point {
    fn from(pos: Position) -> Self {
        Self::new(f64::from(pos.x), f64::from(pos.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
