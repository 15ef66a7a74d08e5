use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Legal actions for one agent; there are never more than five.
pub type ActionSet = ArrayVec<Action, { Action::LEN }>;

/// A move on the grid, or [`Action::Stop`] to stay in place.
///
/// Actions double as facing directions: an agent faces the way it last moved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

impl Action {
    pub const LEN: usize = 5;

    /// Every action in the order the rules enumerate them.
    pub const ALL: [Self; Self::LEN] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Stop,
    ];

    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Stop => Self::Stop,
        }
    }

    /// Unit displacement as `(dx, dy)`, with north pointing to larger rows.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::Stop => (0, 0),
        }
    }

    #[must_use]
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}
