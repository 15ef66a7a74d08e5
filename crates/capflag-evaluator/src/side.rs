//! Per-team landmarks.
//!
//! Which half an agent defends, and the strategic cells it uses, are configured once at
//! registration. Feature extraction never infers them from the state.

use capflag_engine::{GameState, Position, Team, reachable_cells};
use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// Entrances a red attacker measures against on the default 32x18 layout.
pub const RED_ENTRANCES: [Position; 3] = [
    Position::new(10, 3),
    Position::new(12, 6),
    Position::new(12, 12),
];

/// Points of interest a red defender patrols on the default 32x18 layout.
pub const RED_POINTS_OF_INTEREST: [Position; 3] = [
    Position::new(10, 3),
    Position::new(12, 6),
    Position::new(12, 12),
];

pub const BLUE_ENTRANCES: [Position; 3] = [
    Position::new(20, 14),
    Position::new(20, 6),
    Position::new(20, 2),
];

pub const BLUE_POINTS_OF_INTEREST: [Position; 3] = [
    Position::new(20, 11),
    Position::new(18, 7),
    Position::new(18, 3),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideConfig {
    team: Team,
    home_column: i32,
    entrances: Vec<Position>,
    points_of_interest: Vec<Position>,
}

impl SideConfig {
    #[must_use]
    pub fn new(
        team: Team,
        home_column: i32,
        entrances: Vec<Position>,
        points_of_interest: Vec<Position>,
    ) -> Self {
        Self {
            team,
            home_column,
            entrances,
            points_of_interest,
        }
    }

    /// Hand-placed landmarks for `team`, tuned for the default capture layout.
    ///
    /// The home column is the column of `team`'s half next to the midline.
    #[must_use]
    pub fn default_for(team: Team, width: usize) -> Self {
        let (entrances, points) = match team {
            Team::Red => (RED_ENTRANCES, RED_POINTS_OF_INTEREST),
            Team::Blue => (BLUE_ENTRANCES, BLUE_POINTS_OF_INTEREST),
        };
        Self::new(
            team,
            team.boundary_column(width),
            entrances.to_vec(),
            points.to_vec(),
        )
    }

    /// The same configuration seen from the other team on a point-symmetric board.
    #[must_use]
    pub fn mirrored(&self, width: usize, height: usize) -> Self {
        let mirror = |cells: &[Position]| {
            cells
                .iter()
                .map(|p| p.mirrored(width, height))
                .collect::<Vec<_>>()
        };
        let column = Position::new(self.home_column, 0).mirrored(width, height).x;
        Self::new(
            self.team.opponent(),
            column,
            mirror(&self.entrances),
            mirror(&self.points_of_interest),
        )
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    #[must_use]
    pub fn home_column(&self) -> i32 {
        self.home_column
    }

    #[must_use]
    pub fn entrances(&self) -> &[Position] {
        &self.entrances
    }

    #[must_use]
    pub fn points_of_interest(&self) -> &[Position] {
        &self.points_of_interest
    }

    /// Checks that every landmark is an open cell of `state`'s maze reachable from `spawn`.
    pub fn validate(&self, state: &GameState, spawn: Position) -> Result<(), ConfigurationError> {
        let reachable = reachable_cells(state.walls(), spawn);
        for position in self.entrances.iter().chain(&self.points_of_interest).copied() {
            if state.is_wall(position) {
                return Err(ConfigurationError::LandmarkNotOpen { position });
            }
            if reachable.get(position) != Some(&true) {
                return Err(ConfigurationError::LandmarkUnreachable { position, spawn });
            }
        }
        Ok(())
    }
}
