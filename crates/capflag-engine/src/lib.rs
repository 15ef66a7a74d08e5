//! Game model for grid-based capture-the-flag matches.
//!
//! The crate holds everything the agent policy consumes but does not own:
//!
//! - [`core`] - value types ([`Position`], [`Point`], [`Action`], [`Team`], [`Grid`])
//! - [`engine`] - layouts, the immutable [`GameState`], the [`CaptureRules`] boundary with
//!   its reference implementation [`GridRules`], the [`DistanceOracle`] boundary with the
//!   BFS-backed [`MazeDistances`], perception ([`observe`]) and [`MatchSession`]

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// An action that is not currently legal was handed to the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("action {action} is not legal for agent {agent}")]
pub struct InvalidActionError {
    pub agent: usize,
    pub action: Action,
}

/// The distance oracle was asked about a pair of cells with no path between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no path between {from} and {to}")]
pub struct UnreachableError {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LayoutError {
    #[display("layout is empty")]
    Empty,
    #[display("layout row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[display("unexpected character {ch:?} at column {column}, row {row}")]
    UnexpectedChar { ch: char, column: usize, row: usize },
    #[display("spawn for agent {agent} appears more than once")]
    DuplicateSpawn { agent: usize },
    #[display("layout has no spawn for agent {agent}")]
    MissingSpawn { agent: usize },
}
