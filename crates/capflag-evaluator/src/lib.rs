//! Reflex policy for capture-the-flag agents.
//!
//! Every turn an agent scores each legal action with a linear evaluation and picks the
//! best one. The crate is layered like this:
//!
//! ```text
//! ReflexAgent (registration, history, seeded tie-breaking)
//!     ↓ uses
//! Action Policy (retreat override, max-score selection, anti-stall rule)
//!     ↓ uses
//! Scorer (Σ featureᵢ × weightᵢ)
//!     ↓ uses
//! Feature Extractor (successor state → named features)  +  Mode Selector + Weight Table
//! ```
//!
//! # Modules
//!
//! - [`feature`] - feature names ([`feature::FeatureId`]), sparse [`feature::FeatureVector`]
//!   and the [`feature::FeatureExtractor`]
//! - [`weights`] - immutable [`weights::WeightTable`]s, one per [`mode::Mode`]
//! - [`mode`] - offense/defense switch driven by the score differential
//! - [`scorer`] - dot product of features and weights
//! - [`side`] - per-team landmarks (home boundary, entrances, points of interest)
//! - [`context`] - borrowed collaborators and the half-cell successor rule
//! - [`action_policy`] - turning scored actions into one decision
//! - [`archetype`] - the two concrete agent policies
//! - [`agent`] - [`agent::ReflexAgent`], the entry point the match loop talks to
//!
//! # Example
//!
//! ```
//! use capflag_engine::{GameState, GridRules, Layout, MazeDistances, Team};
//! use capflag_evaluator::{agent::create_team, side::SideConfig};
//!
//! let layout = Layout::default_capture();
//! let state = GameState::initial(&layout);
//! let rules = GridRules::default();
//! let distances = MazeDistances::new(layout.walls());
//!
//! let [mut attacker, _defender] =
//!     create_team(0, 2, "careful-offense", "defensive", 7).unwrap();
//! let side = SideConfig::default_for(Team::Red, layout.width());
//! attacker.register_initial_state(&state, side).unwrap();
//!
//! let action = attacker.choose_action(&rules, &distances, &state).unwrap();
//! assert!(capflag_engine::CaptureRules::legal_actions(&rules, &state, 0).contains(&action));
//! ```

use capflag_engine::{InvalidActionError, Position, Team, UnreachableError};

pub mod action_policy;
pub mod agent;
pub mod archetype;
pub mod context;
pub mod feature;
pub mod mode;
pub mod scorer;
pub mod side;
pub mod weights;

/// Invalid team or agent configuration, reported before play begins.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("unknown agent archetype '{name}'")]
    UnknownArchetype { name: String },
    #[display("agent {agent} does not exist in a game of {num_agents} agents")]
    AgentOutOfRange { agent: usize, num_agents: usize },
    #[display("agent {agent} plays for {actual} but was configured for {configured}")]
    TeamMismatch {
        agent: usize,
        actual: Team,
        configured: Team,
    },
    #[display("landmark {position} is not an open cell of the maze")]
    LandmarkNotOpen { position: Position },
    #[display("landmark {position} cannot be reached from spawn {spawn}")]
    LandmarkUnreachable { position: Position, spawn: Position },
    #[display("invalid weight table: {_0}")]
    InvalidWeights(serde_json::Error),
}

/// A decision could not be made.
///
/// None of these happen when the agent is registered and only ever sees states produced
/// by the rules it is given; they signal a broken invariant rather than a bad turn.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PolicyError {
    #[display("agent {agent} must register its initial state before choosing actions")]
    NotRegistered { agent: usize },
    #[display("agent {agent} has no legal actions")]
    NoLegalActions { agent: usize },
    #[display("agent {agent} is missing from a state of {num_agents} agents")]
    AgentMissing { agent: usize, num_agents: usize },
    #[display("position of agent {agent} is unknown")]
    OwnPositionUnknown { agent: usize },
    #[from]
    #[display("{_0}")]
    InvalidAction(InvalidActionError),
    #[from]
    #[display("{_0}")]
    Unreachable(UnreachableError),
}
