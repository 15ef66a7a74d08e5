//! Game state and the collaborators the agent policy consumes.
//!
//! - [`Layout`] - parsed maze: walls, initial food, spawn cells
//! - [`GameState`] / [`AgentState`] - immutable snapshot of a match
//! - [`CaptureRules`] - legal actions and successor states; [`GridRules`] implements it
//! - [`DistanceOracle`] - maze distances; [`MazeDistances`] implements it by BFS
//! - [`observe`] - what one agent can see of a state
//! - [`MatchSession`] - turn order, move limit and end-of-match detection
//!
//! # Example
//!
//! ```
//! use capflag_engine::{Action, CaptureRules as _, GameState, GridRules, Layout};
//!
//! let layout = Layout::default_capture();
//! let state = GameState::initial(&layout);
//! let rules = GridRules::default();
//!
//! let actions = rules.legal_actions(&state, 0);
//! assert!(actions.contains(&Action::Stop));
//!
//! let next = rules.successor(&state, 0, actions[0]).unwrap();
//! assert_eq!(next.move_count(), 1);
//! ```

pub use self::{
    distances::*, game_state::*, layout::*, observation::*, rules::*, session::*,
};

mod distances;
mod game_state;
mod layout;
mod observation;
mod rules;
mod session;
