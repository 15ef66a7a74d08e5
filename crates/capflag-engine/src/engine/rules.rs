//! Legal moves and successor states.
//!
//! [`CaptureRules`] is the boundary the agent policy programs against. [`GridRules`] is
//! a compact reference implementation:
//!
//! 1. **Legal actions** - every direction whose neighbouring cell is open, then
//!    [`Action::Stop`]. An agent caught between two cells may only keep going.
//! 2. **Movement** - the agent moves `speed` cells; stopping keeps the facing direction.
//! 3. **Cell events** (aligned agents only) - side switch, eating opponent food,
//!    returning carried food home for points, pacman/ghost collisions.
//!
//! A captured pacman respawns and its carried food goes back to where it was eaten.

use std::fmt;

use crate::{
    InvalidActionError,
    core::{Action, ActionSet, Point},
};

use super::game_state::GameState;

/// Movement rules of a match.
pub trait CaptureRules: fmt::Debug + Send + Sync {
    /// Actions agent `agent` may take in `state`, in a fixed enumeration order.
    ///
    /// Non-empty for every agent of a live match.
    fn legal_actions(&self, state: &GameState, agent: usize) -> ActionSet;

    /// State after agent `agent` takes `action`.
    ///
    /// Deterministic for legal input; fails when `action` is not in
    /// [`CaptureRules::legal_actions`].
    fn successor(
        &self,
        state: &GameState,
        agent: usize,
        action: Action,
    ) -> Result<GameState, InvalidActionError>;
}

/// Reference rules for grid matches.
#[derive(Debug, Clone, Copy)]
pub struct GridRules {
    speed: f64,
}

impl Default for GridRules {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl GridRules {
    /// Rules where each move covers `speed` cells.
    ///
    /// `speed` must divide one cell evenly (`1.0`, `0.5`, `0.25`, ...), otherwise agents
    /// never become aligned again.
    #[must_use]
    pub fn with_speed(speed: f64) -> Self {
        Self { speed }
    }

    fn resolve_cell_events(state: &mut GameState, agent: usize, position: Point) {
        let cell = position.nearest_cell();
        let team = state.agent(agent).team();
        let is_pacman = !state.is_home(team, cell);
        state.agent_mut(agent).set_pacman(is_pacman);

        if is_pacman {
            if state.take_food(cell) {
                state.agent_mut(agent).pick_up(cell);
            }
        } else if state.agent(agent).num_carrying() > 0 {
            let returned = state.agent_mut(agent).drop_carried();
            state.add_score(team, i32::try_from(returned.len()).unwrap_or(i32::MAX));
            tracing::trace!(agent, returned = returned.len(), "food returned home");
        }

        let collided = state
            .opponents(team)
            .filter(|other| {
                other
                    .position()
                    .is_some_and(|p| p.is_aligned() && p.nearest_cell() == cell)
            })
            .map(|other| (other.index(), other.is_pacman()))
            .collect::<Vec<_>>();
        for (other, other_is_pacman) in collided {
            if is_pacman && !other_is_pacman {
                Self::capture(state, agent);
                break;
            }
            if !is_pacman && other_is_pacman {
                Self::capture(state, other);
            }
        }
    }

    fn capture(state: &mut GameState, victim: usize) {
        let carried = state.agent_mut(victim).drop_carried();
        state.restore_food(&carried);
        state.agent_mut(victim).respawn();
        tracing::trace!(victim, restored = carried.len(), "pacman captured");
    }
}

impl CaptureRules for GridRules {
    fn legal_actions(&self, state: &GameState, agent: usize) -> ActionSet {
        let me = state.agent(agent);
        let mut actions = ActionSet::new();
        let Some(position) = me.position() else {
            actions.push(Action::Stop);
            return actions;
        };
        if !position.is_aligned() {
            actions.push(me.direction());
            return actions;
        }
        let cell = position.nearest_cell();
        for action in Action::ALL {
            if action.is_stop() || !state.is_wall(cell.neighbor(action)) {
                actions.push(action);
            }
        }
        actions
    }

    fn successor(
        &self,
        state: &GameState,
        agent: usize,
        action: Action,
    ) -> Result<GameState, InvalidActionError> {
        if !self.legal_actions(state, agent).contains(&action) {
            return Err(InvalidActionError { agent, action });
        }

        let mut next = state.clone();
        next.advance_move_count();
        let Some(position) = state.agent(agent).position() else {
            return Ok(next);
        };

        let moved = position.moved(action, self.speed);
        let me = next.agent_mut(agent);
        me.set_position(Some(moved));
        if !action.is_stop() {
            me.set_direction(action);
        }
        if moved.is_aligned() {
            Self::resolve_cell_events(&mut next, agent, moved);
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use crate::{core::Position, engine::Layout};

    use super::*;

    const CORRIDOR: &str = "\
%%%%%%%%%%
%1  ..  2%
%%%%%%%%%%
";

    fn corridor() -> GameState {
        GameState::initial(&Layout::parse(CORRIDOR).unwrap())
    }

    #[test]
    fn test_legal_actions_respect_walls() {
        let state = corridor();
        let actions = GridRules::default().legal_actions(&state, 0);
        assert_eq!(actions.as_slice(), &[Action::East, Action::Stop]);
    }

    #[test]
    fn test_illegal_action_is_rejected() {
        let state = corridor();
        let err = GridRules::default()
            .successor(&state, 0, Action::North)
            .unwrap_err();
        assert_eq!(
            err,
            InvalidActionError {
                agent: 0,
                action: Action::North
            }
        );
    }

    #[test]
    fn test_stop_keeps_facing() {
        let rules = GridRules::default();
        let state = rules.successor(&corridor(), 0, Action::East).unwrap();
        let state = rules.successor(&state, 0, Action::Stop).unwrap();
        assert_eq!(state.agent(0).direction(), Action::East);
        assert_eq!(state.move_count(), 2);
    }

    #[test]
    fn test_half_speed_commits_to_direction() {
        let rules = GridRules::with_speed(0.5);
        let state = rules.successor(&corridor(), 0, Action::East).unwrap();
        let position = state.agent_position(0).unwrap();
        assert!(!position.is_aligned());
        assert_eq!(
            rules.legal_actions(&state, 0).as_slice(),
            &[Action::East]
        );
        let state = rules.successor(&state, 0, Action::East).unwrap();
        assert_eq!(
            state.agent_position(0).unwrap().nearest_cell(),
            Position::new(2, 1)
        );
    }

    #[test]
    fn test_eat_and_return_food() {
        let rules = GridRules::default();
        let mut state = corridor().with_agent_at(0, Position::new(4, 1));
        // Column 5 is blue's half on a 10 wide board.
        state = rules.successor(&state, 0, Action::East).unwrap();
        assert!(state.agent(0).is_pacman());
        assert_eq!(state.agent(0).num_carrying(), 1);
        state = rules.successor(&state, 0, Action::West).unwrap();
        assert!(!state.agent(0).is_pacman());
        assert_eq!(state.agent(0).num_carrying(), 0);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_captured_pacman_respawns_and_restores_food() {
        let rules = GridRules::default();
        let state = corridor()
            .with_agent_at(0, Position::new(5, 1))
            .with_agent_carrying(0, [Position::new(5, 1)])
            .with_agent_at(1, Position::new(7, 1));
        let state = rules.successor(&state, 0, Action::East).unwrap();
        assert_eq!(state.agent_position(0).unwrap().nearest_cell(), Position::new(6, 1));
        let state = rules.successor(&state, 1, Action::West).unwrap();
        assert_eq!(
            state.agent_position(0).unwrap().nearest_cell(),
            Position::new(1, 1)
        );
        assert_eq!(state.agent(0).num_carrying(), 0);
        assert!(state.has_food(Position::new(5, 1)));
        assert_eq!(state.score(), 0);
    }
}
