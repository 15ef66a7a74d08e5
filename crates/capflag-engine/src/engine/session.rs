use serde::{Deserialize, Serialize};

use crate::{
    InvalidActionError,
    core::{Action, Team},
};

use super::{
    game_state::GameState,
    layout::Layout,
    observation::{SIGHT_RANGE, observe},
    rules::CaptureRules,
};

/// A team wins once at most this much of the opponent's food is left uncollected.
pub const MIN_FOOD: usize = 2;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchState {
    Playing,
    /// `team` collected all but [`MIN_FOOD`] of the opponent's food.
    Won { team: Team },
    /// The move limit ran out.
    TimeUp,
}

/// Runs a match: agents act in index order until a team wins or the move limit is hit.
#[derive(Debug, Clone)]
pub struct MatchSession<R> {
    rules: R,
    state: GameState,
    max_moves: usize,
    match_state: MatchState,
}

impl<R> MatchSession<R>
where
    R: CaptureRules,
{
    #[must_use]
    pub fn new(rules: R, layout: &Layout, max_moves: usize) -> Self {
        Self {
            rules,
            state: GameState::initial(layout),
            max_moves,
            match_state: MatchState::Playing,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn match_state(&self) -> MatchState {
        self.match_state
    }

    /// Index of the agent whose turn it is.
    #[must_use]
    pub fn current_agent(&self) -> usize {
        self.state.move_count() % self.state.num_agents()
    }

    /// What the current agent perceives.
    #[must_use]
    pub fn observation(&self) -> GameState {
        observe(&self.state, self.current_agent(), SIGHT_RANGE)
    }

    /// Applies the current agent's action and updates the match state.
    pub fn step(&mut self, action: Action) -> Result<MatchState, InvalidActionError> {
        debug_assert!(self.match_state.is_playing());
        let agent = self.current_agent();
        self.state = self.rules.successor(&self.state, agent, action)?;
        self.match_state = self.evaluate_match_state();
        Ok(self.match_state)
    }

    fn evaluate_match_state(&self) -> MatchState {
        for team in [Team::Red, Team::Blue] {
            let outstanding =
                self.state.food_to_eat(team).len() + self.state.num_carried_by(team);
            if outstanding <= MIN_FOOD {
                return MatchState::Won { team };
            }
        }
        if self.state.move_count() >= self.max_moves {
            return MatchState::TimeUp;
        }
        MatchState::Playing
    }
}
