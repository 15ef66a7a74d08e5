//! Action selection: turning scored actions into one decision per turn.
//!
//! # How It Works
//!
//! Each turn runs in one of two states:
//!
//! - [`PolicyState::Retreat`] - entered when at most [`RETREAT_FOOD_LEFT`] food is left
//!   to collect or the agent carries more than [`RETREAT_CARRYING`]. The action whose
//!   successor is closest (maze distance) to the spawn wins; ties go to the first action
//!   in the rules' enumeration order. Scores are not computed at all.
//! - [`PolicyState::Normal`] - every legal action is scored with the mode's weight table
//!   and one of the best-scoring actions is picked uniformly at random.
//!
//! Nothing carries over between turns: the state is re-derived on every call.
//!
//! # Anti-stall Rule
//!
//! Agents that pick [`Action::Stop`] while other moves exist tend to freeze in place.
//! When the random pick is `Stop` and some other legal action exists, `Stop` is dropped
//! and the pick is redrawn once: among the other best-scoring actions if there are any,
//! otherwise among all other legal actions.
//!
//! # Design: Greedy One-Step Lookahead
//!
//! Only the immediate successor of each action is inspected. This keeps a turn to a
//! handful of successor computations and distance lookups, at the cost of any
//! multi-move planning.

use capflag_engine::{Action, AgentState, GameState, Position, Team};
use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    PolicyError,
    archetype::Archetype,
    context::DecisionContext,
    feature::{FeatureExtractor, FeatureVector},
    mode::{Mode, ModeSelector},
    scorer,
    weights::ModeWeights,
};

/// Retreat once the food left to collect drops to this many.
pub const RETREAT_FOOD_LEFT: usize = 2;

/// Retreat once the agent carries more than this many.
pub const RETREAT_CARRYING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum PolicyState {
    Normal,
    Retreat,
}

impl PolicyState {
    /// An agent missing from `state` counts as carrying nothing.
    #[must_use]
    pub fn for_turn(state: &GameState, agent: usize, team: Team) -> Self {
        let food_left = state.food_to_eat(team).len();
        let carrying = state.get_agent(agent).map_or(0, AgentState::num_carrying);
        if food_left <= RETREAT_FOOD_LEFT || carrying > RETREAT_CARRYING {
            Self::Retreat
        } else {
            Self::Normal
        }
    }
}

/// Score breakdown of one candidate action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvaluation {
    pub action: Action,
    pub mode: Mode,
    pub features: FeatureVector,
    pub score: f64,
}

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub state: PolicyState,
    /// Scored candidates; empty when retreating.
    pub evaluations: Vec<ActionEvaluation>,
}

/// A mode selector, a feature extractor and weight tables composed into a policy.
#[derive(Debug)]
pub struct ReflexPolicy {
    archetype: Archetype,
    mode_selector: Box<dyn ModeSelector>,
    extractor: FeatureExtractor,
    weights: ModeWeights,
}

impl ReflexPolicy {
    #[must_use]
    pub fn new(
        archetype: Archetype,
        mode_selector: Box<dyn ModeSelector>,
        extractor: FeatureExtractor,
        weights: ModeWeights,
    ) -> Self {
        Self {
            archetype,
            mode_selector,
            extractor,
            weights,
        }
    }

    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    #[must_use]
    pub fn mode(&self, ctx: &DecisionContext<'_>, state: &GameState) -> Mode {
        self.mode_selector
            .select_mode(state.score_differential(ctx.team()))
    }

    pub fn evaluate(
        &self,
        ctx: &DecisionContext<'_>,
        state: &GameState,
        action: Action,
        mode: Mode,
    ) -> Result<ActionEvaluation, PolicyError> {
        let features = self.extractor.extract(ctx, state, action, mode)?;
        let score = scorer::score(&features, self.weights.for_mode(mode));
        Ok(ActionEvaluation {
            action,
            mode,
            features,
            score,
        })
    }

    /// Scores every action in `actions` under this turn's mode.
    pub fn evaluate_actions(
        &self,
        ctx: &DecisionContext<'_>,
        state: &GameState,
        actions: &[Action],
    ) -> Result<Vec<ActionEvaluation>, PolicyError> {
        let mode = self.mode(ctx, state);
        actions
            .iter()
            .map(|action| self.evaluate(ctx, state, *action, mode))
            .collect()
    }

    /// Picks one of `actions` (the legal actions, in enumeration order).
    pub fn decide<R>(
        &self,
        ctx: &DecisionContext<'_>,
        state: &GameState,
        spawn: Position,
        actions: &[Action],
        rng: &mut R,
    ) -> Result<Decision, PolicyError>
    where
        R: Rng + ?Sized,
    {
        let policy_state = PolicyState::for_turn(state, ctx.agent, ctx.team());
        if policy_state.is_retreat() {
            let action = retreat_action(ctx, state, spawn, actions)?;
            return Ok(Decision {
                action,
                state: policy_state,
                evaluations: vec![],
            });
        }

        let evaluations = self.evaluate_actions(ctx, state, actions)?;
        let best = best_actions(&evaluations);
        let action = break_tie(rng, &best, actions)
            .ok_or(PolicyError::NoLegalActions { agent: ctx.agent })?;
        Ok(Decision {
            action,
            state: policy_state,
            evaluations,
        })
    }
}

/// Actions sharing the maximum score, in evaluation order.
///
/// Only exactly equal scores tie.
#[must_use]
#[expect(clippy::float_cmp)]
pub fn best_actions(evaluations: &[ActionEvaluation]) -> Vec<Action> {
    let max = evaluations
        .iter()
        .map(|e| e.score)
        .fold(f64::NEG_INFINITY, f64::max);
    evaluations
        .iter()
        .filter(|e| e.score == max)
        .map(|e| e.action)
        .collect()
}

/// The action whose successor is closest to `spawn`; the first one wins ties.
pub fn retreat_action(
    ctx: &DecisionContext<'_>,
    state: &GameState,
    spawn: Position,
    actions: &[Action],
) -> Result<Action, PolicyError> {
    let mut best: Option<(Action, u32)> = None;
    for action in actions {
        let successor = ctx.successor(state, *action)?;
        let cell = ctx.own_cell(&successor)?;
        let distance = ctx.distances.maze_distance(spawn, cell)?;
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((*action, distance));
        }
    }
    best.map(|(action, _)| action)
        .ok_or(PolicyError::NoLegalActions { agent: ctx.agent })
}

/// Uniform pick among `best`, redrawn once when it lands on [`Action::Stop`].
///
/// Returns `None` only when `best` is empty.
pub fn break_tie<R>(rng: &mut R, best: &[Action], legal: &[Action]) -> Option<Action>
where
    R: Rng + ?Sized,
{
    let choice = *best.choose(rng)?;
    if !choice.is_stop() {
        return Some(choice);
    }
    let moving_best = without_stop(best);
    let remainder = if moving_best.is_empty() {
        without_stop(legal)
    } else {
        moving_best
    };
    Some(remainder.choose(rng).copied().unwrap_or(Action::Stop))
}

fn without_stop(actions: &[Action]) -> Vec<Action> {
    actions.iter().copied().filter(|a| !a.is_stop()).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_best_actions_keeps_all_ties() {
        let evaluations = [(Action::North, 1.0), (Action::South, 3.0), (Action::East, 3.0)]
            .into_iter()
            .map(|(action, score)| ActionEvaluation {
                action,
                mode: Mode::Offense,
                features: FeatureVector::new(),
                score,
            })
            .collect::<Vec<_>>();
        assert_eq!(best_actions(&evaluations), vec![Action::South, Action::East]);
    }

    #[test]
    fn test_break_tie_never_stops_when_a_move_ties() {
        let mut rng = Pcg32::seed_from_u64(0);
        let best = [Action::Stop, Action::East];
        let legal = [Action::East, Action::West, Action::Stop];
        for _ in 0..200 {
            assert_eq!(break_tie(&mut rng, &best, &legal), Some(Action::East));
        }
    }

    #[test]
    fn test_break_tie_leaves_stop_for_any_other_legal_move() {
        let mut rng = Pcg32::seed_from_u64(1);
        let legal = [Action::North, Action::Stop];
        for _ in 0..50 {
            assert_eq!(break_tie(&mut rng, &[Action::Stop], &legal), Some(Action::North));
        }
    }

    #[test]
    fn test_break_tie_keeps_stop_when_stuck() {
        let mut rng = Pcg32::seed_from_u64(2);
        assert_eq!(
            break_tie(&mut rng, &[Action::Stop], &[Action::Stop]),
            Some(Action::Stop)
        );
        assert_eq!(break_tie(&mut rng, &[], &[Action::Stop]), None);
    }

    #[test]
    fn test_break_tie_covers_every_tied_move() {
        let mut rng = Pcg32::seed_from_u64(3);
        let best = [Action::North, Action::South, Action::West];
        let mut seen = vec![];
        for _ in 0..300 {
            let choice = break_tie(&mut rng, &best, &best).unwrap();
            assert!(best.contains(&choice));
            if !seen.contains(&choice) {
                seen.push(choice);
            }
        }
        assert_eq!(seen.len(), best.len());
    }

    #[test]
    fn test_retreat_triggers() {
        use capflag_engine::Layout;

        let layout = Layout::default_capture();
        let state = GameState::initial(&layout);
        assert_eq!(PolicyState::for_turn(&state, 0, Team::Red), PolicyState::Normal);

        let targets = state.food_to_eat(Team::Red);
        let loaded = state.clone().with_agent_carrying(0, targets[..3].iter().copied());
        assert_eq!(PolicyState::for_turn(&loaded, 0, Team::Red), PolicyState::Retreat);
        let two = state.clone().with_agent_carrying(0, targets[..2].iter().copied());
        assert_eq!(PolicyState::for_turn(&two, 0, Team::Red), PolicyState::Normal);

        let nearly_done = targets[2..]
            .iter()
            .fold(state, |s, pos| s.with_food(*pos, false));
        assert_eq!(
            PolicyState::for_turn(&nearly_done, 0, Team::Red),
            PolicyState::Retreat
        );
    }
}
