//! The agent the match loop talks to.
//!
//! A [`ReflexAgent`] is created with an archetype and a seed, registered once with the
//! initial state and its [`SideConfig`], and then asked for one action per turn. The
//! only mutable state it keeps is its random number generator and the history of actions
//! it returned.

use capflag_engine::{Action, CaptureRules, DistanceOracle, GameState, Position, Team};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{
    ConfigurationError, PolicyError,
    action_policy::{ActionEvaluation, Decision, ReflexPolicy},
    archetype::Archetype,
    context::DecisionContext,
    side::SideConfig,
    weights::ModeWeights,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Registration {
    spawn: Position,
    side: SideConfig,
}

#[derive(Debug)]
pub struct ReflexAgent {
    index: usize,
    policy: ReflexPolicy,
    rng: Pcg32,
    registration: Option<Registration>,
    history: Vec<Action>,
}

impl ReflexAgent {
    #[must_use]
    pub fn new(index: usize, archetype: Archetype, seed: u64) -> Self {
        Self::with_policy(index, archetype.policy(), seed)
    }

    #[must_use]
    pub fn with_policy(index: usize, policy: ReflexPolicy, seed: u64) -> Self {
        Self {
            index,
            policy,
            rng: Pcg32::seed_from_u64(seed),
            registration: None,
            history: vec![],
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.policy.archetype()
    }

    #[must_use]
    pub fn spawn(&self) -> Option<Position> {
        self.registration.as_ref().map(|r| r.spawn)
    }

    /// Actions returned by [`Self::choose_action`] so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Records the spawn cell and landmarks. Must be called before the first turn.
    ///
    /// Registering again replaces the previous registration and clears the history.
    pub fn register_initial_state(
        &mut self,
        state: &GameState,
        side: SideConfig,
    ) -> Result<(), ConfigurationError> {
        if self.index >= state.num_agents() {
            return Err(ConfigurationError::AgentOutOfRange {
                agent: self.index,
                num_agents: state.num_agents(),
            });
        }
        let actual = Team::of_agent(self.index);
        if side.team() != actual {
            return Err(ConfigurationError::TeamMismatch {
                agent: self.index,
                actual,
                configured: side.team(),
            });
        }
        let spawn = state.agent(self.index).start();
        side.validate(state, spawn)?;

        tracing::debug!(
            agent = self.index,
            archetype = %self.archetype(),
            %spawn,
            "registered"
        );
        self.registration = Some(Registration { spawn, side });
        self.history.clear();
        Ok(())
    }

    /// Picks this turn's action from the agent's (possibly partial) view of the game.
    pub fn choose_action(
        &mut self,
        rules: &dyn CaptureRules,
        distances: &dyn DistanceOracle,
        state: &GameState,
    ) -> Result<Action, PolicyError> {
        let decision = self.decide(rules, distances, state)?;
        tracing::debug!(
            agent = self.index,
            action = %decision.action,
            state = %decision.state,
            candidates = decision.evaluations.len(),
            "chose action"
        );
        self.history.push(decision.action);
        Ok(decision.action)
    }

    /// Like [`Self::choose_action`] but returns the full decision and leaves the history
    /// untouched.
    pub fn decide(
        &mut self,
        rules: &dyn CaptureRules,
        distances: &dyn DistanceOracle,
        state: &GameState,
    ) -> Result<Decision, PolicyError> {
        let registration = self
            .registration
            .as_ref()
            .ok_or(PolicyError::NotRegistered { agent: self.index })?;
        if self.index >= state.num_agents() {
            return Err(PolicyError::AgentMissing {
                agent: self.index,
                num_agents: state.num_agents(),
            });
        }
        let ctx = DecisionContext {
            rules,
            distances,
            agent: self.index,
            side: &registration.side,
        };
        let actions = rules.legal_actions(state, self.index);
        if actions.is_empty() {
            return Err(PolicyError::NoLegalActions { agent: self.index });
        }
        self.policy
            .decide(&ctx, state, registration.spawn, &actions, &mut self.rng)
    }

    /// Scores of every legal action under this turn's mode, without choosing one.
    pub fn evaluate_actions(
        &self,
        rules: &dyn CaptureRules,
        distances: &dyn DistanceOracle,
        state: &GameState,
    ) -> Result<Vec<ActionEvaluation>, PolicyError> {
        let registration = self
            .registration
            .as_ref()
            .ok_or(PolicyError::NotRegistered { agent: self.index })?;
        if self.index >= state.num_agents() {
            return Err(PolicyError::AgentMissing {
                agent: self.index,
                num_agents: state.num_agents(),
            });
        }
        let ctx = DecisionContext {
            rules,
            distances,
            agent: self.index,
            side: &registration.side,
        };
        let actions = rules.legal_actions(state, self.index);
        self.policy.evaluate_actions(&ctx, state, &actions)
    }
}

/// Builds the two agents of one team with the default weight tables.
///
/// `first` and `second` are archetype names (see [`Archetype`]'s `FromStr`). Each agent
/// draws from its own generator seeded with `seed + index`.
pub fn create_team(
    first_index: usize,
    second_index: usize,
    first: &str,
    second: &str,
    seed: u64,
) -> Result<[ReflexAgent; 2], ConfigurationError> {
    create_team_with_weights(
        first_index,
        second_index,
        first,
        second,
        &ModeWeights::default(),
        seed,
    )
}

/// Like [`create_team`], with both agents scoring through `weights`.
pub fn create_team_with_weights(
    first_index: usize,
    second_index: usize,
    first: &str,
    second: &str,
    weights: &ModeWeights,
    seed: u64,
) -> Result<[ReflexAgent; 2], ConfigurationError> {
    let build = |index: usize, name: &str| -> Result<ReflexAgent, ConfigurationError> {
        let policy = name.parse::<Archetype>()?.policy_with_weights(weights.clone());
        Ok(ReflexAgent::with_policy(index, policy, agent_seed(seed, index)))
    };
    Ok([build(first_index, first)?, build(second_index, second)?])
}

fn agent_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64)
}
