//! Everything one decision reads: rules, distances, the acting agent and its side.

use capflag_engine::{
    Action, AgentState, CaptureRules, DistanceOracle, GameState, InvalidActionError, Position,
    Team,
};

use crate::{PolicyError, side::SideConfig};

/// Borrowed collaborators for evaluating one agent's actions.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub rules: &'a dyn CaptureRules,
    pub distances: &'a dyn DistanceOracle,
    pub agent: usize,
    pub side: &'a SideConfig,
}

impl DecisionContext<'_> {
    #[must_use]
    pub fn team(&self) -> Team {
        self.side.team()
    }

    /// State after the agent takes `action`, advanced to a whole cell.
    ///
    /// The rules may leave a slow agent halfway between two cells. In that case the same
    /// action is applied once more so that features are always computed on aligned
    /// positions. If the second application is rejected, the half-way successor is used
    /// as is.
    pub fn successor(
        &self,
        state: &GameState,
        action: Action,
    ) -> Result<GameState, InvalidActionError> {
        let successor = self.rules.successor(state, self.agent, action)?;
        let aligned = successor
            .agent_position(self.agent)
            .is_none_or(|p| p.is_aligned());
        if aligned {
            return Ok(successor);
        }
        match self.rules.successor(&successor, self.agent, action) {
            Ok(next) => Ok(next),
            Err(err) => {
                tracing::warn!(%err, "second half-step rejected; keeping half-way successor");
                Ok(successor)
            }
        }
    }

    /// The acting agent's entry in `state`.
    pub fn me<'s>(&self, state: &'s GameState) -> Result<&'s AgentState, PolicyError> {
        state.get_agent(self.agent).ok_or(PolicyError::AgentMissing {
            agent: self.agent,
            num_agents: state.num_agents(),
        })
    }

    /// The agent's cell in `state`.
    pub fn own_cell(&self, state: &GameState) -> Result<Position, PolicyError> {
        state
            .agent_position(self.agent)
            .map(|p| p.nearest_cell())
            .ok_or(PolicyError::OwnPositionUnknown { agent: self.agent })
    }

    /// Maze distances from `from` to each of `targets` that can be reached, in order.
    ///
    /// Targets with no path from `from` (sealed-off food, a landmark in another region)
    /// are left out, so min/max aggregations only ever see real distances.
    pub fn distances_from<I>(&self, from: Position, targets: I) -> Vec<u32>
    where
        I: IntoIterator<Item = Position>,
    {
        targets
            .into_iter()
            .filter_map(|to| self.distances.maze_distance(from, to).ok())
            .collect()
    }

    /// Cells of the visible opponents that are (`pacman == true`) or are not invading.
    ///
    /// Opponents out of sight have no position and are skipped.
    #[must_use]
    pub fn visible_opponents(&self, state: &GameState, pacman: bool) -> Vec<Position> {
        state
            .opponents(self.team())
            .filter(|enemy| enemy.is_pacman() == pacman)
            .filter_map(|enemy| enemy.position())
            .map(|p| p.nearest_cell())
            .collect()
    }
}
