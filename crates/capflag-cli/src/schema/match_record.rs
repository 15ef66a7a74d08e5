use capflag_engine::{Action, MatchState, Team};
use capflag_evaluator::archetype::Archetype;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished match, written by `play --record`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// When the record was written (ISO 8601)
    pub recorded_at: DateTime<Utc>,
    /// Layout file, or `None` for the built-in layout
    pub layout: Option<String>,
    /// Seed the agents' tie-breaking generators were derived from
    pub seed: u64,
    pub max_moves: usize,
    pub outcome: MatchState,
    /// Final score, positive when red is ahead
    pub score: i32,
    pub moves: usize,
    /// One entry per agent, in turn order
    pub agents: Vec<AgentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub index: usize,
    pub team: Team,
    pub archetype: Archetype,
    pub actions: Vec<Action>,
}
