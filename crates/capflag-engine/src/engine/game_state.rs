use std::sync::Arc;

use crate::core::{Action, Grid, Point, Position, Team};

use super::layout::Layout;

/// One agent as seen in a [`GameState`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    index: usize,
    team: Team,
    start: Position,
    position: Option<Point>,
    direction: Action,
    is_pacman: bool,
    carried: Vec<Position>,
}

impl AgentState {
    fn spawn(index: usize, start: Position) -> Self {
        Self {
            index,
            team: Team::of_agent(index),
            start,
            position: Some(Point::from(start)),
            direction: Action::Stop,
            is_pacman: false,
            carried: vec![],
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Current location, or `None` when the observer cannot see this agent.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Facing direction: the last non-stop move, or [`Action::Stop`] right after spawning.
    #[must_use]
    pub fn direction(&self) -> Action {
        self.direction
    }

    /// Whether the agent is on the opponent's half (attacking).
    #[must_use]
    pub fn is_pacman(&self) -> bool {
        self.is_pacman
    }

    #[must_use]
    pub fn num_carrying(&self) -> usize {
        self.carried.len()
    }

    pub(crate) fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }

    pub(crate) fn set_direction(&mut self, direction: Action) {
        self.direction = direction;
    }

    pub(crate) fn set_pacman(&mut self, is_pacman: bool) {
        self.is_pacman = is_pacman;
    }

    pub(crate) fn pick_up(&mut self, cell: Position) {
        self.carried.push(cell);
    }

    pub(crate) fn drop_carried(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.carried)
    }

    pub(crate) fn respawn(&mut self) {
        self.position = Some(Point::from(self.start));
        self.direction = Action::Stop;
        self.is_pacman = false;
    }
}

/// Immutable snapshot of a match.
///
/// States are plain values: the rules never mutate a state in place, they return a new
/// one. Walls are shared between snapshots; food and agents are owned.
///
/// The score is kept from red's point of view; use [`GameState::score_differential`] for
/// a team-relative value.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    walls: Arc<Grid<bool>>,
    food: Grid<bool>,
    agents: Vec<AgentState>,
    score: i32,
    move_count: usize,
}

impl GameState {
    #[must_use]
    pub fn initial(layout: &Layout) -> Self {
        let agents = layout
            .spawns()
            .iter()
            .enumerate()
            .map(|(index, start)| AgentState::spawn(index, *start))
            .collect();
        Self {
            walls: Arc::clone(layout.walls()),
            food: layout.food().clone(),
            agents,
            score: 0,
            move_count: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.walls.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.walls.height()
    }

    #[must_use]
    pub fn walls(&self) -> &Grid<bool> {
        &self.walls
    }

    #[must_use]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.is_set_or_outside(pos)
    }

    #[must_use]
    pub fn has_food(&self, pos: Position) -> bool {
        self.food.get(pos).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// # Panics
    ///
    /// Panics if `index` is not an agent of this match; see [`GameState::get_agent`].
    #[must_use]
    pub fn agent(&self, index: usize) -> &AgentState {
        &self.agents[index]
    }

    #[must_use]
    pub fn get_agent(&self, index: usize) -> Option<&AgentState> {
        self.agents.get(index)
    }

    pub fn agents(&self) -> impl Iterator<Item = &AgentState> + '_ {
        self.agents.iter()
    }

    #[must_use]
    pub fn agent_position(&self, index: usize) -> Option<Point> {
        self.agents.get(index).and_then(AgentState::position)
    }

    pub fn team_members(&self, team: Team) -> impl Iterator<Item = &AgentState> + '_ {
        self.agents.iter().filter(move |a| a.team == team)
    }

    pub fn opponents(&self, team: Team) -> impl Iterator<Item = &AgentState> + '_ {
        self.team_members(team.opponent())
    }

    /// Raw score, positive when red is ahead.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Score from `team`'s point of view (positive when `team` is ahead).
    #[must_use]
    pub fn score_differential(&self, team: Team) -> i32 {
        self.score * team.score_sign()
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Whether `pos` lies on `team`'s half.
    #[must_use]
    pub fn is_home(&self, team: Team, pos: Position) -> bool {
        team.is_home_column(pos.x, self.width())
    }

    /// Food `team` still has to collect (lying on the opponent's half).
    #[must_use]
    pub fn food_to_eat(&self, team: Team) -> Vec<Position> {
        self.food
            .marked()
            .filter(|pos| self.is_home(team.opponent(), *pos))
            .collect()
    }

    /// Food carried by `team`'s agents and not yet returned home.
    #[must_use]
    pub fn num_carried_by(&self, team: Team) -> usize {
        self.team_members(team).map(AgentState::num_carrying).sum()
    }

    /// Moves agent `index` onto `pos`, updating which side it is on.
    ///
    /// Intended for building scenarios; the rules use their own bookkeeping.
    #[must_use]
    pub fn with_agent_at(mut self, index: usize, pos: Position) -> Self {
        let is_pacman = !self.is_home(self.agents[index].team, pos);
        let agent = &mut self.agents[index];
        agent.position = Some(Point::from(pos));
        agent.is_pacman = is_pacman;
        self
    }

    #[must_use]
    pub fn with_agent_facing(mut self, index: usize, direction: Action) -> Self {
        self.agents[index].direction = direction;
        self
    }

    /// Hides agent `index`, as if it were out of sight.
    #[must_use]
    pub fn with_agent_hidden(mut self, index: usize) -> Self {
        self.agents[index].position = None;
        self
    }

    /// Makes agent `index` carry the food found on `cells`.
    #[must_use]
    pub fn with_agent_carrying<I>(mut self, index: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        for cell in cells {
            self.food.set(cell, false);
            self.agents[index].carried.push(cell);
        }
        self
    }

    #[must_use]
    pub fn with_food(mut self, pos: Position, present: bool) -> Self {
        self.food.set(pos, present);
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    pub(crate) fn agent_mut(&mut self, index: usize) -> &mut AgentState {
        &mut self.agents[index]
    }

    pub(crate) fn take_food(&mut self, pos: Position) -> bool {
        let present = self.has_food(pos);
        if present {
            self.food.set(pos, false);
        }
        present
    }

    pub(crate) fn restore_food(&mut self, cells: &[Position]) {
        for cell in cells {
            self.food.set(*cell, true);
        }
    }

    pub(crate) fn add_score(&mut self, team: Team, points: i32) {
        self.score += points * team.score_sign();
    }

    pub(crate) fn advance_move_count(&mut self) {
        self.move_count += 1;
    }
}
