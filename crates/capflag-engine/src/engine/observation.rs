use super::game_state::GameState;

/// Manhattan radius within which a team sees opponents.
pub const SIGHT_RANGE: u32 = 5;

/// The part of `state` visible to agent `observer`.
///
/// An opponent stays visible when it is within `sight_range` (Manhattan distance) of any
/// agent on the observer's team; otherwise its position is hidden. Teammates, food and
/// score are always visible.
#[must_use]
pub fn observe(state: &GameState, observer: usize, sight_range: u32) -> GameState {
    let team = state.agent(observer).team();
    let lookouts = state
        .team_members(team)
        .filter_map(|a| a.position())
        .map(|p| p.nearest_cell())
        .collect::<Vec<_>>();

    let hidden = state
        .opponents(team)
        .filter(|enemy| {
            enemy.position().is_none_or(|p| {
                let cell = p.nearest_cell();
                lookouts
                    .iter()
                    .all(|lookout| lookout.manhattan_distance(cell) > sight_range)
            })
        })
        .map(|enemy| enemy.index())
        .collect::<Vec<_>>();

    hidden
        .into_iter()
        .fold(state.clone(), GameState::with_agent_hidden)
}
