use capflag_engine::{
    Action, CaptureRules as _, DistanceOracle as _, GameState, GridRules, Layout, MatchSession,
    MazeDistances, Team,
};

fn total_food(state: &GameState) -> usize {
    let on_board = state.food_to_eat(Team::Red).len() + state.food_to_eat(Team::Blue).len();
    let carried = state.num_carried_by(Team::Red) + state.num_carried_by(Team::Blue);
    on_board + carried
}

/// Cycles through legal actions so every agent keeps moving without randomness.
fn scripted_action(actions: &[Action], move_count: usize) -> Action {
    actions[(move_count / 4 + move_count % 7) % actions.len()]
}

#[test]
fn food_is_conserved_while_agents_wander() {
    let layout = Layout::default_capture();
    let initial_food = total_food(&GameState::initial(&layout));
    let mut session = MatchSession::new(GridRules::default(), &layout, 400);

    while session.match_state().is_playing() {
        let before = session.state().clone();
        let agent = session.current_agent();
        let actions = session.rules().legal_actions(&before, agent);
        assert!(!actions.is_empty());
        let action = scripted_action(&actions, before.move_count());
        session.step(action).unwrap();

        // Food only leaves play when it is returned home for points.
        let after = session.state();
        let returned = (after.score() - before.score()).unsigned_abs() as usize;
        assert_eq!(total_food(after) + returned, total_food(&before));
        assert!(total_food(after) <= initial_food);
    }
    assert!(!session.match_state().is_playing());
}

#[test]
fn agents_never_enter_walls() {
    let layout = Layout::default_capture();
    let rules = GridRules::default();
    let mut state = GameState::initial(&layout);
    for turn in 0..200 {
        let agent = turn % state.num_agents();
        let actions = rules.legal_actions(&state, agent);
        state = rules
            .successor(&state, agent, scripted_action(&actions, turn))
            .unwrap();
        for a in state.agents() {
            let cell = a.position().unwrap().nearest_cell();
            assert!(!state.is_wall(cell), "agent {} inside a wall", a.index());
        }
    }
}

#[test]
fn maze_distance_is_symmetric_on_default_layout() {
    let layout = Layout::default_capture();
    let distances = MazeDistances::new(layout.walls());
    let spawns = layout.spawns();
    for a in spawns {
        for b in spawns {
            let ab = distances.maze_distance(*a, *b).unwrap();
            let ba = distances.maze_distance(*b, *a).unwrap();
            assert_eq!(ab, ba);
            assert!(ab >= a.manhattan_distance(*b));
        }
    }
}
