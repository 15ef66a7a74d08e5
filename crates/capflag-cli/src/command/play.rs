use std::path::PathBuf;

use anyhow::Context as _;
use capflag_engine::{GameState, GridRules, Layout, MatchSession, MatchState, MazeDistances, Team};
use capflag_evaluator::{agent::ReflexAgent, side::SideConfig};
use chrono::Utc;

use crate::{
    schema::{
        match_record::{AgentRecord, MatchRecord},
        team_config::{MatchConfig, TeamConfig},
    },
    util,
};

/// Moves in a match when nobody wins first (300 per agent).
const DEFAULT_MAX_MOVES: usize = 1200;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Layout file (defaults to the built-in 32x18 layout)
    #[clap(long)]
    layout: Option<PathBuf>,
    /// Archetypes of the red agents, e.g. `careful-offense,defensive`
    #[clap(long, value_delimiter = ',')]
    red: Option<Vec<String>>,
    /// Archetypes of the blue agents
    #[clap(long, value_delimiter = ',')]
    blue: Option<Vec<String>>,
    /// Seed for the agents' tie-breaking
    #[clap(long, default_value_t = 0)]
    seed: u64,
    /// Move limit (all agents together)
    #[clap(long, default_value_t = DEFAULT_MAX_MOVES)]
    max_moves: usize,
    /// Team configuration file (JSON); `--red`/`--blue` override its archetypes
    #[clap(long)]
    team_config: Option<PathBuf>,
    /// Write a JSON record of the match to this file
    #[clap(long)]
    record: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        layout: layout_path,
        red,
        blue,
        seed,
        max_moves,
        team_config,
        record,
    } = arg;

    let layout = util::read_layout(layout_path.as_deref())?;
    anyhow::ensure!(
        layout.num_agents() == 4,
        "layout must place 4 agents, found {}",
        layout.num_agents()
    );

    let mut config = match team_config {
        Some(path) => util::read_json_file::<MatchConfig, _>("team config", path)?,
        None => MatchConfig::default(),
    };
    if let Some(names) = red {
        config.red.agents = agent_pair(names, "--red")?;
    }
    if let Some(names) = blue {
        config.blue.agents = agent_pair(names, "--blue")?;
    }

    let initial = GameState::initial(&layout);
    let [red_first, red_second] = build_team(&layout, &initial, Team::Red, &config.red, *seed)?;
    let [blue_first, blue_second] =
        build_team(&layout, &initial, Team::Blue, &config.blue, *seed)?;
    let mut agents = [red_first, blue_first, red_second, blue_second];

    let distances = MazeDistances::new(layout.walls());
    let mut session = MatchSession::new(GridRules::default(), &layout, *max_moves);
    tracing::info!(
        red = ?config.red.agents,
        blue = ?config.blue.agents,
        seed,
        max_moves,
        "match started"
    );
    while session.match_state().is_playing() {
        let index = session.current_agent();
        let view = session.observation();
        let action = agents[index]
            .choose_action(session.rules(), &distances, &view)
            .with_context(|| {
                format!("agent {index} failed to act at move {}", view.move_count())
            })?;
        session.step(action)?;
    }

    let state = session.state();
    let outcome = session.match_state();
    tracing::info!(?outcome, score = state.score(), moves = state.move_count(), "match over");
    match outcome {
        MatchState::Won { team } => println!("{team} wins"),
        MatchState::TimeUp | MatchState::Playing => println!("time up"),
    }
    println!(
        "score {} (red {} / blue {} food left to collect), {} moves",
        state.score(),
        state.food_to_eat(Team::Red).len(),
        state.food_to_eat(Team::Blue).len(),
        state.move_count()
    );

    if let Some(path) = record {
        let record = MatchRecord {
            recorded_at: Utc::now(),
            layout: layout_path.as_ref().map(|p| p.display().to_string()),
            seed: *seed,
            max_moves: *max_moves,
            outcome,
            score: state.score(),
            moves: state.move_count(),
            agents: agents
                .iter()
                .map(|agent| AgentRecord {
                    index: agent.index(),
                    team: Team::of_agent(agent.index()),
                    archetype: agent.archetype(),
                    actions: agent.history().to_vec(),
                })
                .collect(),
        };
        util::save_json(&record, path)?;
        eprintln!("Match record saved to {}", path.display());
    }

    Ok(())
}

fn agent_pair(names: &[String], flag: &str) -> anyhow::Result<[String; 2]> {
    match names {
        [first, second] => Ok([first.clone(), second.clone()]),
        _ => anyhow::bail!("{flag} takes exactly two archetypes, got {}", names.len()),
    }
}

fn build_team(
    layout: &Layout,
    initial: &GameState,
    team: Team,
    config: &TeamConfig,
    seed: u64,
) -> anyhow::Result<[ReflexAgent; 2]> {
    let (first_index, second_index) = match team {
        Team::Red => (0, 2),
        Team::Blue => (1, 3),
    };
    let weights = config
        .weights_file
        .as_deref()
        .map(util::read_weights_file)
        .transpose()?
        .unwrap_or_default();
    let [first, second] = &config.agents;
    let mut agents = capflag_evaluator::agent::create_team_with_weights(
        first_index,
        second_index,
        first,
        second,
        &weights,
        seed,
    )?;

    let side = config
        .side
        .clone()
        .unwrap_or_else(|| SideConfig::default_for(team, layout.width()));
    for agent in &mut agents {
        agent
            .register_initial_state(initial, side.clone())
            .with_context(|| format!("failed to set up {team} agent {}", agent.index()))?;
    }
    Ok(agents)
}
