use std::path::PathBuf;

use capflag_engine::{GameState, GridRules, MazeDistances, Team};
use capflag_evaluator::{agent::ReflexAgent, archetype::Archetype, side::SideConfig};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Layout file (defaults to the built-in 32x18 layout)
    #[clap(long)]
    layout: Option<PathBuf>,
    /// Index of the agent to inspect
    #[clap(long, default_value_t = 0)]
    agent: usize,
    /// Archetype of the inspected agent
    #[clap(long, default_value_t = Archetype::CarefulOffense)]
    archetype: Archetype,
    /// Score (positive for red) to evaluate under, e.g. 6 to see a leading attacker
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    score: i32,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let InspectArg {
        layout,
        agent: index,
        archetype,
        score,
    } = arg;

    let layout = util::read_layout(layout.as_deref())?;
    let state = GameState::initial(&layout).with_score(*score);
    let team = Team::of_agent(*index);

    let mut agent = ReflexAgent::new(*index, *archetype, 0);
    agent.register_initial_state(&state, SideConfig::default_for(team, layout.width()))?;

    let rules = GridRules::default();
    let distances = MazeDistances::new(layout.walls());
    let evaluations = agent.evaluate_actions(&rules, &distances, &state)?;

    if let Some(first) = evaluations.first() {
        println!("agent {index} ({team}, {archetype}) in {} mode", first.mode);
    }
    for evaluation in &evaluations {
        println!(
            "{:<6} score {:.3}",
            evaluation.action.to_string(),
            evaluation.score
        );
        for (id, value) in &evaluation.features {
            println!("    {:<28} {:<18} {value}", id.name(), id.id());
        }
    }
    Ok(())
}
