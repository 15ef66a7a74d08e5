use capflag_engine::{Action, GameState};

use crate::{PolicyError, context::DecisionContext, mode::Mode};

use super::{FeatureId, FeatureVector};

/// Distance used when no chaser (or no entrance threat) is in sight.
///
/// Large enough that `1 / SENTINEL_DISTANCE` is practically zero.
pub const SENTINEL_DISTANCE: f64 = 9999.0;

/// How the distance to the points of interest is aggregated when no invader is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patrol {
    /// Stay close to the nearest point (pure defenders).
    Nearest,
    /// Spread towards the furthest point (attackers defending a lead).
    Furthest,
}

/// Computes the [`FeatureVector`] of a candidate action.
///
/// Extraction is a pure function of the context, the state and the action: the
/// successor is recomputed on every call and nothing is cached between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureExtractor {
    patrol: Patrol,
}

impl FeatureExtractor {
    #[must_use]
    pub fn new(patrol: Patrol) -> Self {
        Self { patrol }
    }

    #[must_use]
    pub fn patrol(&self) -> Patrol {
        self.patrol
    }

    pub fn extract(
        &self,
        ctx: &DecisionContext<'_>,
        state: &GameState,
        action: Action,
        mode: Mode,
    ) -> Result<FeatureVector, PolicyError> {
        let successor = ctx.successor(state, action)?;
        let mut features = FeatureVector::new();
        match mode {
            Mode::Offense => offense_features(ctx, state, &successor, &mut features)?,
            Mode::Defense => {
                self.defense_features(ctx, state, &successor, action, &mut features)?;
            }
        }
        tracing::trace!(agent = ctx.agent, %action, %mode, ?features, "features");
        Ok(features)
    }

    fn defense_features(
        &self,
        ctx: &DecisionContext<'_>,
        state: &GameState,
        successor: &GameState,
        action: Action,
        features: &mut FeatureVector,
    ) -> Result<(), PolicyError> {
        let me = ctx.me(successor)?;
        let my_cell = ctx.own_cell(successor)?;

        if my_cell.x == ctx.side.home_column() {
            features.set(FeatureId::InHome, 1.0);
        }
        features.set(FeatureId::OnDefense, if me.is_pacman() { 0.0 } else { 1.0 });

        let invaders = ctx.visible_opponents(successor, true);
        features.set(FeatureId::NumInvaders, count(invaders.len()));
        if let Some(nearest) = ctx.distances_from(my_cell, invaders).into_iter().min() {
            features.set(FeatureId::InvaderDistance, f64::from(nearest));
        } else {
            let points = ctx.side.points_of_interest().iter().copied();
            let to_points = ctx.distances_from(my_cell, points);
            let patrol = match self.patrol {
                Patrol::Nearest => to_points.into_iter().min(),
                Patrol::Furthest => to_points.into_iter().max(),
            };
            if let Some(distance) = patrol {
                features.set(FeatureId::StayNearPoi, f64::from(distance));
            }
        }

        if action.is_stop() {
            features.set(FeatureId::Stop, 1.0);
        }
        if action == ctx.me(state)?.direction().reverse() {
            features.set(FeatureId::Reverse, 1.0);
        }
        Ok(())
    }
}

fn offense_features(
    ctx: &DecisionContext<'_>,
    state: &GameState,
    successor: &GameState,
    features: &mut FeatureVector,
) -> Result<(), PolicyError> {
    let my_cell = ctx.own_cell(successor)?;

    let food = successor.food_to_eat(ctx.team());
    features.set(FeatureId::SuccessorScore, -count(food.len()));
    if let Some(nearest) = ctx.distances_from(my_cell, food).into_iter().min() {
        features.set(FeatureId::DistanceToFood, f64::from(nearest));
    }

    // Side is judged before the move; chasers are looked up after it.
    let chasers = ctx.visible_opponents(successor, false);
    let mut enemy_distance = SENTINEL_DISTANCE;
    let mut entrance_distance = SENTINEL_DISTANCE;
    if ctx.me(state)?.is_pacman() {
        if let Some(nearest) = ctx.distances_from(my_cell, chasers).into_iter().min() {
            enemy_distance = f64::from(nearest.max(1));
        }
    } else if !chasers.is_empty() {
        let entrances = ctx.side.entrances().iter().copied();
        if let Some(furthest) = ctx.distances_from(my_cell, entrances).into_iter().max() {
            entrance_distance = f64::from(furthest);
        }
    }
    features.set(FeatureId::FurthestEntrance, entrance_distance);
    features.set(FeatureId::FleeEnemy, 1.0 / enemy_distance);
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn count(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use capflag_engine::{GridRules, Layout, MazeDistances, Position, Team};

    use crate::side::SideConfig;

    use super::*;

    const ARENA: &str = "\
%%%%%%%%%%%%
%1    .   2%
%    %%    %
%3  .    .4%
%%%%%%%%%%%%
";

    struct Fixture {
        rules: GridRules,
        distances: MazeDistances,
        state: GameState,
        side: SideConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let layout = Layout::parse(ARENA).unwrap();
            let side = SideConfig::new(
                Team::Red,
                5,
                vec![Position::new(5, 1), Position::new(5, 3)],
                vec![Position::new(2, 2), Position::new(4, 3)],
            );
            Self {
                rules: GridRules::default(),
                distances: MazeDistances::new(layout.walls()),
                state: GameState::initial(&layout),
                side,
            }
        }

        fn ctx(&self) -> DecisionContext<'_> {
            DecisionContext {
                rules: &self.rules,
                distances: &self.distances,
                agent: 0,
                side: &self.side,
            }
        }
    }

    #[test]
    fn test_offense_features_without_chasers() {
        let fx = Fixture::new();
        let state = fx.state.clone().with_agent_hidden(1).with_agent_hidden(3);
        let features = FeatureExtractor::new(Patrol::Furthest)
            .extract(&fx.ctx(), &state, Action::East, Mode::Offense)
            .unwrap();
        assert_eq!(features.get(FeatureId::SuccessorScore), -2.0);
        assert!(features.contains(FeatureId::DistanceToFood));
        assert_eq!(features.get(FeatureId::FurthestEntrance), SENTINEL_DISTANCE);
        assert_eq!(features.get(FeatureId::FleeEnemy), 1.0 / SENTINEL_DISTANCE);
        assert!(!features.contains(FeatureId::OnDefense));
    }

    #[test]
    fn test_flee_enemy_is_inverse_chaser_distance() {
        let fx = Fixture::new();
        let state = fx.state.clone().with_agent_at(0, Position::new(7, 3));
        assert!(state.agent(0).is_pacman());
        let features = FeatureExtractor::new(Patrol::Furthest)
            .extract(&fx.ctx(), &state, Action::East, Mode::Offense)
            .unwrap();
        // Chasers at (10, 3) and (10, 1) are 2 and 4 steps from (8, 3).
        assert_eq!(features.get(FeatureId::FleeEnemy), 0.5);
        assert_eq!(features.get(FeatureId::FurthestEntrance), SENTINEL_DISTANCE);
        assert_eq!(features.get(FeatureId::DistanceToFood), 2.0);
    }

    #[test]
    fn test_furthest_entrance_while_chasers_watch() {
        let fx = Fixture::new();
        let features = FeatureExtractor::new(Patrol::Furthest)
            .extract(&fx.ctx(), &fx.state, Action::East, Mode::Offense)
            .unwrap();
        // From (2, 3): entrance (5, 3) is 3 steps away, (5, 1) is 5.
        assert_eq!(features.get(FeatureId::FurthestEntrance), 5.0);
        assert_eq!(features.get(FeatureId::FleeEnemy), 1.0 / SENTINEL_DISTANCE);
    }

    #[test]
    fn test_patrol_aggregates_points_of_interest() {
        let fx = Fixture::new();
        // From (2, 3): point (2, 2) is 1 step away, (4, 3) is 2.
        let nearest = FeatureExtractor::new(Patrol::Nearest)
            .extract(&fx.ctx(), &fx.state, Action::East, Mode::Defense)
            .unwrap();
        assert_eq!(nearest.get(FeatureId::StayNearPoi), 1.0);
        assert_eq!(nearest.get(FeatureId::NumInvaders), 0.0);
        assert!(!nearest.contains(FeatureId::InvaderDistance));

        let furthest = FeatureExtractor::new(Patrol::Furthest)
            .extract(&fx.ctx(), &fx.state, Action::East, Mode::Defense)
            .unwrap();
        assert_eq!(furthest.get(FeatureId::StayNearPoi), 2.0);
    }

    #[test]
    fn test_in_home_on_boundary_column() {
        let fx = Fixture::new();
        let extractor = FeatureExtractor::new(Patrol::Nearest);
        let state = fx.state.clone().with_agent_at(0, Position::new(4, 3));
        let features = extractor
            .extract(&fx.ctx(), &state, Action::East, Mode::Defense)
            .unwrap();
        assert_eq!(features.get(FeatureId::InHome), 1.0);
        assert_eq!(features.get(FeatureId::OnDefense), 1.0);

        let features = extractor
            .extract(&fx.ctx(), &state, Action::West, Mode::Defense)
            .unwrap();
        assert!(!features.contains(FeatureId::InHome));
    }

    #[test]
    fn test_reverse_and_stop_follow_facing() {
        let fx = Fixture::new();
        let extractor = FeatureExtractor::new(Patrol::Nearest);
        let state = fx
            .state
            .clone()
            .with_agent_at(0, Position::new(2, 3))
            .with_agent_facing(0, Action::East);
        let extract = |action| {
            extractor
                .extract(&fx.ctx(), &state, action, Mode::Defense)
                .unwrap()
        };

        let back = extract(Action::West);
        assert_eq!(back.get(FeatureId::Reverse), 1.0);
        assert!(!back.contains(FeatureId::Stop));
        let ahead = extract(Action::East);
        assert!(!ahead.contains(FeatureId::Reverse));
        let stop = extract(Action::Stop);
        assert_eq!(stop.get(FeatureId::Stop), 1.0);
        assert!(!stop.contains(FeatureId::Reverse));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let fx = Fixture::new();
        let extractor = FeatureExtractor::new(Patrol::Nearest);
        for mode in [Mode::Offense, Mode::Defense] {
            let a = extractor.extract(&fx.ctx(), &fx.state, Action::South, mode).unwrap();
            let b = extractor.extract(&fx.ctx(), &fx.state, Action::South, mode).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_illegal_action_is_reported() {
        let fx = Fixture::new();
        let err = FeatureExtractor::new(Patrol::Nearest)
            .extract(&fx.ctx(), &fx.state, Action::West, Mode::Defense)
            .unwrap_err();
        assert!(matches!(err, PolicyError::InvalidAction(_)));
    }
}
