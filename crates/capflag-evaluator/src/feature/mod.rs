//! Named features describing a state after a candidate action.
//!
//! Features come in two groups, one per [`Mode`](crate::mode::Mode):
//!
//! **Offense features** - pursue food on the opponent's half without getting caught:
//! - [`FeatureId::SuccessorScore`] - negated count of food left to collect
//! - [`FeatureId::DistanceToFood`] - maze distance to the nearest such food
//! - [`FeatureId::FleeEnemy`] - inverse distance to the nearest visible chaser
//! - [`FeatureId::FurthestEntrance`] - furthest entrance while chasers are visible
//!
//! **Defense features** - keep the home half free of invaders:
//! - [`FeatureId::OnDefense`] - agent stays on its own half
//! - [`FeatureId::NumInvaders`] / [`FeatureId::InvaderDistance`] - visible invaders
//! - [`FeatureId::StayNearPoi`] - distance to the patrol points of interest
//! - [`FeatureId::Stop`] / [`FeatureId::Reverse`] - discourage stalling and dithering
//! - [`FeatureId::InHome`] - agent stands on its home boundary column
//!
//! A [`FeatureVector`] is sparse: features that are never set read as zero.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

pub use self::extractor::{FeatureExtractor, Patrol, SENTINEL_DISTANCE};

mod extractor;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureId {
    SuccessorScore,
    DistanceToFood,
    FleeEnemy,
    FurthestEntrance,
    OnDefense,
    NumInvaders,
    InvaderDistance,
    StayNearPoi,
    Stop,
    Reverse,
    InHome,
}

impl FeatureId {
    pub const ALL: [Self; 11] = [
        Self::SuccessorScore,
        Self::DistanceToFood,
        Self::FleeEnemy,
        Self::FurthestEntrance,
        Self::OnDefense,
        Self::NumInvaders,
        Self::InvaderDistance,
        Self::StayNearPoi,
        Self::Stop,
        Self::Reverse,
        Self::InHome,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::SuccessorScore => "successor_score",
            Self::DistanceToFood => "distance_to_food",
            Self::FleeEnemy => "flee_enemy",
            Self::FurthestEntrance => "furthest_entrance",
            Self::OnDefense => "on_defense",
            Self::NumInvaders => "num_invaders",
            Self::InvaderDistance => "invader_distance",
            Self::StayNearPoi => "stay_near_poi",
            Self::Stop => "stop",
            Self::Reverse => "reverse",
            Self::InHome => "in_home",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SuccessorScore => "Successor Score",
            Self::DistanceToFood => "Distance to Food",
            Self::FleeEnemy => "Flee Enemy",
            Self::FurthestEntrance => "Furthest Entrance",
            Self::OnDefense => "On Defense",
            Self::NumInvaders => "Number of Invaders",
            Self::InvaderDistance => "Invader Distance",
            Self::StayNearPoi => "Stay Near Point of Interest",
            Self::Stop => "Stop",
            Self::Reverse => "Reverse",
            Self::InHome => "In Home Column",
        }
    }
}

/// Sparse mapping from feature to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: BTreeMap<FeatureId, f64>,
}

impl FeatureVector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, feature: FeatureId, value: f64) {
        self.values.insert(feature, value);
    }

    /// Value of `feature`, zero when unset.
    #[must_use]
    pub fn get(&self, feature: FeatureId) -> f64 {
        self.values.get(&feature).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn contains(&self, feature: FeatureId) -> bool {
        self.values.contains_key(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, f64)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }
}

impl FromIterator<(FeatureId, f64)> for FeatureVector {
    fn from_iter<T: IntoIterator<Item = (FeatureId, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FeatureVector {
    type Item = (&'a FeatureId, &'a f64);
    type IntoIter = btree_map::Iter<'a, FeatureId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
