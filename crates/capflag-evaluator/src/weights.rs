//! Fixed weight tables.
//!
//! Each archetype carries one [`WeightTable`] per [`Mode`]. Tables are plain immutable
//! values: they are built once (from the defaults below or from a JSON file) and only
//! read afterwards.
//!
//! # File format
//!
//! ```json
//! {
//!   "offense": { "successor_score": 100.0, "distance_to_food": -1.0 },
//!   "defense": { "num_invaders": -1000.0, "on_defense": 100.0 }
//! }
//! ```
//!
//! Unknown feature names are rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, feature::FeatureId, mode::Mode};

/// Mapping from feature to coefficient; missing features weigh zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<FeatureId, f64>,
}

impl WeightTable {
    /// Weights for chasing food while avoiding chasers.
    #[must_use]
    pub fn offense() -> Self {
        Self::from_iter([
            (FeatureId::SuccessorScore, 100.0),
            (FeatureId::DistanceToFood, -1.0),
            (FeatureId::FleeEnemy, -100.0),
            (FeatureId::FurthestEntrance, -100.0),
        ])
    }

    /// Weights for guarding the home half.
    #[must_use]
    pub fn defense() -> Self {
        Self::from_iter([
            (FeatureId::NumInvaders, -1000.0),
            (FeatureId::OnDefense, 100.0),
            (FeatureId::InvaderDistance, -1.0),
            (FeatureId::Stop, -100.0),
            (FeatureId::Reverse, -2.0),
            (FeatureId::StayNearPoi, -0.5),
            (FeatureId::InHome, -100.0),
        ])
    }

    #[must_use]
    pub fn get(&self, feature: FeatureId) -> f64 {
        self.weights.get(&feature).copied().unwrap_or(0.0)
    }
}

impl FromIterator<(FeatureId, f64)> for WeightTable {
    fn from_iter<T: IntoIterator<Item = (FeatureId, f64)>>(iter: T) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// The pair of tables an archetype switches between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeWeights {
    pub offense: WeightTable,
    pub defense: WeightTable,
}

impl Default for ModeWeights {
    fn default() -> Self {
        Self {
            offense: WeightTable::offense(),
            defense: WeightTable::defense(),
        }
    }
}

impl ModeWeights {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(ConfigurationError::InvalidWeights)
    }

    #[must_use]
    pub fn for_mode(&self, mode: Mode) -> &WeightTable {
        match mode {
            Mode::Offense => &self.offense,
            Mode::Defense => &self.defense,
        }
    }
}
