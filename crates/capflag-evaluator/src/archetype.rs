//! The two concrete agent policies.
//!
//! | archetype          | mode selector                 | patrol     |
//! |--------------------|-------------------------------|------------|
//! | `careful-offense`  | [`ProtectLead`] (lead > 5)    | furthest   |
//! | `defensive`        | [`AlwaysDefend`]              | nearest    |
//!
//! Both share the same default weight tables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigurationError,
    action_policy::ReflexPolicy,
    feature::{FeatureExtractor, Patrol},
    mode::{AlwaysDefend, ModeSelector, ProtectLead},
    weights::ModeWeights,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    /// Attacks for food, fleeing visible chasers, and defends once well ahead.
    #[display("careful-offense")]
    CarefulOffense,
    /// Guards the home half and intercepts invaders.
    #[display("defensive")]
    Defensive,
}

impl Archetype {
    pub const ALL: [Self; 2] = [Self::CarefulOffense, Self::Defensive];

    #[must_use]
    pub fn mode_selector(self) -> Box<dyn ModeSelector> {
        match self {
            Self::CarefulOffense => Box::new(ProtectLead::default()),
            Self::Defensive => Box::new(AlwaysDefend),
        }
    }

    #[must_use]
    pub fn feature_extractor(self) -> FeatureExtractor {
        match self {
            Self::CarefulOffense => FeatureExtractor::new(Patrol::Furthest),
            Self::Defensive => FeatureExtractor::new(Patrol::Nearest),
        }
    }

    #[must_use]
    pub fn policy(self) -> ReflexPolicy {
        self.policy_with_weights(ModeWeights::default())
    }

    #[must_use]
    pub fn policy_with_weights(self, weights: ModeWeights) -> ReflexPolicy {
        ReflexPolicy::new(self, self.mode_selector(), self.feature_extractor(), weights)
    }
}

impl FromStr for Archetype {
    type Err = ConfigurationError;

    /// Accepts the kebab-case name, its snake-case spelling or the agent class name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "careful-offense" | "careful_offense" | "CarefulOffenseAgent" => {
                Ok(Self::CarefulOffense)
            }
            "defensive" | "DefensiveReflexAgent" => Ok(Self::Defensive),
            _ => Err(ConfigurationError::UnknownArchetype { name: s.to_owned() }),
        }
    }
}
