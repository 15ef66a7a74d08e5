//! Linear scoring: `score = Σ featureᵢ × weightᵢ`.
//!
//! Features without a weight and weights without a feature both contribute zero, so the
//! sum only has to visit the features that were actually set.

use crate::{feature::FeatureVector, weights::WeightTable};

#[must_use]
pub fn score(features: &FeatureVector, weights: &WeightTable) -> f64 {
    features
        .iter()
        .map(|(feature, value)| value * weights.get(feature))
        .sum()
}
