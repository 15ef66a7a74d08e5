//! Offense/defense switch.
//!
//! Agents re-derive their [`Mode`] every turn from the score differential; nothing is
//! remembered between turns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lead above which an attacker falls back to defending.
pub const LEAD_THRESHOLD: i32 = 5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Offense,
    Defense,
}

pub trait ModeSelector: fmt::Debug + Send + Sync {
    /// Mode for a turn where the agent's team leads by `score_differential` (negative
    /// when behind).
    fn select_mode(&self, score_differential: i32) -> Mode;
}

/// Attacks until the lead exceeds `threshold`, then defends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectLead {
    pub threshold: i32,
}

impl Default for ProtectLead {
    fn default() -> Self {
        Self {
            threshold: LEAD_THRESHOLD,
        }
    }
}

impl ModeSelector for ProtectLead {
    fn select_mode(&self, score_differential: i32) -> Mode {
        if score_differential > self.threshold {
            Mode::Defense
        } else {
            Mode::Offense
        }
    }
}

/// Always defends, whatever the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysDefend;

impl ModeSelector for AlwaysDefend {
    fn select_mode(&self, _score_differential: i32) -> Mode {
        Mode::Defense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_lead_switches_strictly_above_threshold() {
        let selector = ProtectLead::default();
        assert_eq!(selector.select_mode(-3), Mode::Offense);
        assert_eq!(selector.select_mode(5), Mode::Offense);
        assert_eq!(selector.select_mode(6), Mode::Defense);
    }

    #[test]
    fn test_always_defend() {
        for diff in [-10, 0, 10] {
            assert_eq!(AlwaysDefend.select_mode(diff), Mode::Defense);
        }
    }
}
