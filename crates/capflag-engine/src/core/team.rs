use serde::{Deserialize, Serialize};

/// One of the two competing teams.
///
/// Red agents have even indices and defend the left half of the board; blue agents have
/// odd indices and defend the right half.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    #[must_use]
    pub fn of_agent(index: usize) -> Self {
        if index % 2 == 0 { Self::Red } else { Self::Blue }
    }

    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Whether `column` lies on this team's half of a board `width` cells wide.
    #[must_use]
    pub fn is_home_column(self, column: i32, width: usize) -> bool {
        let half = i32::try_from(width / 2).unwrap_or(i32::MAX);
        match self {
            Self::Red => column < half,
            Self::Blue => column >= half,
        }
    }

    /// The column of this team's half that touches the midline.
    #[must_use]
    pub fn boundary_column(self, width: usize) -> i32 {
        let half = i32::try_from(width / 2).unwrap_or(i32::MAX);
        match self {
            Self::Red => half - 1,
            Self::Blue => half,
        }
    }

    /// Sign applied to the red-positive score to get this team's differential.
    #[must_use]
    pub fn score_sign(self) -> i32 {
        match self {
            Self::Red => 1,
            Self::Blue => -1,
        }
    }
}
