//! Question difficulty levels

use serde::{Deserialize, Serialize};

/// Difficulty of a question, normalized from free-text dataset input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy
    Easy,
    /// Medium
    Medium,
    /// Hard
    Hard,
    /// Missing or unrecognized in the source data
    #[default]
    Unknown,
}

impl Difficulty {
    /// Normalize free-text input, case-insensitive. Never fails.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Unknown)
    }

    /// Sort ordinal: Easy=1, Medium=2, Hard=3, Unknown=4
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Unknown => 4,
        }
    }

    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid difficulty: {s}. Use: easy, medium, hard, unknown")),
        }
    }
}
