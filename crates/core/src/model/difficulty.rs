use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DifficultyParseError {
    #[error("unknown difficulty label: {0:?}")]
    Unknown(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Three-tier difficulty scale for practice questions.
///
/// The derived `Ord` follows declaration order, so `Easy < Medium < Hard`.
/// Record sets store tiers as case-insensitive labels; parsing normalizes
/// them to this enum and `Display` renders the lowercase form back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ORDERED: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Moves exactly one step up or down the scale, clamped at both ends.
    ///
    /// `bump(true)` at [`Difficulty::Hard`] and `bump(false)` at
    /// [`Difficulty::Easy`] are no-ops; a step never skips a tier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use practice_core::model::Difficulty;
    /// assert_eq!(Difficulty::Easy.bump(true), Difficulty::Medium);
    /// assert_eq!(Difficulty::Hard.bump(true), Difficulty::Hard);
    /// assert_eq!(Difficulty::Easy.bump(false), Difficulty::Easy);
    /// ```
    #[must_use]
    pub fn bump(self, go_up: bool) -> Self {
        let idx = self.index();
        if go_up {
            Self::ORDERED.get(idx + 1).copied().unwrap_or(self)
        } else if idx > 0 {
            Self::ORDERED[idx - 1]
        } else {
            self
        }
    }

    /// Tiers from this one upward, in ascending order.
    pub fn ascending_from(self) -> impl Iterator<Item = Difficulty> {
        Self::ORDERED.into_iter().skip(self.index())
    }

    /// Parses a case-insensitive label as stored in the record sets.
    ///
    /// # Errors
    ///
    /// Returns `DifficultyParseError::Unknown` for any label that is not
    /// `easy`, `medium`, or `hard` after trimming and lowercasing.
    pub fn parse_label(label: &str) -> Result<Self, DifficultyParseError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DifficultyParseError::Unknown(label.to_string())),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_totally_ordered() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }

    #[test]
    fn bump_moves_one_step() {
        assert_eq!(Difficulty::Easy.bump(true), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.bump(true), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.bump(false), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.bump(false), Difficulty::Easy);
    }

    #[test]
    fn bump_clamps_at_boundaries() {
        assert_eq!(Difficulty::Hard.bump(true), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.bump(false), Difficulty::Easy);
    }

    #[test]
    fn ascending_from_skips_lower_tiers() {
        let from_medium: Vec<_> = Difficulty::Medium.ascending_from().collect();
        assert_eq!(from_medium, vec![Difficulty::Medium, Difficulty::Hard]);

        let from_easy: Vec<_> = Difficulty::Easy.ascending_from().collect();
        assert_eq!(from_easy.len(), 3);
    }

    #[test]
    fn parse_label_is_case_insensitive() {
        assert_eq!(Difficulty::parse_label("Easy").unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::parse_label("MEDIUM").unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::parse_label("  hard ").unwrap(), Difficulty::Hard);
    }

    #[test]
    fn parse_label_rejects_unknown() {
        let err = Difficulty::parse_label("impossible").unwrap_err();
        assert!(matches!(err, DifficultyParseError::Unknown(label) if label == "impossible"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for tier in Difficulty::ORDERED {
            assert_eq!(tier.to_string().parse::<Difficulty>().unwrap(), tier);
        }
    }
}
