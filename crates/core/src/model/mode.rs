use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two practice modes a session can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    Coding,
    Quiz,
}

impl PracticeMode {
    /// Scoring and pacing constants for this mode.
    #[must_use]
    pub fn settings(self) -> ModeSettings {
        match self {
            PracticeMode::Coding => ModeSettings::coding(),
            PracticeMode::Quiz => ModeSettings::quiz(),
        }
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PracticeMode::Coding => "coding",
            PracticeMode::Quiz => "quiz",
        };
        write!(f, "{label}")
    }
}

/// Error parsing a practice mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown practice mode: {}", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for PracticeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coding" => Ok(Self::Coding),
            "quiz" => Ok(Self::Quiz),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Per-mode scoring and pacing constants.
///
/// The fast-answer threshold is a fixed constant per mode; if pacing ever
/// needs to scale with tier, this struct is the tuning point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSettings {
    reward: i32,
    penalty: i32,
    fast_answer_secs: i64,
}

impl ModeSettings {
    /// Coding defaults: +10 / −5, tier advance under 40 seconds.
    #[must_use]
    pub const fn coding() -> Self {
        Self {
            reward: 10,
            penalty: 5,
            fast_answer_secs: 40,
        }
    }

    /// Quiz defaults: +10 / −5, tier advance under 30 seconds.
    #[must_use]
    pub const fn quiz() -> Self {
        Self {
            reward: 10,
            penalty: 5,
            fast_answer_secs: 30,
        }
    }

    #[must_use]
    pub fn reward(&self) -> i32 {
        self.reward
    }

    #[must_use]
    pub fn penalty(&self) -> i32 {
        self.penalty
    }

    #[must_use]
    pub fn fast_answer_secs(&self) -> i64 {
        self.fast_answer_secs
    }

    /// True when a correct answer this quick should advance the tier.
    #[must_use]
    pub fn is_fast(&self, elapsed_secs: i64) -> bool {
        elapsed_secs < self.fast_answer_secs
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_settings_expose_scoring_constants() {
        let coding = PracticeMode::Coding.settings();
        assert_eq!(coding.reward(), 10);
        assert_eq!(coding.penalty(), 5);
        assert_eq!(coding.fast_answer_secs(), 40);

        let quiz = PracticeMode::Quiz.settings();
        assert_eq!(quiz.fast_answer_secs(), 30);
    }

    #[test]
    fn fast_threshold_is_exclusive() {
        let quiz = ModeSettings::quiz();
        assert!(quiz.is_fast(29));
        assert!(!quiz.is_fast(30));
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Coding".parse::<PracticeMode>().unwrap(), PracticeMode::Coding);
        assert_eq!("QUIZ".parse::<PracticeMode>().unwrap(), PracticeMode::Quiz);
        assert!("karaoke".parse::<PracticeMode>().is_err());
    }
}
