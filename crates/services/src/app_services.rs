use std::sync::Arc;

use practice_core::Clock;
use practice_core::model::{CodingQuestion, PracticeMode, QuizQuestion};
use store::QuestionBank;

use crate::evaluator::QuizEvaluator;
use crate::hints::{HintGenerator, HintService};
use crate::python::PythonRunner;
use crate::sessions::PracticeSession;

/// Session over the coding record set, judged by the Python runner.
pub type CodingSession = PracticeSession<CodingQuestion>;

/// Session over the quiz record set, judged by exact option match.
pub type QuizSession = PracticeSession<QuizQuestion>;

/// Assembles the shared question bank and collaborators, and starts
/// per-mode sessions.
///
/// The bank is loaded once and shared read-only across every session;
/// each session owns its own mutable progress.
#[derive(Clone)]
pub struct AppServices {
    bank: QuestionBank,
    hints: Arc<dyn HintGenerator>,
    clock: Clock,
}

impl AppServices {
    #[must_use]
    pub fn new(bank: QuestionBank, hints: Arc<dyn HintGenerator>, clock: Clock) -> Self {
        Self { bank, hints, clock }
    }

    /// Builds services with the hint provider configured from the
    /// `PRACTICE_AI_*` environment.
    #[must_use]
    pub fn with_env_hints(bank: QuestionBank, clock: Clock) -> Self {
        Self::new(bank, Arc::new(HintService::from_env()), clock)
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Starts a fresh coding session.
    #[must_use]
    pub fn coding_session(&self) -> CodingSession {
        PracticeSession::new(
            self.bank.coding(),
            Arc::new(PythonRunner::new()),
            Arc::clone(&self.hints),
            PracticeMode::Coding.settings(),
            self.clock,
        )
    }

    /// Starts a fresh quiz session.
    #[must_use]
    pub fn quiz_session(&self) -> QuizSession {
        PracticeSession::new(
            self.bank.quiz(),
            Arc::new(QuizEvaluator),
            Arc::clone(&self.hints),
            PracticeMode::Quiz.settings(),
            self.clock,
        )
    }
}
