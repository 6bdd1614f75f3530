#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod evaluator;
pub mod hints;
pub mod python;
pub mod sessions;

pub use practice_core::Clock;

pub use app_services::{AppServices, CodingSession, QuizSession};
pub use error::{EvalError, HintError, SessionError};
pub use evaluator::{AnswerEvaluator, QuizEvaluator, Verdict};
pub use hints::{HintConfig, HintGenerator, HintService, fallback_hint};
pub use python::PythonRunner;
pub use sessions::{PracticeSession, SessionSnapshot, SubmitOutcome};
