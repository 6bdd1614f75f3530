use async_trait::async_trait;

use practice_core::model::QuizQuestion;

use crate::error::EvalError;

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// Judgement for one submission: correctness plus the raw output or error
/// text to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub output: String,
}

impl Verdict {
    #[must_use]
    pub fn correct(output: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            output: output.into(),
        }
    }

    #[must_use]
    pub fn incorrect(output: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            output: output.into(),
        }
    }
}

//
// ─── EVALUATOR SEAM ────────────────────────────────────────────────────────────
//

/// Judges a submitted answer for one question type.
///
/// The session controller talks to evaluation only through this trait, so a
/// mode supplies its own judgement (choice match, code execution) while the
/// selection machinery stays shared.
#[async_trait]
pub trait AnswerEvaluator<Q>: Send + Sync {
    /// Judge `submission` against `question`.
    ///
    /// # Errors
    ///
    /// Returns `EvalError` only when the judgement could not be carried
    /// out; a wrong answer is an `Ok` verdict.
    async fn evaluate(&self, question: &Q, submission: &str) -> Result<Verdict, EvalError>;
}

//
// ─── QUIZ EVALUATOR ────────────────────────────────────────────────────────────
//

/// Exact-match evaluator for multiple-choice questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizEvaluator;

#[async_trait]
impl AnswerEvaluator<QuizQuestion> for QuizEvaluator {
    async fn evaluate(&self, question: &QuizQuestion, submission: &str) -> Result<Verdict, EvalError> {
        if submission == question.answer() {
            Ok(Verdict::correct(submission))
        } else {
            Ok(Verdict::incorrect(submission))
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
