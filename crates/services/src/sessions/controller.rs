use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use practice_core::Clock;
use practice_core::model::{Exercise, ModeSettings, QuestionId, SessionProgress};
use practice_core::selector::select_tier;
use store::QuestionSet;

use crate::error::SessionError;
use crate::evaluator::{AnswerEvaluator, Verdict};
use crate::hints::{HintGenerator, fallback_hint};

use super::view::SessionSnapshot;

//
// ─── SUBMIT OUTCOME ────────────────────────────────────────────────────────────
//

/// Outcome of submitting an answer for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub question_id: QuestionId,
    pub is_correct: bool,
    /// Raw evaluator output, or the error text when evaluation failed.
    pub output: String,
    /// Running score after applying the reward or penalty.
    pub score: i32,
    /// True when a fast correct answer moved the session up a tier.
    pub advanced_tier: bool,
    /// Feedback for an incorrect answer. Cached across identical retries.
    pub hint: Option<String>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One adaptive practice session over a single question set.
///
/// Owns the per-session [`SessionProgress`]; the question set is shared and
/// read-only. Steps through questions tier by tier: a question is served,
/// the user submits or skips, and the difficulty adapts to accuracy and
/// response time. External failures (evaluator, hint provider) are absorbed
/// here and surfaced as user-visible feedback, never as session errors.
pub struct PracticeSession<Q: Exercise> {
    questions: Arc<QuestionSet<Q>>,
    evaluator: Arc<dyn AnswerEvaluator<Q>>,
    hints: Arc<dyn HintGenerator>,
    settings: ModeSettings,
    clock: Clock,
    progress: SessionProgress,
    served: Option<QuestionId>,
}

impl<Q: Exercise> PracticeSession<Q> {
    #[must_use]
    pub fn new(
        questions: Arc<QuestionSet<Q>>,
        evaluator: Arc<dyn AnswerEvaluator<Q>>,
        hints: Arc<dyn HintGenerator>,
        settings: ModeSettings,
        clock: Clock,
    ) -> Self {
        let progress = SessionProgress::new(clock.now());
        Self {
            questions,
            evaluator,
            hints,
            settings,
            clock,
            progress,
            served: None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> &SessionProgress {
        &self.progress
    }

    #[must_use]
    pub fn settings(&self) -> ModeSettings {
        self.settings
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.progress.score()
    }

    /// Total number of questions in this session's set.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// True once every question in the set has been seen.
    ///
    /// Completion is the expected terminal state, not an error: serving
    /// reports it as `None` and submit/skip refuse with
    /// [`SessionError::Completed`].
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.seen_count() >= self.questions.len()
    }

    /// Mutable access to the session clock.
    ///
    /// Fixed clocks can be advanced to simulate response latency.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.progress.difficulty(),
            score: self.progress.score(),
            seen: self.progress.seen_count(),
            total: self.questions.len(),
            is_complete: self.is_complete(),
        }
    }

    /// Serves the question to display, adapting the stored tier and index.
    ///
    /// Runs the selector first: when the resolved tier differs from the
    /// stored one the within-tier index resets, and an index that ran past
    /// the end of the unseen subset is clamped back to the start. `None`
    /// means the session is complete.
    ///
    /// The response timer restarts when a different question is served;
    /// re-rendering the same question leaves it running.
    pub fn current_question(&mut self) -> Option<&Q> {
        let question = Self::resolve(&self.questions, &mut self.progress)?;
        if self.served != Some(question.id()) {
            self.served = Some(question.id());
            self.progress.restart_timer(self.clock.now());
        }
        Some(question)
    }

    /// Submits an answer for the currently served question.
    ///
    /// Correct answers mark the question seen and score the reward; fast
    /// ones additionally bump the tier one step and reset the index, slow
    /// ones advance the index instead. Incorrect answers score the penalty,
    /// leave tier/index/seen-set untouched so the question can be retried,
    /// and carry hint text (requested once per distinct input, cached for
    /// identical retries). Evaluator failures are treated as incorrect with
    /// the error text as output; hint failures substitute fallback text.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when every question has been seen.
    pub async fn submit(&mut self, input: &str) -> Result<SubmitOutcome, SessionError> {
        let questions = Arc::clone(&self.questions);
        let Some(question) = Self::resolve(&questions, &mut self.progress) else {
            return Err(SessionError::Completed);
        };

        self.progress.record_submission(input);

        let verdict = match self.evaluator.evaluate(question, input).await {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(question = %question.id(), error = %err, "evaluator failed; treated as incorrect");
                Verdict::incorrect(err.to_string())
            }
        };

        if verdict.is_correct {
            Ok(self.apply_correct(question.id(), verdict.output))
        } else {
            let hint = self.hint_for(question.description(), input).await;
            Ok(self.apply_incorrect(question.id(), verdict.output, hint))
        }
    }

    /// Skips the currently served question.
    ///
    /// The question is marked seen (it will not come back), the index moves
    /// on, and the response timer restarts. Score and tier never change.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when every question has been seen.
    pub fn skip(&mut self) -> Result<QuestionId, SessionError> {
        let questions = Arc::clone(&self.questions);
        let Some(question) = Self::resolve(&questions, &mut self.progress) else {
            return Err(SessionError::Completed);
        };
        let id = question.id();

        self.progress.mark_seen(id);
        self.progress.advance_index();
        self.progress.clear_attempt();
        self.progress.restart_timer(self.clock.now());
        self.served = None;

        debug!(question = %id, "question skipped");
        Ok(id)
    }

    fn apply_correct(&mut self, id: QuestionId, output: String) -> SubmitOutcome {
        self.progress.mark_seen(id);
        self.progress.add_score(self.settings.reward());

        let elapsed = self.progress.elapsed_secs(self.clock.now());
        let advanced_tier = if self.settings.is_fast(elapsed) {
            let before = self.progress.difficulty();
            self.progress.set_difficulty(before.bump(true));
            self.progress.reset_index();
            self.progress.difficulty() != before
        } else {
            self.progress.advance_index();
            false
        };

        self.progress.clear_attempt();
        self.served = None;

        debug!(
            question = %id,
            elapsed,
            advanced_tier,
            score = self.progress.score(),
            "correct answer"
        );

        SubmitOutcome {
            question_id: id,
            is_correct: true,
            output,
            score: self.progress.score(),
            advanced_tier,
            hint: None,
        }
    }

    fn apply_incorrect(&mut self, id: QuestionId, output: String, hint: String) -> SubmitOutcome {
        self.progress.add_score(-self.settings.penalty());

        debug!(question = %id, score = self.progress.score(), "incorrect answer");

        SubmitOutcome {
            question_id: id,
            is_correct: false,
            output,
            score: self.progress.score(),
            advanced_tier: false,
            hint: Some(hint),
        }
    }

    /// Cached hint for the current input, or a fresh request.
    async fn hint_for(&mut self, description: &str, input: &str) -> String {
        if let Some(cached) = self.progress.cached_hint() {
            return cached.to_string();
        }

        let text = match self.hints.generate_hint(description, input).await {
            Ok(hint) => hint,
            Err(err) => {
                warn!(error = %err, "hint request failed; substituting fallback");
                fallback_hint(&err)
            }
        };
        self.progress.cache_hint(text.clone());
        text
    }

    /// Resolves the record to display against the current progress.
    ///
    /// Pure with respect to the timer: serving/submitting/skipping decide
    /// separately whether the timer restarts.
    fn resolve<'a>(
        questions: &'a QuestionSet<Q>,
        progress: &mut SessionProgress,
    ) -> Option<&'a Q> {
        let tier = select_tier(progress.difficulty(), progress.seen(), questions.all())?;
        progress.set_difficulty(tier);

        let unseen = questions.unseen(tier, progress.seen());
        progress.clamp_index(unseen.len());
        unseen.get(progress.index()).copied()
    }
}

impl<Q: Exercise> fmt::Debug for PracticeSession<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("total_questions", &self.questions.len())
            .field("difficulty", &self.progress.difficulty())
            .field("seen", &self.progress.seen_count())
            .field("score", &self.progress.score())
            .field("served", &self.served)
            .finish_non_exhaustive()
    }
}
