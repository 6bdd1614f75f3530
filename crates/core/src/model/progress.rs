use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::model::{Difficulty, QuestionId};

/// Mutable per-session practice state.
///
/// One value exists per running session, owned by its controller, and dies
/// with the session; nothing here is persisted. The seen-set is the source
/// of truth for coverage: an identifier enters it exactly once (on a correct
/// answer or a skip) and is never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProgress {
    difficulty: Difficulty,
    index: usize,
    seen: HashSet<QuestionId>,
    score: i32,
    timer_started_at: DateTime<Utc>,
    last_submission: Option<String>,
    cached_hint: Option<String>,
}

impl SessionProgress {
    /// Fresh progress: easiest tier, empty seen-set, score 0.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            difficulty: Difficulty::Easy,
            index: 0,
            seen: HashSet::new(),
            score: 0,
            timer_started_at: started_at,
            last_submission: None,
            cached_hint: None,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn seen(&self) -> &HashSet<QuestionId> {
        &self.seen
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn timer_started_at(&self) -> DateTime<Utc> {
        self.timer_started_at
    }

    #[must_use]
    pub fn last_submission(&self) -> Option<&str> {
        self.last_submission.as_deref()
    }

    #[must_use]
    pub fn cached_hint(&self) -> Option<&str> {
        self.cached_hint.as_deref()
    }

    /// Switches tier; the within-tier index resets when the tier changes.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            self.difficulty = difficulty;
            self.index = 0;
        }
    }

    /// Resets an index that ran past the end of the unseen subset.
    pub fn clamp_index(&mut self, unseen_len: usize) {
        if self.index >= unseen_len {
            self.index = 0;
        }
    }

    pub fn advance_index(&mut self) {
        self.index += 1;
    }

    pub fn reset_index(&mut self) {
        self.index = 0;
    }

    /// Inserts into the seen-set. Returns false when already present, so
    /// repeated marking is harmless.
    pub fn mark_seen(&mut self, id: QuestionId) -> bool {
        self.seen.insert(id)
    }

    #[must_use]
    pub fn has_seen(&self, id: QuestionId) -> bool {
        self.seen.contains(&id)
    }

    pub fn add_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta);
    }

    /// Records the submitted input. The cached hint is dropped whenever the
    /// input differs from the previous submission, so a changed answer gets
    /// fresh feedback while identical retries reuse the cached text.
    pub fn record_submission(&mut self, input: &str) {
        if self.last_submission.as_deref() != Some(input) {
            self.last_submission = Some(input.to_string());
            self.cached_hint = None;
        }
    }

    pub fn cache_hint(&mut self, hint: String) {
        self.cached_hint = Some(hint);
    }

    /// Clears the submission/hint pair once a question is resolved.
    pub fn clear_attempt(&mut self) {
        self.last_submission = None;
        self.cached_hint = None;
    }

    pub fn restart_timer(&mut self, now: DateTime<Utc>) {
        self.timer_started_at = now;
    }

    /// Whole seconds elapsed since the response timer started.
    #[must_use]
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.timer_started_at).num_seconds()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
