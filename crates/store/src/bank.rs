use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use practice_core::model::{CodingQuestion, Difficulty, Exercise, QuestionId, QuizQuestion};

use crate::error::LoadError;
use crate::load;

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered, read-only collection of questions for one mode.
///
/// Questions keep their load order; tier views preserve it. There are no
/// mutation operations, so a set is safely shared across sessions.
#[derive(Debug, Clone)]
pub struct QuestionSet<Q> {
    questions: Vec<Q>,
}

impl<Q: Exercise> QuestionSet<Q> {
    pub(crate) fn new(questions: Vec<Q>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Every question, in load order.
    #[must_use]
    pub fn all(&self) -> &[Q] {
        &self.questions
    }

    /// Questions of one tier, in load order.
    pub fn of_difficulty(&self, tier: Difficulty) -> impl Iterator<Item = &Q> {
        self.questions.iter().filter(move |q| q.difficulty() == tier)
    }

    /// Unseen questions of one tier, in load order.
    #[must_use]
    pub fn unseen(&self, tier: Difficulty, seen: &HashSet<QuestionId>) -> Vec<&Q> {
        self.of_difficulty(tier)
            .filter(|q| !seen.contains(&q.id()))
            .collect()
    }

    #[must_use]
    pub fn unseen_count(&self, tier: Difficulty, seen: &HashSet<QuestionId>) -> usize {
        self.of_difficulty(tier)
            .filter(|q| !seen.contains(&q.id()))
            .count()
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// The two record sets, loaded once per process and shared read-only.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    coding: Arc<QuestionSet<CodingQuestion>>,
    quiz: Arc<QuestionSet<QuizQuestion>>,
}

impl QuestionBank {
    /// Loads both record sets from CSV files.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when either file is missing or any row is
    /// malformed; a partially valid bank is never produced.
    pub fn load(
        coding_path: impl AsRef<Path>,
        quiz_path: impl AsRef<Path>,
    ) -> Result<Self, LoadError> {
        let coding = load::read_coding(
            &coding_path.as_ref().display().to_string(),
            open(coding_path.as_ref())?,
        )?;
        let quiz = load::read_quiz(
            &quiz_path.as_ref().display().to_string(),
            open(quiz_path.as_ref())?,
        )?;
        Ok(Self::from_sets(coding, quiz))
    }

    /// Loads both record sets from in-memory readers.
    ///
    /// `coding_label` and `quiz_label` stand in for file paths in error
    /// messages.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when any row is malformed.
    pub fn from_readers<C: Read, Z: Read>(
        coding_label: &str,
        coding: C,
        quiz_label: &str,
        quiz: Z,
    ) -> Result<Self, LoadError> {
        let coding = load::read_coding(coding_label, coding)?;
        let quiz = load::read_quiz(quiz_label, quiz)?;
        Ok(Self::from_sets(coding, quiz))
    }

    fn from_sets(coding: Vec<CodingQuestion>, quiz: Vec<QuizQuestion>) -> Self {
        Self {
            coding: Arc::new(QuestionSet::new(coding)),
            quiz: Arc::new(QuestionSet::new(quiz)),
        }
    }

    /// Shared handle to the coding set.
    #[must_use]
    pub fn coding(&self) -> Arc<QuestionSet<CodingQuestion>> {
        Arc::clone(&self.coding)
    }

    /// Shared handle to the quiz set.
    #[must_use]
    pub fn quiz(&self) -> Arc<QuestionSet<QuizQuestion>> {
        Arc::clone(&self.quiz)
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
