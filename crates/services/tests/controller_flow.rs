use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use practice_core::model::{Difficulty, ModeSettings, QuestionId};
use practice_core::time::{fixed_clock, fixed_now};
use services::{
    AnswerEvaluator, EvalError, HintError, HintGenerator, PracticeSession, QuizEvaluator,
    SessionError, Verdict,
};
use store::QuestionBank;

const CODING_CSV: &str = "\
id,title,description,template,test_input,expected_output,difficulty
1,Sum,Add two numbers.,\"def add(a, b):\",\"[2, 3]\",5,easy
";

const QUIZ_CSV: &str = "\
id,question,options,correct_answer,difficulty
1,What is 2 + 2?,\"[\"\"3\"\", \"\"4\"\"]\",4,easy
2,Largest planet?,\"[\"\"Mars\"\", \"\"Jupiter\"\"]\",Jupiter,medium
3,Binary of 5?,\"[\"\"101\"\", \"\"110\"\"]\",101,hard
";

struct CountingHints {
    calls: AtomicUsize,
}

impl CountingHints {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HintGenerator for CountingHints {
    async fn generate_hint(&self, _description: &str, _submission: &str) -> Result<String, HintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("compare the options against the definition".into())
    }
}

struct FailingHints;

#[async_trait]
impl HintGenerator for FailingHints {
    async fn generate_hint(&self, _description: &str, _submission: &str) -> Result<String, HintError> {
        Err(HintError::EmptyResponse)
    }
}

struct BrokenEvaluator;

#[async_trait]
impl<Q: practice_core::model::Exercise + Sync> AnswerEvaluator<Q> for BrokenEvaluator {
    async fn evaluate(&self, _question: &Q, _submission: &str) -> Result<Verdict, EvalError> {
        Err(EvalError::NoVerdict)
    }
}

fn bank() -> QuestionBank {
    QuestionBank::from_readers(
        "coding.csv",
        CODING_CSV.as_bytes(),
        "quiz.csv",
        QUIZ_CSV.as_bytes(),
    )
    .unwrap()
}

fn quiz_session(
    hints: Arc<dyn HintGenerator>,
) -> PracticeSession<practice_core::model::QuizQuestion> {
    PracticeSession::new(
        bank().quiz(),
        Arc::new(QuizEvaluator),
        hints,
        ModeSettings::quiz(),
        fixed_clock(),
    )
}

#[tokio::test]
async fn fast_correct_answer_advances_tier() {
    let mut session = quiz_session(CountingHints::new());

    let first = session.current_question().expect("question available");
    assert_eq!(first.id(), QuestionId::new(1));
    assert_eq!(first.difficulty(), Difficulty::Easy);

    let outcome = session.submit("4").await.unwrap();
    assert!(outcome.is_correct);
    assert!(outcome.advanced_tier);
    assert_eq!(outcome.score, 10);

    let progress = session.progress();
    assert_eq!(progress.difficulty(), Difficulty::Medium);
    assert_eq!(progress.index(), 0);
    assert!(progress.has_seen(QuestionId::new(1)));
    assert_eq!(progress.seen_count(), 1);
}

#[tokio::test]
async fn slow_correct_answer_keeps_tier_and_reselects_on_next_serve() {
    let mut session = quiz_session(CountingHints::new());

    session.current_question().expect("question available");
    session
        .clock_mut()
        .advance(chrono::Duration::seconds(45));

    let outcome = session.submit("4").await.unwrap();
    assert!(outcome.is_correct);
    assert!(!outcome.advanced_tier);
    assert_eq!(outcome.score, 10);

    // Tier stays easy and the index moved past the only easy question;
    // the next serve re-selects and lands on the medium tier.
    assert_eq!(session.progress().difficulty(), Difficulty::Easy);
    assert_eq!(session.progress().index(), 1);

    let next = session.current_question().expect("more questions remain");
    assert_eq!(next.id(), QuestionId::new(2));
    assert_eq!(session.progress().difficulty(), Difficulty::Medium);
    assert_eq!(session.progress().index(), 0);
}

#[tokio::test]
async fn incorrect_answer_retries_same_question_with_one_hint_per_input() {
    let hints = CountingHints::new();
    let mut session = quiz_session(hints.clone());

    session.current_question().expect("question available");

    let outcome = session.submit("3").await.unwrap();
    assert!(!outcome.is_correct);
    assert_eq!(outcome.score, -5);
    assert!(outcome.hint.is_some());
    assert_eq!(hints.calls(), 1);

    // Identical retry: penalty applies again, hint is served from cache.
    let outcome = session.submit("3").await.unwrap();
    assert_eq!(outcome.score, -10);
    assert_eq!(hints.calls(), 1);

    // The question was never marked seen and is still the one served.
    assert_eq!(session.progress().seen_count(), 0);
    let question = session.current_question().unwrap();
    assert_eq!(question.id(), QuestionId::new(1));

    // A different wrong input requests a fresh hint.
    let _ = session.submit("wrong again").await.unwrap();
    assert_eq!(hints.calls(), 2);
}

#[tokio::test]
async fn evaluator_failure_is_treated_as_incorrect() {
    let hints = CountingHints::new();
    let mut session = PracticeSession::new(
        bank().quiz(),
        Arc::new(BrokenEvaluator),
        hints.clone(),
        ModeSettings::quiz(),
        fixed_clock(),
    );

    session.current_question().expect("question available");
    let outcome = session.submit("4").await.unwrap();

    assert!(!outcome.is_correct);
    assert!(outcome.output.contains("without a verdict"));
    assert_eq!(outcome.score, -5);
    assert_eq!(hints.calls(), 1);
    assert_eq!(session.progress().seen_count(), 0);
}

#[tokio::test]
async fn hint_failure_substitutes_fallback_text() {
    let mut session = quiz_session(Arc::new(FailingHints));

    session.current_question().expect("question available");
    let outcome = session.submit("3").await.unwrap();

    let hint = outcome.hint.expect("fallback hint present");
    assert!(hint.contains("Error generating feedback"));
    assert!(hint.contains("empty response"));
}

#[tokio::test]
async fn skip_marks_seen_and_never_touches_score() {
    let mut session = quiz_session(CountingHints::new());

    let first = session.current_question().unwrap().id();
    let skipped = session.skip().unwrap();
    assert_eq!(skipped, first);
    assert_eq!(session.score(), 0);
    assert!(session.progress().has_seen(first));

    let second = session.current_question().unwrap().id();
    assert_ne!(second, first);
}

#[tokio::test]
async fn skipping_the_last_question_reports_completion() {
    let mut session = quiz_session(CountingHints::new());

    for _ in 0..3 {
        session.current_question().expect("question available");
        session.skip().unwrap();
    }

    assert!(session.is_complete());
    assert!(session.current_question().is_none());
    assert!(matches!(session.skip(), Err(SessionError::Completed)));

    let err = session.submit("4").await.unwrap_err();
    assert!(matches!(err, SessionError::Completed));
}

#[tokio::test]
async fn every_question_is_served_exactly_once_across_a_session() {
    let mut session = quiz_session(CountingHints::new());
    let mut served = Vec::new();

    while let Some(question) = session.current_question() {
        served.push(question.id());
        let answer = question.answer().to_string();
        let outcome = session.submit(&answer).await.unwrap();
        assert!(outcome.is_correct);
    }

    assert!(session.is_complete());
    assert_eq!(served.len(), 3);

    let mut unique = served.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), served.len(), "a question repeated: {served:?}");

    // Fast correct answers throughout: +10 per question.
    assert_eq!(session.score(), 30);

    let snapshot = session.snapshot();
    assert!(snapshot.is_complete);
    assert_eq!(snapshot.seen, snapshot.total);
}

#[tokio::test]
async fn timer_runs_from_first_serve_not_from_rerender() {
    let mut session = quiz_session(CountingHints::new());

    session.current_question().expect("question available");
    session
        .clock_mut()
        .advance(chrono::Duration::seconds(45));

    // Re-rendering must not restart the timer.
    session.current_question().expect("same question");
    assert_eq!(
        session.progress().timer_started_at(),
        fixed_now(),
        "timer restarted on re-render"
    );

    let outcome = session.submit("4").await.unwrap();
    assert!(!outcome.advanced_tier, "a 45s answer is not fast");
}
