//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while judging a submission.
///
/// These mean the judgement itself could not be carried out; a wrong answer
/// is a successful `Verdict`, not an error. The session controller absorbs
/// this class and treats it as an incorrect answer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvalError {
    #[error("failed to run the evaluation process")]
    Process(#[from] std::io::Error),

    #[error("evaluator produced unreadable output")]
    MalformedOutput(#[from] serde_json::Error),

    #[error("evaluation process exited without a verdict")]
    NoVerdict,
}

/// Errors emitted by the hint requester.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HintError {
    #[error("hint generation is not configured")]
    Disabled,

    #[error("hint provider returned an empty response")]
    EmptyResponse,

    #[error("hint request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by a practice session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("all questions have been completed")]
    Completed,
}
