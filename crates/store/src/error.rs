use thiserror::Error;

use practice_core::model::{DifficultyParseError, QuestionError, QuestionId};

/// Errors raised while loading the question record sets.
///
/// Loading is the only fatal path in the system: a bank that fails to load
/// means no session can start. Row-level variants carry the 1-based CSV row
/// (the header is row 1) so a bad record can be found and fixed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("cannot read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} row {row}: {source}")]
    Difficulty {
        path: String,
        row: u64,
        #[source]
        source: DifficultyParseError,
    },

    #[error("{path} row {row}: field {field:?} is not a valid literal")]
    Literal {
        path: String,
        row: u64,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} row {row}: duplicate question id {id}")]
    DuplicateId {
        path: String,
        row: u64,
        id: QuestionId,
    },

    #[error("{path} row {row}: {source}")]
    Question {
        path: String,
        row: u64,
        #[source]
        source: QuestionError,
    },
}
