//! CSV decoding for the two question record sets.
//!
//! Rows are deserialized into raw shapes first, then converted into domain
//! questions: difficulty labels are normalized, literal-encoded fields are
//! JSON-decoded, and question constructors validate the rest. Any failure
//! aborts the load with the offending row.

use std::collections::HashSet;
use std::io::Read;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use practice_core::model::{
    CodingQuestion, Difficulty, Literal, QuestionId, QuizQuestion,
};

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct CodingRow {
    id: u64,
    title: String,
    description: String,
    template: String,
    test_input: String,
    expected_output: String,
    difficulty: String,
}

#[derive(Debug, Deserialize)]
struct QuizRow {
    id: u64,
    question: String,
    options: String,
    correct_answer: String,
    difficulty: String,
}

pub(crate) fn read_coding<R: Read>(
    path: &str,
    reader: R,
) -> Result<Vec<CodingQuestion>, LoadError> {
    convert_rows(path, reader, |path, row, raw: CodingRow| {
        let difficulty = parse_difficulty(path, row, &raw.difficulty)?;
        let test_input = decode_literal(path, row, "test_input", &raw.test_input)?;
        let expected_output = decode_literal(path, row, "expected_output", &raw.expected_output)?;

        CodingQuestion::new(
            QuestionId::new(raw.id),
            difficulty,
            raw.title,
            raw.description,
            raw.template,
            test_input,
            expected_output,
        )
        .map_err(|source| LoadError::Question {
            path: path.to_string(),
            row,
            source,
        })
    })
}

pub(crate) fn read_quiz<R: Read>(path: &str, reader: R) -> Result<Vec<QuizQuestion>, LoadError> {
    convert_rows(path, reader, |path, row, raw: QuizRow| {
        let difficulty = parse_difficulty(path, row, &raw.difficulty)?;
        let options: Vec<String> =
            serde_json::from_str(&raw.options).map_err(|source| LoadError::Literal {
                path: path.to_string(),
                row,
                field: "options",
                source,
            })?;

        QuizQuestion::new(
            QuestionId::new(raw.id),
            difficulty,
            raw.question,
            options,
            raw.correct_answer,
        )
        .map_err(|source| LoadError::Question {
            path: path.to_string(),
            row,
            source,
        })
    })
}

fn convert_rows<R, Raw, Q, F>(path: &str, reader: R, convert: F) -> Result<Vec<Q>, LoadError>
where
    R: Read,
    Raw: DeserializeOwned,
    Q: practice_core::model::Exercise,
    F: Fn(&str, u64, Raw) -> Result<Q, LoadError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut questions = Vec::new();
    let mut ids = HashSet::new();

    for (offset, record) in csv_reader.deserialize::<Raw>().enumerate() {
        // Header occupies row 1; the first data record is row 2.
        let row = offset as u64 + 2;
        let raw = record.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })?;

        let question = convert(path, row, raw)?;
        if !ids.insert(question.id()) {
            return Err(LoadError::DuplicateId {
                path: path.to_string(),
                row,
                id: question.id(),
            });
        }
        questions.push(question);
    }

    Ok(questions)
}

fn parse_difficulty(path: &str, row: u64, label: &str) -> Result<Difficulty, LoadError> {
    Difficulty::parse_label(label).map_err(|source| LoadError::Difficulty {
        path: path.to_string(),
        row,
        source,
    })
}

fn decode_literal(
    path: &str,
    row: u64,
    field: &'static str,
    text: &str,
) -> Result<Literal, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Literal {
        path: path.to_string(),
        row,
        field,
        source,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
