use thiserror::Error;

use crate::model::{Difficulty, Literal, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Validation errors raised when constructing a question record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("template does not define a function (expected `def <name>(`)")]
    NoFunction,

    #[error("question has no answer options")]
    NoOptions,

    #[error("correct answer {answer:?} is not one of the options")]
    UnknownAnswer { answer: String },
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// Common surface the selector and the session engine need from a question.
///
/// Both question types implement it, which lets the same selection and
/// session machinery run the coding and the quiz mode.
pub trait Exercise {
    fn id(&self) -> QuestionId;
    fn difficulty(&self) -> Difficulty;

    /// Problem statement handed to the hint provider.
    fn description(&self) -> &str;
}

//
// ─── CODING QUESTION ───────────────────────────────────────────────────────────
//

/// A coding exercise: the user submits source text that must define the
/// function named in the starter template.
#[derive(Debug, Clone, PartialEq)]
pub struct CodingQuestion {
    id: QuestionId,
    difficulty: Difficulty,
    title: String,
    description: String,
    template: String,
    test_input: Literal,
    expected_output: Literal,
}

impl CodingQuestion {
    /// Builds a coding question, validating that the template names a
    /// target function.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoFunction` if no `def <name>(` can be found
    /// in the template.
    pub fn new(
        id: QuestionId,
        difficulty: Difficulty,
        title: impl Into<String>,
        description: impl Into<String>,
        template: impl Into<String>,
        test_input: Literal,
        expected_output: Literal,
    ) -> Result<Self, QuestionError> {
        let template = template.into();
        if extract_function_name(&template).is_none() {
            return Err(QuestionError::NoFunction);
        }

        Ok(Self {
            id,
            difficulty,
            title: title.into(),
            description: description.into(),
            template,
            test_input,
            expected_output,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn test_input(&self) -> &Literal {
        &self.test_input
    }

    #[must_use]
    pub fn expected_output(&self) -> &Literal {
        &self.expected_output
    }

    /// Name of the function a submission must define.
    ///
    /// Extracted from the template: the text between `def ` and the first
    /// `(` that follows it. Construction guarantees it exists.
    #[must_use]
    pub fn function_name(&self) -> &str {
        extract_function_name(&self.template).unwrap_or_default()
    }
}

impl Exercise for CodingQuestion {
    fn id(&self) -> QuestionId {
        self.id
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn description(&self) -> &str {
        &self.description
    }
}

fn extract_function_name(template: &str) -> Option<&str> {
    let rest = template.split("def ").nth(1)?;
    let name = rest.split('(').next()?.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        None
    } else {
        Some(name)
    }
}

//
// ─── QUIZ QUESTION ─────────────────────────────────────────────────────────────
//

/// A multiple-choice question with one correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    id: QuestionId,
    difficulty: Difficulty,
    prompt: String,
    options: Vec<String>,
    answer: String,
}

impl QuizQuestion {
    /// Builds a quiz question, validating the options up front so a
    /// malformed row fails at load time instead of at evaluation time.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoOptions` when the option list is empty and
    /// `QuestionError::UnknownAnswer` when the correct answer does not
    /// match any option exactly.
    pub fn new(
        id: QuestionId,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let answer = answer.into();
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if !options.iter().any(|option| option == &answer) {
            return Err(QuestionError::UnknownAnswer { answer });
        }

        Ok(Self {
            id,
            difficulty,
            prompt: prompt.into(),
            options,
            answer,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl Exercise for QuizQuestion {
    fn id(&self) -> QuestionId {
        self.id
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn description(&self) -> &str {
        &self.prompt
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn coding(template: &str) -> Result<CodingQuestion, QuestionError> {
        CodingQuestion::new(
            QuestionId::new(1),
            Difficulty::Easy,
            "Sum",
            "Add two numbers.",
            template,
            Literal::List(vec![Literal::Int(2), Literal::Int(3)]),
            Literal::Int(5),
        )
    }

    #[test]
    fn extracts_function_name_from_template() {
        let q = coding("def add(a, b):\n    return 0").unwrap();
        assert_eq!(q.function_name(), "add");
    }

    #[test]
    fn function_name_ignores_leading_comment() {
        let q = coding("# solve below\ndef solve(xs):\n    pass").unwrap();
        assert_eq!(q.function_name(), "solve");
    }

    #[test]
    fn template_without_def_is_rejected() {
        let err = coding("return a + b").unwrap_err();
        assert!(matches!(err, QuestionError::NoFunction));
    }

    #[test]
    fn template_with_blank_name_is_rejected() {
        let err = coding("def (a, b):").unwrap_err();
        assert!(matches!(err, QuestionError::NoFunction));
    }

    #[test]
    fn quiz_requires_answer_among_options() {
        let err = QuizQuestion::new(
            QuestionId::new(1),
            Difficulty::Easy,
            "Pick one",
            vec!["a".into(), "b".into()],
            "c",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::UnknownAnswer { answer } if answer == "c"));
    }

    #[test]
    fn quiz_requires_options() {
        let err = QuizQuestion::new(
            QuestionId::new(1),
            Difficulty::Easy,
            "Pick one",
            Vec::new(),
            "a",
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::NoOptions));
    }

    #[test]
    fn quiz_answer_match_is_exact() {
        let q = QuizQuestion::new(
            QuestionId::new(2),
            Difficulty::Medium,
            "Pick one",
            vec!["Paris".into(), "paris".into()],
            "Paris",
        )
        .unwrap();
        assert_eq!(q.answer(), "Paris");
    }
}
