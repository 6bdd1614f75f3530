use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed value for the literal-encoded record-set fields (test inputs,
/// expected outputs).
///
/// The record sets encode these as JSON text. They are decoded into this
/// enum once at load time, so evaluation never re-parses loosely-typed
/// strings. The untagged representation keeps variant order significant:
/// booleans before integers, integers before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Literal>),
}

impl Literal {
    /// Argument vector for invoking a target function.
    ///
    /// A list spreads into one argument per element; any other value is a
    /// single argument.
    #[must_use]
    pub fn as_args(&self) -> Vec<Literal> {
        match self {
            Literal::List(items) => items.clone(),
            other => vec![other.clone()],
        }
    }

    /// Value equality with numeric tolerance: `3` matches `3.0`.
    ///
    /// Lists match element-wise. No other cross-type coercions apply.
    #[must_use]
    pub fn matches(&self, other: &Literal) -> bool {
        match (self, other) {
            (Literal::Int(a), Literal::Float(b)) | (Literal::Float(b), Literal::Int(a)) => {
                #[allow(clippy::cast_precision_loss)]
                let a = *a as f64;
                a == *b
            }
            (Literal::List(a), Literal::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.matches(y))
            }
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Text(s) => write!(f, "{s}"),
            Literal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
