//! Coding-answer evaluation through a Python subprocess.

use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use practice_core::model::{CodingQuestion, Literal};

use crate::error::EvalError;
use crate::evaluator::{AnswerEvaluator, Verdict};

/// One-shot driver: reads a JSON request on stdin, executes the submitted
/// source in a fresh scope, calls the target function with the decoded
/// arguments, and prints a JSON reply on stdout. Exceptions are reported
/// in-band so a broken submission never looks like a broken runner.
const DRIVER: &str = r#"
import json, sys

req = json.load(sys.stdin)
scope = {}
try:
    exec(req["source"], scope, scope)
    fn = scope.get(req["function"])
    if fn is None:
        raise NameError("function %r is not defined" % req["function"])
    result = fn(*req["args"])
    json.dump({"ok": True, "result": result}, sys.stdout)
except Exception as exc:
    json.dump({"ok": False, "error": "%s: %s" % (type(exc).__name__, exc)}, sys.stdout)
"#;

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    source: &'a str,
    function: &'a str,
    args: Vec<Literal>,
}

#[derive(Debug, Deserialize)]
struct RunReply {
    ok: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Evaluates coding submissions by running them under a Python interpreter.
///
/// No timeout or cancellation is applied; a hung submission stalls only its
/// own session. Sandboxing beyond the fresh interpreter process is out of
/// scope here.
#[derive(Debug, Clone)]
pub struct PythonRunner {
    interpreter: String,
}

impl PythonRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            interpreter: "python3".into(),
        }
    }

    /// Uses a specific interpreter binary instead of `python3`.
    #[must_use]
    pub fn with_interpreter(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl Default for PythonRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerEvaluator<CodingQuestion> for PythonRunner {
    async fn evaluate(
        &self,
        question: &CodingQuestion,
        submission: &str,
    ) -> Result<Verdict, EvalError> {
        let request = RunRequest {
            source: submission,
            function: question.function_name(),
            args: question.test_input().as_args(),
        };
        let payload = serde_json::to_vec(&request)?;

        let mut child = Command::new(&self.interpreter)
            .arg("-c")
            .arg(DRIVER)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await?;
        }

        let output = child.wait_with_output().await?;
        if output.stdout.is_empty() {
            return Err(EvalError::NoVerdict);
        }

        let reply: RunReply = serde_json::from_slice(&output.stdout)?;
        Ok(judge(question, &reply))
    }
}

fn judge(question: &CodingQuestion, reply: &RunReply) -> Verdict {
    if !reply.ok {
        let text = reply
            .error
            .clone()
            .unwrap_or_else(|| "evaluation failed".into());
        return Verdict::incorrect(text);
    }

    let result = reply.result.clone().unwrap_or(serde_json::Value::Null);
    let is_correct = serde_json::from_value::<Literal>(result.clone())
        .is_ok_and(|actual| question.expected_output().matches(&actual));

    Verdict {
        is_correct,
        output: render_value(&result),
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
