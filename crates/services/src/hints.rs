use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::HintError;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Connection settings for the hint provider, an OpenAI-compatible
/// chat-completions endpoint.
#[derive(Clone, Debug)]
pub struct HintConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl HintConfig {
    /// Reads configuration from `PRACTICE_AI_*` environment variables.
    ///
    /// Returns `None` when no API key is set; the session then runs with
    /// hint generation disabled and falls back to substitute text.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("PRACTICE_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("PRACTICE_AI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("PRACTICE_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

//
// ─── HINT SEAM ─────────────────────────────────────────────────────────────────
//

/// Produces tutoring feedback for an incorrect submission.
#[async_trait]
pub trait HintGenerator: Send + Sync {
    /// Returns feedback text for the given problem statement and
    /// submission. The feedback must not reveal a complete solution.
    ///
    /// # Errors
    ///
    /// Returns `HintError` when the provider is unavailable; callers treat
    /// that as recoverable and substitute [`fallback_hint`].
    async fn generate_hint(
        &self,
        description: &str,
        submission: &str,
    ) -> Result<String, HintError>;
}

/// Substitute feedback shown when the hint provider fails.
///
/// The failure reason is embedded rather than silently dropped so the user
/// can tell a provider outage from an empty hint.
#[must_use]
pub fn fallback_hint(err: &HintError) -> String {
    format!("Error generating feedback: {err}")
}

//
// ─── HINT SERVICE ──────────────────────────────────────────────────────────────
//

/// Chat-completions backed [`HintGenerator`].
#[derive(Clone)]
pub struct HintService {
    client: Client,
    config: Option<HintConfig>,
}

impl HintService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(HintConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<HintConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    fn prompt(description: &str, submission: &str) -> String {
        format!(
            "You are a coding tutor. A student is trying to solve the following problem:\n\n\
             {description}\n\n\
             They submitted this answer:\n{submission}\n\n\
             Please provide constructive feedback or a hint without giving the full answer."
        )
    }
}

#[async_trait]
impl HintGenerator for HintService {
    async fn generate_hint(
        &self,
        description: &str,
        submission: &str,
    ) -> Result<String, HintError> {
        let config = self.config.as_ref().ok_or(HintError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: Self::prompt(description, submission),
            }],
            temperature: 0.4,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HintError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(HintError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
