use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{ChatMessage, ChatModel};
use crate::error::CoreError;
use crate::CoreResult;

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
const MODEL_ID: &str = "gemini-2.5-flash";
const API_KEY_VAR: &str = "GEMINI_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini over its OpenAI-compatible chat completions endpoint. One blocking
/// request per question; the API key is read from the environment at call
/// time so a key exported mid-session is picked up.
pub struct GeminiModel {
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl GeminiModel {
    pub fn new() -> CoreResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| {
                CoreError::model_request_failed(&format!("cannot build HTTP client: {error}"))
            })?;
        Ok(Self { client })
    }
}

impl ChatModel for GeminiModel {
    fn complete(&self, messages: &[ChatMessage]) -> CoreResult<String> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| CoreError::model_key_missing())?;

        debug!(model = MODEL_ID, messages = messages.len(), "sending chat completion request");

        let response = self
            .client
            .post(GEMINI_URL)
            .bearer_auth(api_key)
            .json(&json!({
                "model": MODEL_ID,
                "messages": messages,
                "temperature": 0.7,
                "max_tokens": 2048,
            }))
            .send()
            .map_err(|error| CoreError::model_request_failed(&error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let detail = if body.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {body}")
            };
            return Err(CoreError::model_request_failed(&detail));
        }

        let completion: CompletionResponse = response
            .json()
            .map_err(|error| CoreError::model_request_failed(&format!("invalid response body: {error}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| "I couldn't generate a response.".to_string());

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::CompletionResponse;

    #[test]
    fn completion_response_parses_first_choice_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn completion_response_tolerates_missing_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.choices[0].message.content.is_none());
    }
}
