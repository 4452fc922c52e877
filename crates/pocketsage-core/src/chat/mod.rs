mod gemini;
mod prompt;

pub use gemini::GeminiModel;
pub use prompt::SYSTEM_PROMPT;

use serde::{Deserialize, Serialize};

use crate::CoreResult;

const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: String) -> Self {
        Self { role: Role::System, content }
    }

    pub fn user(content: String) -> Self {
        Self { role: Role::User, content }
    }

    pub fn assistant(content: String) -> Self {
        Self { role: Role::Assistant, content }
    }
}

/// Completion backend. One blocking call per question; implementations own
/// their transport and credential handling.
pub trait ChatModel {
    fn complete(&self, messages: &[ChatMessage]) -> CoreResult<String>;
}

/// Assembles the message array for one question: system prompt with the
/// grounding block appended, the last ten history turns, then the question
/// itself.
pub fn assemble_messages(
    context: &str,
    history: &[ChatMessage],
    question: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len().min(HISTORY_WINDOW) + 2);
    messages.push(ChatMessage::system(format!(
        "{SYSTEM_PROMPT}\n\n## Your Transaction Data\n{context}"
    )));

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for message in &history[start..] {
        messages.push(message.clone());
    }

    messages.push(ChatMessage::user(question.to_string()));
    messages
}
