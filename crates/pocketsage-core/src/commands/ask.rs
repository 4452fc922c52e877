use std::path::Path;

use serde::Serialize;

use crate::chat::{assemble_messages, ChatModel, GeminiModel};
use crate::classify::Intent;
use crate::commands::context;
use crate::CoreResult;

#[derive(Debug, Clone, Serialize)]
pub struct AskData {
    pub question: String,
    pub intent: Intent,
    pub context: String,
    pub response: String,
}

pub fn run(question: &str) -> CoreResult<AskData> {
    run_with_home_override(question, None)
}

#[doc(hidden)]
pub fn run_with_home_override(question: &str, home_override: Option<&Path>) -> CoreResult<AskData> {
    let model = GeminiModel::new()?;
    run_with_model(question, home_override, &model)
}

/// Shared path for the real Gemini backend and test doubles.
pub fn run_with_model(
    question: &str,
    home_override: Option<&Path>,
    model: &dyn ChatModel,
) -> CoreResult<AskData> {
    let grounding = context::run_with_home_override(question, home_override)?;
    let messages = assemble_messages(&grounding.context, &[], question);
    let response = model.complete(&messages)?;

    Ok(AskData {
        question: grounding.question,
        intent: grounding.intent,
        context: grounding.context,
        response,
    })
}
