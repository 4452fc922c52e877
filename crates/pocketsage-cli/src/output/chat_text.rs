use pocketsage_core::commands::ask::AskData;
use pocketsage_core::commands::context::ContextData;

pub fn render_ask(data: &AskData, show_context: bool) -> String {
    if !show_context {
        return data.response.clone();
    }
    [
        "--- Grounding context ---".to_string(),
        data.context.clone(),
        "--- Response ---".to_string(),
        data.response.clone(),
    ]
    .join("\n")
}

pub fn render_context(data: &ContextData) -> String {
    let mut lines = vec![
        format!("Question: {}", data.question),
        format!("Intent:   {}", data.intent.as_str()),
        String::new(),
    ];
    lines.push(data.context.clone());
    lines.join("\n")
}
