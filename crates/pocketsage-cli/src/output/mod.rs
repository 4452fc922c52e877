mod chat_text;
mod error_text;
mod format;
mod import_text;
mod json;
mod ledger_text;
mod mode;

use std::io;

use pocketsage_core::CoreError;

pub use mode::{mode_for_command, OutputMode};

use crate::dispatch::CommandOutput;
use crate::stdout_io::write_stdout_text;

pub fn print_success(output: &CommandOutput, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(output),
        OutputMode::Json => json::render_success_json(output)?,
    };
    write_stdout_text(&format!("{body}\n"))
}

pub fn print_failure(error: &CoreError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_text(&format!("{body}\n"))
}

fn render_text_success(output: &CommandOutput) -> String {
    match output {
        CommandOutput::Import(data) => import_text::render_import(data),
        CommandOutput::Ask { data, show_context } => chat_text::render_ask(data, *show_context),
        CommandOutput::Context(data) => chat_text::render_context(data),
        CommandOutput::Transactions(data) => ledger_text::render_transactions(data),
        CommandOutput::Accounts(data) => ledger_text::render_accounts(data),
        CommandOutput::Summary(data) => ledger_text::render_summary(data),
    }
}
