use std::io;

use pocketsage_core::CoreError;
use serde::Serialize;
use serde_json::json;

use crate::dispatch::CommandOutput;

pub fn render_success_json(output: &CommandOutput) -> io::Result<String> {
    match output {
        CommandOutput::Import(data) => envelope(data),
        CommandOutput::Ask { data, .. } => envelope(data),
        CommandOutput::Context(data) => envelope(data),
        CommandOutput::Transactions(data) => envelope(data),
        CommandOutput::Accounts(data) => envelope(data),
        CommandOutput::Summary(data) => envelope(data),
    }
}

pub fn render_error_json(error: &CoreError) -> io::Result<String> {
    let payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    serialize_json_pretty(&payload)
}

fn envelope<T>(data: &T) -> io::Result<String>
where
    T: Serialize,
{
    let value = json!({
        "ok": true,
        "data": data,
    });
    serialize_json_pretty(&value)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
