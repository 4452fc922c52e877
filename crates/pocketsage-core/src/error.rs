use std::path::Path;

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CoreError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl CoreError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `pocketsage {cmd} --help` for usage."),
            None => "Run `pocketsage --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn import_invalid(message: &str, issues: Vec<Value>) -> Self {
        Self::new(
            "import_invalid",
            message,
            vec![
                "Fix the listed issues in your CSV file.".to_string(),
                "Rerun `pocketsage import --dry-run <path>` until it passes.".to_string(),
                "Then rerun `pocketsage import <path>`.".to_string(),
            ],
        )
        .with_data(json!({ "issues": issues }))
    }

    pub fn import_read_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "import_invalid",
            &format!("Cannot read import file `{path}`: {detail}"),
            vec![
                "Check that the path exists and is readable.".to_string(),
                "Use `-` as the path to read from stdin.".to_string(),
            ],
        )
    }

    pub fn model_key_missing() -> Self {
        Self::new(
            "model_key_missing",
            "GEMINI_API_KEY environment variable is not set.",
            vec![
                "Export GEMINI_API_KEY with a valid Gemini API key.".to_string(),
                "Use `pocketsage context <question>` to inspect grounding data without a model call."
                    .to_string(),
            ],
        )
    }

    pub fn model_request_failed(detail: &str) -> Self {
        Self::new(
            "model_request_failed",
            &format!("Chat model request failed: {detail}"),
            vec![
                "Check network connectivity and GEMINI_API_KEY validity.".to_string(),
                "Retry the question; transient provider errors are common.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot initialize transaction store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `POCKETSAGE_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Transaction database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Transaction database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite database or delete it and re-import."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Store migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Store initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
