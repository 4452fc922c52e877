pub mod parse;
pub mod persist;

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::error::CoreError;
use crate::setup::SetupContext;
use crate::state::open_connection;
use crate::CoreResult;

/// Result of one import run. `inserted` is zero for dry runs even when every
/// row validated.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub dry_run: bool,
    pub rows_parsed: i64,
    pub inserted: i64,
    pub skipped: i64,
    pub issues: Vec<String>,
}

/// Imports a CSV file (or stdin when the path is `-`) into the store.
/// Rows with recoverable problems are skipped and reported; a file yielding
/// zero valid transactions is rejected outright.
pub fn execute(setup: &SetupContext, path: &str, dry_run: bool) -> CoreResult<ImportOutcome> {
    let content = read_source(path)?;
    let outcome = parse::parse_csv(&content);

    if outcome.transactions.is_empty() {
        let issues = outcome
            .issues
            .iter()
            .map(|issue| json!(issue))
            .collect::<Vec<_>>();
        return Err(CoreError::import_invalid(
            "No valid transactions found in the import file.",
            issues,
        ));
    }

    let rows_parsed = outcome.transactions.len() as i64;

    if dry_run {
        info!(rows = rows_parsed, skipped = outcome.skipped, "dry run validated");
        return Ok(ImportOutcome {
            dry_run: true,
            rows_parsed,
            inserted: 0,
            skipped: outcome.skipped,
            issues: outcome.issues,
        });
    }

    let db_path = PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;
    let inserted = persist::persist_transactions(&mut connection, &db_path, outcome.transactions)?;

    info!(inserted, skipped = outcome.skipped, "import committed");

    Ok(ImportOutcome {
        dry_run: false,
        rows_parsed,
        inserted,
        skipped: outcome.skipped,
        issues: outcome.issues,
    })
}

fn read_source(path: &str) -> CoreResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|error| CoreError::import_read_failed("-", &error.to_string()))?;
        if buffer.trim().is_empty() {
            return Err(CoreError::import_read_failed(
                "-",
                "stdin was empty; pipe CSV content or pass a file path",
            ));
        }
        return Ok(buffer);
    }

    fs::read_to_string(path).map_err(|error| CoreError::import_read_failed(path, &error.to_string()))
}
