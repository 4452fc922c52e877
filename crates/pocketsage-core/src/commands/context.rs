use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify::{AliasTable, Classifier, Intent};
use crate::commands::setup_for;
use crate::context::build_context;
use crate::error::CoreError;
use crate::state::{aliases_path, open_connection};
use crate::store::SqliteStore;
use crate::CoreResult;

#[derive(Debug, Clone, Serialize)]
pub struct ContextData {
    pub question: String,
    pub intent: Intent,
    pub context: String,
}

pub fn run(question: &str) -> CoreResult<ContextData> {
    run_with_home_override(question, None)
}

#[doc(hidden)]
pub fn run_with_home_override(question: &str, home_override: Option<&Path>) -> CoreResult<ContextData> {
    if question.trim().is_empty() {
        return Err(CoreError::invalid_argument_for_command(
            "Question must not be empty.",
            Some("context"),
        ));
    }

    let setup = setup_for(home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;
    let store = SqliteStore::new(&connection, &db_path);

    let aliases = AliasTable::load_or_default(&aliases_path(Path::new(&setup.home)));
    let classifier = Classifier::new(aliases);
    let intent = classifier.classify(question);
    let today = chrono::Local::now().date_naive();
    let context = build_context(intent, question, &classifier, &store, today)?;

    Ok(ContextData {
        question: question.to_string(),
        intent,
        context,
    })
}
