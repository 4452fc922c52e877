use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::migrations::{run_pending, REQUIRED_INDEX_NAMES, TRANSACTIONS_COLUMNS};
use crate::state::{
    ensure_home_directory, map_sqlite_error, open_connection, resolve_home, store_db_path,
};
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub home: String,
    pub db_path: String,
}

pub fn ensure_initialized() -> CoreResult<SetupContext> {
    ensure_initialized_with_home_override(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> CoreResult<SetupContext> {
    ensure_initialized_with_home_override(Some(home_override))
}

fn ensure_initialized_with_home_override(home_override: Option<&Path>) -> CoreResult<SetupContext> {
    let home = resolve_home(home_override)?;
    ensure_home_directory(&home)?;

    let db_path = store_db_path(&home);
    let mut connection = open_connection(&db_path)?;

    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;
    verify_transactions_table(&connection, &db_path)?;

    Ok(SetupContext {
        home: home.display().to_string(),
        db_path: db_path.display().to_string(),
    })
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> CoreError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if mapped.code == "store_locked"
                || mapped.code == "store_corrupt"
                || mapped.code == "store_init_permission_denied"
            {
                mapped
            } else {
                CoreError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => CoreError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_transactions_table(connection: &Connection, db_path: &Path) -> CoreResult<()> {
    let table_exists = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'transactions' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);
    if !table_exists {
        return Err(CoreError::store_corrupt(db_path));
    }

    let mut statement = connection
        .prepare("PRAGMA table_info(transactions)")
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut columns: Vec<String> = Vec::new();
    for row in column_iter {
        columns.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    for required_column in TRANSACTIONS_COLUMNS {
        if !columns.iter().any(|column| column == required_column) {
            return Err(CoreError::store_corrupt(db_path));
        }
    }

    for index_name in REQUIRED_INDEX_NAMES {
        let exists = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1 LIMIT 1",
                [index_name],
                |_row| Ok(true),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?
            .unwrap_or(false);
        if !exists {
            return Err(CoreError::store_corrupt(db_path));
        }
    }

    Ok(())
}
