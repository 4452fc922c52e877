use std::path::{Path, PathBuf};

use crate::commands::setup_for;
use crate::error::CoreError;
use crate::state::open_connection;
use crate::store::{SqliteStore, TransactionFilter, TransactionPage};
use crate::CoreResult;

const MAX_PAGE_SIZE: i64 = 500;

pub fn run(filter: TransactionFilter) -> CoreResult<TransactionPage> {
    run_with_home_override(filter, None)
}

#[doc(hidden)]
pub fn run_with_home_override(
    filter: TransactionFilter,
    home_override: Option<&Path>,
) -> CoreResult<TransactionPage> {
    validate_filter(&filter)?;

    let setup = setup_for(home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;
    let store = SqliteStore::new(&connection, &db_path);
    store.transactions(&filter)
}

fn validate_filter(filter: &TransactionFilter) -> CoreResult<()> {
    if let Some(limit) = filter.limit {
        if limit < 1 || limit > MAX_PAGE_SIZE {
            return Err(CoreError::invalid_argument_for_command(
                &format!("--limit must be between 1 and {MAX_PAGE_SIZE}."),
                Some("transactions"),
            ));
        }
    }
    if let Some(offset) = filter.offset {
        if offset < 0 {
            return Err(CoreError::invalid_argument_for_command(
                "--offset must be zero or greater.",
                Some("transactions"),
            ));
        }
    }
    if let (Some(start), Some(end)) = (&filter.start_date, &filter.end_date) {
        if start > end {
            return Err(CoreError::invalid_argument_for_command(
                "--from must not be later than --to.",
                Some("transactions"),
            ));
        }
    }
    Ok(())
}
