use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::commands::setup_for;
use crate::state::open_connection;
use crate::store::{AccountInfo, AggregationStore, SqliteStore};
use crate::CoreResult;

#[derive(Debug, Clone, Serialize)]
pub struct AccountsData {
    pub accounts: Vec<AccountInfo>,
}

pub fn run() -> CoreResult<AccountsData> {
    run_with_home_override(None)
}

#[doc(hidden)]
pub fn run_with_home_override(home_override: Option<&Path>) -> CoreResult<AccountsData> {
    let setup = setup_for(home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;
    let store = SqliteStore::new(&connection, &db_path);
    let accounts = store.accounts()?;
    Ok(AccountsData { accounts })
}
