use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::commands::setup_for;
use crate::state::open_connection;
use crate::store::{
    AggregationStore, CategorySpending, DateRange, LedgerSummary, MonthlyTotal, SqliteStore,
};
use crate::CoreResult;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub summary: LedgerSummary,
    pub top_categories: Vec<CategorySpending>,
    pub recent_months: Vec<MonthlyTotal>,
}

pub fn run() -> CoreResult<SummaryData> {
    run_with_home_override(None)
}

#[doc(hidden)]
pub fn run_with_home_override(home_override: Option<&Path>) -> CoreResult<SummaryData> {
    let setup = setup_for(home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;
    let store = SqliteStore::new(&connection, &db_path);

    let summary = store.summary()?;
    let mut top_categories = store.spending_by_category(DateRange::default())?;
    top_categories.truncate(5);
    let recent_months = store.monthly_totals(3)?;

    Ok(SummaryData {
        summary,
        top_categories,
        recent_months,
    })
}
