pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::{
    AccountInfo, CategorySpending, DateBounds, DateRange, LedgerSummary, MerchantVisits,
    MonthlyTotal, RecurringCharge, TransactionFilter, TransactionPage, TransactionRecord,
    TrendPoint,
};

use crate::CoreResult;

/// Read-only aggregation surface the context builder consumes. The builder
/// never states a number that did not come out of one of these calls.
pub trait AggregationStore {
    fn summary(&self) -> CoreResult<LedgerSummary>;

    /// Debit totals per category, largest first, optionally date-bounded.
    fn spending_by_category(&self, range: DateRange<'_>) -> CoreResult<Vec<CategorySpending>>;

    /// Per-month income/expense/net totals, most recent month first.
    fn monthly_totals(&self, months: i64) -> CoreResult<Vec<MonthlyTotal>>;

    /// Top merchants by visit count among debits.
    fn top_merchants(&self, limit: i64) -> CoreResult<Vec<MerchantVisits>>;

    /// Recurring-charge candidates: same-named debit groups with >= 2
    /// occurrences and a relative amount spread under 10%.
    fn recurring_charges(&self) -> CoreResult<Vec<RecurringCharge>>;

    /// Monthly debit totals for one category, most recent month first.
    fn category_trend(&self, category: &str, months: i64) -> CoreResult<Vec<TrendPoint>>;

    fn categories(&self) -> CoreResult<Vec<String>>;

    /// Distinct (account_name, account_mask) pairs with aggregates, most
    /// active first.
    fn accounts(&self) -> CoreResult<Vec<AccountInfo>>;

    /// Per-account totals, optionally date-bounded, biggest spender first.
    fn spending_by_account(&self, range: DateRange<'_>) -> CoreResult<Vec<AccountInfo>>;

    fn account_summary(
        &self,
        account_name: &str,
        account_mask: &str,
        range: DateRange<'_>,
    ) -> CoreResult<LedgerSummary>;

    fn account_spending_by_category(
        &self,
        account_name: &str,
        account_mask: &str,
        range: DateRange<'_>,
    ) -> CoreResult<Vec<CategorySpending>>;

    fn account_monthly_totals(
        &self,
        account_name: &str,
        account_mask: &str,
        months: i64,
    ) -> CoreResult<Vec<MonthlyTotal>>;

    fn account_transactions(
        &self,
        account_name: &str,
        account_mask: &str,
        range: DateRange<'_>,
        limit: i64,
    ) -> CoreResult<Vec<TransactionRecord>>;
}
