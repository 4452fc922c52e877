use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::state::map_sqlite_error;
use crate::store::types::{
    AccountInfo, CategorySpending, DateBounds, DateRange, LedgerSummary, MerchantVisits,
    MonthlyTotal, RecurringCharge, TransactionFilter, TransactionPage, TransactionRecord,
    TrendPoint,
};
use crate::store::AggregationStore;
use crate::CoreResult;

/// SQLite-backed implementation of the aggregation surface. Holds a borrowed
/// connection; every call runs to completion against the current contents and
/// keeps no state between calls.
pub struct SqliteStore<'a> {
    connection: &'a Connection,
    db_path: PathBuf,
}

impl<'a> SqliteStore<'a> {
    pub fn new(connection: &'a Connection, db_path: &Path) -> Self {
        Self {
            connection,
            db_path: db_path.to_path_buf(),
        }
    }

    pub fn transactions(&self, filter: &TransactionFilter) -> CoreResult<TransactionPage> {
        let limit = filter.limit.unwrap_or(100);
        let offset = filter.offset.unwrap_or(0);
        let search = filter.search.as_ref().map(|value| format!("%{value}%"));

        let total = self
            .connection
            .query_row(
                "SELECT COUNT(*)
                 FROM transactions
                 WHERE (?1 IS NULL OR category = ?1)
                   AND (?2 IS NULL OR date >= ?2)
                   AND (?3 IS NULL OR date <= ?3)
                   AND (?4 IS NULL OR name LIKE ?4)",
                params![filter.category, filter.start_date, filter.end_date, search],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut statement = self
            .connection
            .prepare(
                "SELECT id, date, name, amount, category, subcategory, account_name, account_mask
                 FROM transactions
                 WHERE (?1 IS NULL OR category = ?1)
                   AND (?2 IS NULL OR date >= ?2)
                   AND (?3 IS NULL OR date <= ?3)
                   AND (?4 IS NULL OR name LIKE ?4)
                 ORDER BY date DESC, name ASC
                 LIMIT ?5 OFFSET ?6",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(
                params![
                    filter.category,
                    filter.start_date,
                    filter.end_date,
                    search,
                    limit,
                    offset
                ],
                read_transaction_row,
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut transactions = Vec::new();
        for row in rows_iter {
            transactions.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }

        Ok(TransactionPage {
            transactions,
            total,
        })
    }
}

fn read_transaction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TransactionRecord> {
    Ok(TransactionRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        name: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        subcategory: row.get(5)?,
        account_name: row.get(6)?,
        account_mask: row.get(7)?,
    })
}

fn read_summary_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LedgerSummary> {
    let total_transactions: i64 = row.get(0)?;
    let total_spending: Option<f64> = row.get(1)?;
    let total_income: Option<f64> = row.get(2)?;
    let min_date: Option<String> = row.get(3)?;
    let max_date: Option<String> = row.get(4)?;

    Ok(LedgerSummary {
        total_transactions,
        total_spending: total_spending.unwrap_or(0.0),
        total_income: total_income.unwrap_or(0.0),
        date_range: match (min_date, max_date) {
            (Some(min), Some(max)) => Some(DateBounds { min, max }),
            _ => None,
        },
    })
}

fn read_account_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountInfo> {
    Ok(AccountInfo {
        account_name: row.get(0)?,
        account_mask: row.get(1)?,
        transaction_count: row.get(2)?,
        total_spending: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
        total_income: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
    })
}

impl AggregationStore for SqliteStore<'_> {
    fn summary(&self) -> CoreResult<LedgerSummary> {
        self.connection
            .query_row(
                "SELECT
                    COUNT(*),
                    SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE 0 END),
                    MIN(date),
                    MAX(date)
                 FROM transactions",
                [],
                read_summary_row,
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))
    }

    fn spending_by_category(&self, range: DateRange<'_>) -> CoreResult<Vec<CategorySpending>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT category, SUM(amount), COUNT(*)
                 FROM transactions
                 WHERE amount > 0
                   AND (?1 IS NULL OR date >= ?1)
                   AND (?2 IS NULL OR date <= ?2)
                 GROUP BY category
                 ORDER BY SUM(amount) DESC",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(params![range.start, range.end], |row| {
                Ok(CategorySpending {
                    category: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn monthly_totals(&self, months: i64) -> CoreResult<Vec<MonthlyTotal>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    strftime('%Y-%m', date) AS month,
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE 0 END),
                    SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE -amount END)
                 FROM transactions
                 GROUP BY strftime('%Y-%m', date)
                 ORDER BY month DESC
                 LIMIT ?1",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(params![months], |row| {
                Ok(MonthlyTotal {
                    month: row.get(0)?,
                    income: row.get(1)?,
                    expenses: row.get(2)?,
                    net: row.get(3)?,
                })
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn top_merchants(&self, limit: i64) -> CoreResult<Vec<MerchantVisits>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT name, COUNT(*), SUM(amount), AVG(amount)
                 FROM transactions
                 WHERE amount > 0
                 GROUP BY name
                 ORDER BY COUNT(*) DESC
                 LIMIT ?1",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(params![limit], |row| {
                Ok(MerchantVisits {
                    name: row.get(0)?,
                    count: row.get(1)?,
                    total: row.get(2)?,
                    avg: row.get(3)?,
                })
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn recurring_charges(&self) -> CoreResult<Vec<RecurringCharge>> {
        // 10% relative spread on same-named debit groups. Coincidental
        // same-amount one-off purchases can slip through; that imprecision is
        // accepted and surfaced to the model as-is.
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    name,
                    ROUND(AVG(amount), 2),
                    COUNT(*),
                    MIN(date),
                    MAX(date)
                 FROM transactions
                 WHERE amount > 0
                 GROUP BY name
                 HAVING COUNT(*) >= 2
                    AND (MAX(amount) - MIN(amount)) / AVG(amount) < 0.1
                 ORDER BY COUNT(*) DESC, AVG(amount) DESC",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map([], |row| {
                Ok(RecurringCharge {
                    name: row.get(0)?,
                    amount: row.get(1)?,
                    frequency: row.get(2)?,
                    first_date: row.get(3)?,
                    last_date: row.get(4)?,
                })
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn category_trend(&self, category: &str, months: i64) -> CoreResult<Vec<TrendPoint>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT strftime('%Y-%m', date) AS month, SUM(amount)
                 FROM transactions
                 WHERE category = ?1 AND amount > 0
                 GROUP BY strftime('%Y-%m', date)
                 ORDER BY month DESC
                 LIMIT ?2",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(params![category, months], |row| {
                Ok(TrendPoint {
                    month: row.get(0)?,
                    total: row.get(1)?,
                })
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn categories(&self) -> CoreResult<Vec<String>> {
        let mut statement = self
            .connection
            .prepare("SELECT DISTINCT category FROM transactions ORDER BY category")
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn accounts(&self) -> CoreResult<Vec<AccountInfo>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    account_name,
                    account_mask,
                    COUNT(*),
                    SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE 0 END)
                 FROM transactions
                 WHERE account_name != '' OR account_mask != ''
                 GROUP BY account_name, account_mask
                 ORDER BY COUNT(*) DESC",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map([], read_account_row)
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn spending_by_account(&self, range: DateRange<'_>) -> CoreResult<Vec<AccountInfo>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    account_name,
                    account_mask,
                    COUNT(*),
                    SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE 0 END)
                 FROM transactions
                 WHERE (?1 IS NULL OR date >= ?1)
                   AND (?2 IS NULL OR date <= ?2)
                 GROUP BY account_name, account_mask
                 ORDER BY SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END) DESC",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(params![range.start, range.end], read_account_row)
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn account_summary(
        &self,
        account_name: &str,
        account_mask: &str,
        range: DateRange<'_>,
    ) -> CoreResult<LedgerSummary> {
        // Empty name or mask means that half of the pair carries no
        // constraint, matching how derived accounts are grouped.
        self.connection
            .query_row(
                "SELECT
                    COUNT(*),
                    SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE 0 END),
                    MIN(date),
                    MAX(date)
                 FROM transactions
                 WHERE (?1 = '' OR account_name = ?1)
                   AND (?2 = '' OR account_mask = ?2)
                   AND (?3 IS NULL OR date >= ?3)
                   AND (?4 IS NULL OR date <= ?4)",
                params![account_name, account_mask, range.start, range.end],
                read_summary_row,
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))
    }

    fn account_spending_by_category(
        &self,
        account_name: &str,
        account_mask: &str,
        range: DateRange<'_>,
    ) -> CoreResult<Vec<CategorySpending>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT category, SUM(amount), COUNT(*)
                 FROM transactions
                 WHERE amount > 0
                   AND (?1 = '' OR account_name = ?1)
                   AND (?2 = '' OR account_mask = ?2)
                   AND (?3 IS NULL OR date >= ?3)
                   AND (?4 IS NULL OR date <= ?4)
                 GROUP BY category
                 ORDER BY SUM(amount) DESC",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(
                params![account_name, account_mask, range.start, range.end],
                |row| {
                    Ok(CategorySpending {
                        category: row.get(0)?,
                        total: row.get(1)?,
                        count: row.get(2)?,
                    })
                },
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn account_monthly_totals(
        &self,
        account_name: &str,
        account_mask: &str,
        months: i64,
    ) -> CoreResult<Vec<MonthlyTotal>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    strftime('%Y-%m', date) AS month,
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE 0 END),
                    SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
                    SUM(CASE WHEN amount < 0 THEN ABS(amount) ELSE -amount END)
                 FROM transactions
                 WHERE (?1 = '' OR account_name = ?1)
                   AND (?2 = '' OR account_mask = ?2)
                 GROUP BY strftime('%Y-%m', date)
                 ORDER BY month DESC
                 LIMIT ?3",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(params![account_name, account_mask, months], |row| {
                Ok(MonthlyTotal {
                    month: row.get(0)?,
                    income: row.get(1)?,
                    expenses: row.get(2)?,
                    net: row.get(3)?,
                })
            })
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }

    fn account_transactions(
        &self,
        account_name: &str,
        account_mask: &str,
        range: DateRange<'_>,
        limit: i64,
    ) -> CoreResult<Vec<TransactionRecord>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT id, date, name, amount, category, subcategory, account_name, account_mask
                 FROM transactions
                 WHERE (?1 = '' OR account_name = ?1)
                   AND (?2 = '' OR account_mask = ?2)
                   AND (?3 IS NULL OR date >= ?3)
                   AND (?4 IS NULL OR date <= ?4)
                 ORDER BY date DESC, name ASC
                 LIMIT ?5",
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let rows_iter = statement
            .query_map(
                params![account_name, account_mask, range.start, range.end, limit],
                read_transaction_row,
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let mut rows = Vec::new();
        for row in rows_iter {
            rows.push(row.map_err(|error| map_sqlite_error(&self.db_path, &error))?);
        }
        Ok(rows)
    }
}
