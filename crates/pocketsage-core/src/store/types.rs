use serde::Serialize;

/// One stored bank transaction. Positive amounts are debits (spending),
/// negative amounts are credits (income). Rows are immutable once written;
/// re-importing the same row replaces it under the same id.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: String,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub account_name: String,
    pub account_mask: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateBounds {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub total_transactions: i64,
    pub total_spending: f64,
    pub total_income: f64,
    pub date_range: Option<DateBounds>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantVisits {
    pub name: String,
    pub count: i64,
    pub total: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringCharge {
    pub name: String,
    pub amount: f64,
    pub frequency: i64,
    pub first_date: String,
    pub last_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub total: f64,
}

/// A derived account: one distinct (account_name, account_mask) pair seen in
/// the transactions table, with computed aggregates. Never stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountInfo {
    pub account_name: String,
    pub account_mask: String,
    pub transaction_count: i64,
    pub total_spending: f64,
    pub total_income: f64,
}

impl AccountInfo {
    /// Human label used in context sections and prompt text, e.g.
    /// "Main Checking (ending in 3903)".
    pub fn display_label(&self) -> String {
        match (self.account_name.is_empty(), self.account_mask.is_empty()) {
            (false, false) => format!("{} (ending in {})", self.account_name, self.account_mask),
            (false, true) => self.account_name.clone(),
            (true, false) => format!("Account ending in {}", self.account_mask),
            (true, true) => "Unnamed account".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<TransactionRecord>,
    pub total: i64,
}
