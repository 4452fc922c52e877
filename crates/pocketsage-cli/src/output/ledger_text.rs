use pocketsage_core::commands::accounts::AccountsData;
use pocketsage_core::commands::summary::SummaryData;
use pocketsage_core::store::TransactionPage;

use super::format::{key_value_rows, money};

const IMPORT_HINT: [&str; 2] = [
    "  1. pocketsage import --dry-run <path>",
    "  2. pocketsage import <path>",
];

pub fn render_transactions(page: &TransactionPage) -> String {
    if page.transactions.is_empty() {
        let mut lines = vec!["No transactions matched.".to_string(), String::new()];
        lines.push("Import a statement first:".to_string());
        lines.extend(IMPORT_HINT.iter().map(|hint| hint.to_string()));
        return lines.join("\n");
    }

    let mut lines = vec![format!(
        "Showing {} of {} transactions:",
        page.transactions.len(),
        page.total
    )];
    lines.push(String::new());
    for txn in &page.transactions {
        let account = if txn.account_name.is_empty() && txn.account_mask.is_empty() {
            String::new()
        } else if txn.account_mask.is_empty() {
            format!("  [{}]", txn.account_name)
        } else {
            format!("  [{} ...{}]", txn.account_name, txn.account_mask)
        };
        lines.push(format!(
            "  {}  {:<10}  {}  {}{}",
            txn.date,
            money(txn.amount),
            txn.category,
            txn.name,
            account,
        ));
    }
    lines.join("\n")
}

pub fn render_accounts(data: &AccountsData) -> String {
    if data.accounts.is_empty() {
        let mut lines = vec!["No accounts found yet.".to_string(), String::new()];
        lines.push("Import a statement with account columns first:".to_string());
        lines.extend(IMPORT_HINT.iter().map(|hint| hint.to_string()));
        return lines.join("\n");
    }

    let mut lines = vec!["Linked accounts:".to_string(), String::new()];
    for account in &data.accounts {
        lines.push(format!("{}:", account.display_label()));
        lines.extend(key_value_rows(
            &[
                ("Transactions", account.transaction_count.to_string()),
                ("Spending", money(account.total_spending)),
                ("Income", money(account.total_income)),
            ],
            2,
        ));
        lines.push(String::new());
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

pub fn render_summary(data: &SummaryData) -> String {
    if data.summary.total_transactions == 0 {
        let mut lines = vec!["No transactions stored yet.".to_string(), String::new()];
        lines.push("Import a statement first:".to_string());
        lines.extend(IMPORT_HINT.iter().map(|hint| hint.to_string()));
        return lines.join("\n");
    }

    let date_range = data
        .summary
        .date_range
        .as_ref()
        .map(|bounds| format!("{} to {}", bounds.min, bounds.max))
        .unwrap_or_else(|| "-".to_string());

    let mut lines = vec!["Ledger summary:".to_string(), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Transactions", data.summary.total_transactions.to_string()),
            ("Spending", money(data.summary.total_spending)),
            ("Income", money(data.summary.total_income)),
            ("Date range", date_range),
        ],
        2,
    ));

    if !data.top_categories.is_empty() {
        lines.push(String::new());
        lines.push("Top categories:".to_string());
        for entry in &data.top_categories {
            lines.push(format!(
                "  {}: {} ({} transactions)",
                entry.category,
                money(entry.total),
                entry.count
            ));
        }
    }

    if !data.recent_months.is_empty() {
        lines.push(String::new());
        lines.push("Recent months:".to_string());
        for month in &data.recent_months {
            lines.push(format!(
                "  {}: Income {} | Expenses {} | Net {}",
                month.month,
                money(month.income),
                money(month.expenses),
                money(month.net)
            ));
        }
    }

    lines.join("\n")
}
