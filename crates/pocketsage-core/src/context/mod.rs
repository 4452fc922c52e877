mod accounts;
mod date_range;

pub use accounts::{resolve_account, AccountMatch};
pub use date_range::{extract_date_range, ExtractedRange};

use chrono::NaiveDate;
use tracing::debug;

use crate::classify::{Classifier, Intent};
use crate::store::{AggregationStore, DateRange, LedgerSummary};
use crate::CoreResult;

/// Fixed early-exit message for a store with no transactions at all.
pub const EMPTY_STORE_MESSAGE: &str =
    "No transactions have been uploaded yet. Please ask the user to import a CSV file first.";

const MERCHANT_LIMIT: i64 = 15;
const ACCOUNT_TRANSACTION_LIMIT: i64 = 10;

/// Builds the grounding text for one question. Every number in the output
/// comes straight from a store call; the only transformation applied is
/// fixed-point currency formatting. Empty aggregation results are omitted
/// rather than rendered as bare headers, except the subscription section
/// which states absence explicitly.
pub fn build_context(
    intent: Intent,
    question: &str,
    classifier: &Classifier,
    store: &dyn AggregationStore,
    today: NaiveDate,
) -> CoreResult<String> {
    let summary = store.summary()?;
    if summary.total_transactions == 0 {
        return Ok(EMPTY_STORE_MESSAGE.to_string());
    }

    let mut parts: Vec<String> = Vec::new();
    push_overview(&mut parts, &summary);

    let accounts = store.accounts()?;
    if !accounts.is_empty() {
        parts.push("\n=== LINKED ACCOUNTS ===".to_string());
        for account in &accounts {
            parts.push(format!(
                "{}: {} transactions, {} spent, {} received",
                account.display_label(),
                account.transaction_count,
                money(account.total_spending),
                money(account.total_income),
            ));
        }
    }

    match intent {
        Intent::SpendingByCategory => {
            push_category_breakdown(&mut parts, store, question)?;
        }
        Intent::MonthlyOverview => {
            push_monthly_totals(&mut parts, store, 12)?;
        }
        Intent::MerchantAnalysis => {
            let merchants = store.top_merchants(MERCHANT_LIMIT)?;
            if !merchants.is_empty() {
                parts.push("\n=== TOP MERCHANTS ===".to_string());
                for merchant in merchants {
                    parts.push(format!(
                        "{}: {} visits, {} total, avg {}",
                        merchant.name,
                        merchant.count,
                        money(merchant.total),
                        money(merchant.avg),
                    ));
                }
            }
        }
        Intent::SubscriptionCheck => {
            let charges = store.recurring_charges()?;
            if charges.is_empty() {
                parts.push("\nNo recurring transactions detected.".to_string());
            } else {
                parts.push("\n=== DETECTED SUBSCRIPTIONS/RECURRING ===".to_string());
                for charge in charges {
                    parts.push(format!(
                        "{}: {} × {} times ({} to {})",
                        charge.name,
                        money(charge.amount),
                        charge.frequency,
                        charge.first_date,
                        charge.last_date,
                    ));
                }
            }
        }
        Intent::SpendingTrend | Intent::Comparison => {
            push_monthly_totals(&mut parts, store, 6)?;
            push_categories_with_trends(&mut parts, store)?;
        }
        Intent::AccountSpending => {
            push_account_sections(&mut parts, store, classifier, question, today)?;
        }
        Intent::AccountBreakdown => {
            let range = extract_date_range(question, today);
            let bounds = to_date_range(&range);
            let by_account = store.spending_by_account(bounds)?;
            if !by_account.is_empty() {
                parts.push("\n=== SPENDING BY ACCOUNT ===".to_string());
                for account in by_account {
                    parts.push(format!(
                        "{}: {} spent, {} received ({} transactions)",
                        account.display_label(),
                        money(account.total_spending),
                        money(account.total_income),
                        account.transaction_count,
                    ));
                }
            }
        }
        Intent::Greeting => {}
        Intent::General => {
            let categories = store.spending_by_category(DateRange::default())?;
            if !categories.is_empty() {
                parts.push("\n=== TOP SPENDING CATEGORIES ===".to_string());
                for entry in categories.iter().take(5) {
                    parts.push(format!("{}: {}", entry.category, money(entry.total)));
                }
            }
            let monthly = store.monthly_totals(3)?;
            if !monthly.is_empty() {
                parts.push("\n=== RECENT MONTHS ===".to_string());
                for month in monthly {
                    parts.push(format!(
                        "{}: Expenses {} | Income {}",
                        month.month,
                        money(month.expenses),
                        money(month.income),
                    ));
                }
            }
        }
    }

    debug!(intent = intent.as_str(), sections = parts.len(), "context assembled");
    Ok(parts.join("\n"))
}

fn push_overview(parts: &mut Vec<String>, summary: &LedgerSummary) {
    let mut section = format!(
        "=== ACCOUNT OVERVIEW ===\nTotal Transactions: {}\nTotal Spending (debits): {}\nTotal Income (credits): {}",
        summary.total_transactions,
        money(summary.total_spending),
        money(summary.total_income),
    );
    if let Some(bounds) = &summary.date_range {
        section.push_str(&format!("\nDate Range: {} to {}", bounds.min, bounds.max));
    }
    parts.push(section);
}

fn push_monthly_totals(
    parts: &mut Vec<String>,
    store: &dyn AggregationStore,
    months: i64,
) -> CoreResult<()> {
    let monthly = store.monthly_totals(months)?;
    if monthly.is_empty() {
        return Ok(());
    }
    parts.push("\n=== MONTHLY TOTALS ===".to_string());
    for month in monthly {
        parts.push(format!(
            "{}: Income {} | Expenses {} | Net {}",
            month.month,
            money(month.income),
            money(month.expenses),
            money(month.net),
        ));
    }
    Ok(())
}

fn push_category_breakdown(
    parts: &mut Vec<String>,
    store: &dyn AggregationStore,
    question: &str,
) -> CoreResult<()> {
    let categories = store.spending_by_category(DateRange::default())?;
    if !categories.is_empty() {
        parts.push("\n=== SPENDING BY CATEGORY ===".to_string());
        for entry in &categories {
            parts.push(format!(
                "{}: {} ({} transactions)",
                entry.category,
                money(entry.total),
                entry.count,
            ));
        }
    }

    // When the question names a known category, append its 6-month trend.
    // Categories like FOOD_AND_DRINK match either spelling of the name.
    let q = question.to_lowercase();
    for category in store.categories()? {
        let lowered = category.to_lowercase();
        let spaced = lowered.replace('_', " ");
        if q.contains(&lowered) || q.contains(&spaced) {
            let trend = store.category_trend(&category, 6)?;
            if !trend.is_empty() {
                parts.push(format!("\n=== {category} MONTHLY TREND ==="));
                for point in trend {
                    parts.push(format!("{}: {}", point.month, money(point.total)));
                }
            }
        }
    }
    Ok(())
}

fn push_categories_with_trends(
    parts: &mut Vec<String>,
    store: &dyn AggregationStore,
) -> CoreResult<()> {
    let categories = store.spending_by_category(DateRange::default())?;
    if categories.is_empty() {
        return Ok(());
    }
    parts.push("\n=== SPENDING BY CATEGORY ===".to_string());
    for (index, entry) in categories.iter().enumerate() {
        parts.push(format!(
            "{}: {} ({} txns)",
            entry.category,
            money(entry.total),
            entry.count,
        ));

        if index < 5 {
            let trend = store.category_trend(&entry.category, 3)?;
            if trend.len() > 1 {
                let line = trend
                    .iter()
                    .map(|point| format!("{}: {}", point.month, money(point.total)))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                parts.push(format!("  Trend: {line}"));
            }
        }
    }
    Ok(())
}

fn push_account_sections(
    parts: &mut Vec<String>,
    store: &dyn AggregationStore,
    classifier: &Classifier,
    question: &str,
    today: NaiveDate,
) -> CoreResult<()> {
    let Some(reference) = classifier.extract_account_ref(question) else {
        return Ok(());
    };

    let accounts = store.accounts()?;
    let range = extract_date_range(question, today);
    let bounds = to_date_range(&range);

    match resolve_account(&reference.mask, &accounts) {
        AccountMatch::Resolved(account) => {
            parts.push(format!("\n=== ACCOUNT: {} ===", account.display_label()));
            if let Some(range) = &range {
                parts.push(format!("Period: {} to {} ({})", range.start, range.end, range.label));
            }

            let scoped = store.account_summary(
                &account.account_name,
                &account.account_mask,
                bounds,
            )?;
            parts.push(format!("Total Transactions: {}", scoped.total_transactions));
            parts.push(format!("Total Spending (debits): {}", money(scoped.total_spending)));
            parts.push(format!("Total Income (credits): {}", money(scoped.total_income)));

            let categories = store.account_spending_by_category(
                &account.account_name,
                &account.account_mask,
                bounds,
            )?;
            if !categories.is_empty() {
                parts.push("\n=== SPENDING BY CATEGORY ===".to_string());
                for entry in categories {
                    parts.push(format!(
                        "{}: {} ({} transactions)",
                        entry.category,
                        money(entry.total),
                        entry.count,
                    ));
                }
            }

            let monthly = store.account_monthly_totals(
                &account.account_name,
                &account.account_mask,
                12,
            )?;
            if !monthly.is_empty() {
                parts.push("\n=== MONTHLY TOTALS ===".to_string());
                for month in monthly {
                    parts.push(format!(
                        "{}: Income {} | Expenses {} | Net {}",
                        month.month,
                        money(month.income),
                        money(month.expenses),
                        money(month.net),
                    ));
                }
            }

            let recent = store.account_transactions(
                &account.account_name,
                &account.account_mask,
                bounds,
                ACCOUNT_TRANSACTION_LIMIT,
            )?;
            if !recent.is_empty() {
                parts.push("\n=== RECENT TRANSACTIONS ===".to_string());
                for txn in recent {
                    parts.push(format!(
                        "{} | {} | {} | {}",
                        txn.date,
                        txn.name,
                        money(txn.amount),
                        txn.category,
                    ));
                }
            }
        }
        AccountMatch::Ambiguous(candidates) => {
            parts.push("\n=== AMBIGUOUS ACCOUNT REFERENCE ===".to_string());
            parts.push(format!(
                "The reference \"{}\" matches multiple accounts:",
                reference.display_name
            ));
            for candidate in candidates {
                parts.push(format!("- {}", candidate.display_label()));
            }
        }
        AccountMatch::NotFound => {
            parts.push("\n=== ACCOUNT NOT FOUND ===".to_string());
            parts.push(format!(
                "No account matching \"{}\" was found.",
                reference.display_name
            ));
            if !accounts.is_empty() {
                parts.push("Available accounts:".to_string());
                for account in &accounts {
                    parts.push(format!("- {}", account.display_label()));
                }
            }
        }
    }
    Ok(())
}

fn to_date_range(range: &Option<ExtractedRange>) -> DateRange<'_> {
    match range {
        Some(range) => DateRange {
            start: Some(range.start.as_str()),
            end: Some(range.end.as_str()),
        },
        None => DateRange::default(),
    }
}

/// Currency with a leading `$` and exactly two decimal places.
fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${value:.2}")
    }
}
