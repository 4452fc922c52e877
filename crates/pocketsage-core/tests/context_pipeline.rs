mod support;

use pocketsage_core::classify::Intent;
use pocketsage_core::setup::ensure_initialized_at;
use pocketsage_core::state::open_connection;
use pocketsage_core::store::{AggregationStore, SqliteStore};
use support::testkit::{context_for, db_path, import_csv, temp_home};

const LEDGER: &str = "\
date,name,amount,category,account,account_mask
2026-06-01,Netflix,15.00,ENTERTAINMENT,Main Checking,3903
2026-07-01,Netflix,15.00,ENTERTAINMENT,Main Checking,3903
2026-08-01,Netflix,15.49,ENTERTAINMENT,Main Checking,3903
2026-07-10,Whole Foods,82.40,GROCERIES,Main Checking,3903
2026-07-15,Hardware Store,40.00,SHOPPING,Business,7561
2026-08-03,Paycheck,-2500.00,INCOME,Main Checking,3903
";

#[test]
fn empty_store_returns_only_the_import_instruction() {
    let (_dir, home) = temp_home("pocketsage-context");
    assert!(ensure_initialized_at(&home).is_ok());

    let data = context_for(&home, "how much did I spend?");
    assert_eq!(
        data.context,
        "No transactions have been uploaded yet. Please ask the user to import a CSV file first."
    );
}

#[test]
fn overview_and_linked_accounts_always_lead_the_context() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "hi");
    assert_eq!(data.intent, Intent::Greeting);
    assert!(data.context.starts_with("=== ACCOUNT OVERVIEW ==="));
    assert!(data.context.contains("Total Transactions: 6"));
    assert!(data.context.contains("=== LINKED ACCOUNTS ==="));
    assert!(data.context.contains("Main Checking (ending in 3903)"));
    assert!(data.context.contains("Business (ending in 7561)"));
    // Greetings add no aggregation sections.
    assert!(!data.context.contains("=== SPENDING BY CATEGORY ==="));
}

#[test]
fn subscription_question_detects_the_recurring_charge() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "What subscriptions do I have?");
    assert_eq!(data.intent, Intent::SubscriptionCheck);
    assert!(data.context.contains("=== DETECTED SUBSCRIPTIONS/RECURRING ==="));
    assert!(data.context.contains("Netflix"));
    assert!(data.context.contains("× 3 times"));
    assert!(data.context.contains("2026-06-01 to 2026-08-01"));
}

#[test]
fn subscription_question_states_absence_when_nothing_recurs() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(
        &home,
        "date,name,amount\n2026-08-01,One Off,99.00\n2026-08-02,Another,12.00\n",
    );

    let data = context_for(&home, "any recurring charges?");
    assert_eq!(data.intent, Intent::SubscriptionCheck);
    assert!(data.context.contains("No recurring transactions detected."));
    assert!(!data.context.contains("=== DETECTED SUBSCRIPTIONS/RECURRING ==="));
}

#[test]
fn recurring_detector_honors_the_ten_percent_spread() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(
        &home,
        "date,name,amount\n\
         2026-06-01,Gym,10.00\n\
         2026-07-01,Gym,10.50\n\
         2026-08-01,Gym,10.20\n\
         2026-06-15,Utility,10.00\n\
         2026-07-15,Utility,50.00\n",
    );

    let connection = open_connection(&db_path(&home));
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        let store = SqliteStore::new(&conn, &db_path(&home));
        let charges = store.recurring_charges();
        assert!(charges.is_ok());
        if let Ok(charges) = charges {
            // (10.50 - 10.00) / 10.2333 is under 0.10; Utility's spread is not.
            assert_eq!(charges.len(), 1);
            assert_eq!(charges[0].name, "Gym");
            assert_eq!(charges[0].frequency, 3);
        }
    }
}

#[test]
fn category_question_lists_spending_by_category() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "how much did I spend on groceries?");
    assert_eq!(data.intent, Intent::SpendingByCategory);
    assert!(data.context.contains("=== SPENDING BY CATEGORY ==="));
    assert!(data.context.contains("GROCERIES: $82.40 (1 transactions)"));
    // The question names a known category, so its trend section appears.
    assert!(data.context.contains("=== GROCERIES MONTHLY TREND ==="));
}

#[test]
fn monthly_question_renders_income_expense_net_lines() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "show me my monthly totals");
    assert_eq!(data.intent, Intent::MonthlyOverview);
    assert!(data.context.contains("=== MONTHLY TOTALS ==="));
    assert!(data.context.contains("2026-08: Income $2500.00"));
}

#[test]
fn merchant_question_ranks_by_visit_count() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "which merchants do I visit most?");
    assert_eq!(data.intent, Intent::MerchantAnalysis);
    assert!(data.context.contains("=== TOP MERCHANTS ==="));
    assert!(data.context.contains("Netflix: 3 visits"));
}

#[test]
fn account_question_scopes_to_the_resolved_account() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "how much did I spend from my business account?");
    assert_eq!(data.intent, Intent::AccountSpending);
    assert!(data.context.contains("=== ACCOUNT: Business (ending in 7561) ==="));
    assert!(data.context.contains("=== RECENT TRANSACTIONS ==="));
    assert!(data.context.contains("Hardware Store"));
    assert!(!data.context.contains("Whole Foods | "));
}

#[test]
fn unknown_account_lists_the_available_ones() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "what went out of account 9999?");
    assert_eq!(data.intent, Intent::AccountSpending);
    assert!(data.context.contains("=== ACCOUNT NOT FOUND ==="));
    assert!(data.context.contains("Available accounts:"));
    assert!(data.context.contains("- Main Checking (ending in 3903)"));
}

#[test]
fn shared_mask_produces_an_ambiguous_section() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(
        &home,
        "date,name,amount,account,account_mask\n\
         2026-08-01,Coffee,4.50,Card A,1111\n\
         2026-08-02,Lunch,12.00,Card B,1111\n",
    );

    let data = context_for(&home, "spending on account 1111");
    assert_eq!(data.intent, Intent::AccountSpending);
    assert!(data.context.contains("=== AMBIGUOUS ACCOUNT REFERENCE ==="));
    assert!(data.context.contains("- Card A (ending in 1111)"));
    assert!(data.context.contains("- Card B (ending in 1111)"));
}

#[test]
fn breakdown_question_totals_each_account() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "show me a breakdown by account");
    assert_eq!(data.intent, Intent::AccountBreakdown);
    assert!(data.context.contains("=== SPENDING BY ACCOUNT ==="));
    assert!(data.context.contains("Business (ending in 7561): $40.00 spent"));
}

#[test]
fn general_questions_get_the_light_catch_all_sections() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let data = context_for(&home, "tell me something about my finances");
    assert_eq!(data.intent, Intent::General);
    assert!(data.context.contains("=== TOP SPENDING CATEGORIES ==="));
    assert!(data.context.contains("=== RECENT MONTHS ==="));
}

#[test]
fn every_number_in_the_context_comes_from_the_store() {
    let (_dir, home) = temp_home("pocketsage-context");
    import_csv(&home, LEDGER);

    let connection = open_connection(&db_path(&home));
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        let store = SqliteStore::new(&conn, &db_path(&home));
        let summary = store.summary();
        assert!(summary.is_ok());
        if let Ok(summary) = summary {
            let data = context_for(&home, "hi");
            assert!(data
                .context
                .contains(&format!("Total Transactions: {}", summary.total_transactions)));
            assert!(data
                .context
                .contains(&format!("Total Spending (debits): ${:.2}", summary.total_spending)));
            assert!(data
                .context
                .contains(&format!("Total Income (credits): ${:.2}", summary.total_income)));
        }
    }
}
