mod support;

use pocketsage_core::commands::{import, transactions};
use pocketsage_core::store::TransactionFilter;
use rusqlite::Connection;
use support::testkit::{db_path, import_csv, temp_home, write_fixture};

const STATEMENT: &str = "\
date,name,amount,category,account,account_mask
2026-07-01,Netflix,15.00,ENTERTAINMENT,Main Checking,3903
2026-07-05,Whole Foods,82.40,GROCERIES,Main Checking,3903
2026-08-01,Netflix,15.49,ENTERTAINMENT,Main Checking,3903
2026-08-03,Paycheck,-2500.00,INCOME,Main Checking,3903
";

fn row_count(home: &std::path::Path) -> i64 {
    let connection = Connection::open(db_path(home));
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0));
        assert!(count.is_ok());
        if let Ok(value) = count {
            return value;
        }
    }
    0
}

#[test]
fn import_commits_all_valid_rows() {
    let (_dir, home) = temp_home("pocketsage-import");

    let outcome = import_csv(&home, STATEMENT);
    assert!(!outcome.dry_run);
    assert_eq!(outcome.inserted, 4);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(row_count(&home), 4);
}

#[test]
fn reimporting_the_same_file_does_not_duplicate_rows() {
    let (_dir, home) = temp_home("pocketsage-import");

    import_csv(&home, STATEMENT);
    import_csv(&home, STATEMENT);
    assert_eq!(row_count(&home), 4);
}

#[test]
fn dry_run_validates_without_writing() {
    let (_dir, home) = temp_home("pocketsage-import");
    let (fixture_dir, _home2) = temp_home("pocketsage-fixture");
    let path = write_fixture(fixture_dir.path(), "rows.csv", STATEMENT);

    let outcome =
        import::run_with_home_override(&path.display().to_string(), true, Some(&home));
    assert!(outcome.is_ok());
    if let Ok(result) = outcome {
        assert!(result.dry_run);
        assert_eq!(result.rows_parsed, 4);
        assert_eq!(result.inserted, 0);
    }
    assert_eq!(row_count(&home), 0);
}

#[test]
fn files_with_no_valid_rows_are_rejected() {
    let (_dir, home) = temp_home("pocketsage-import");
    let (fixture_dir, _home2) = temp_home("pocketsage-fixture");
    let path = write_fixture(
        fixture_dir.path(),
        "bad.csv",
        "date,name,amount\nnot-a-date,Coffee,nope\n",
    );

    let outcome = import::run_with_home_override(&path.display().to_string(), false, Some(&home));
    assert!(outcome.is_err());
    if let Err(error) = outcome {
        assert_eq!(error.code, "import_invalid");
    }
}

#[test]
fn missing_files_surface_a_readable_error() {
    let (_dir, home) = temp_home("pocketsage-import");

    let outcome = import::run_with_home_override("/definitely/not/here.csv", false, Some(&home));
    assert!(outcome.is_err());
    if let Err(error) = outcome {
        assert_eq!(error.code, "import_invalid");
        assert!(!error.recovery_steps.is_empty());
    }
}

#[test]
fn transactions_command_filters_by_category_and_search() {
    let (_dir, home) = temp_home("pocketsage-import");
    import_csv(&home, STATEMENT);

    let page = transactions::run_with_home_override(
        TransactionFilter {
            category: Some("ENTERTAINMENT".to_string()),
            ..TransactionFilter::default()
        },
        Some(&home),
    );
    assert!(page.is_ok());
    if let Ok(page) = page {
        assert_eq!(page.total, 2);
        assert!(page.transactions.iter().all(|txn| txn.name == "Netflix"));
    }

    let page = transactions::run_with_home_override(
        TransactionFilter {
            search: Some("whole".to_string()),
            ..TransactionFilter::default()
        },
        Some(&home),
    );
    assert!(page.is_ok());
    if let Ok(page) = page {
        assert_eq!(page.total, 1);
        assert_eq!(page.transactions[0].name, "Whole Foods");
    }
}

#[test]
fn transactions_command_respects_date_window_and_limit() {
    let (_dir, home) = temp_home("pocketsage-import");
    import_csv(&home, STATEMENT);

    let page = transactions::run_with_home_override(
        TransactionFilter {
            start_date: Some("2026-08-01".to_string()),
            end_date: Some("2026-08-31".to_string()),
            limit: Some(1),
            ..TransactionFilter::default()
        },
        Some(&home),
    );
    assert!(page.is_ok());
    if let Ok(page) = page {
        assert_eq!(page.total, 2);
        assert_eq!(page.transactions.len(), 1);
    }
}
