mod support;

use pocketsage_core::setup::ensure_initialized_at;
use rusqlite::Connection;
use support::testkit::{db_path, temp_home};

fn object_exists(connection: &Connection, object_type: &str, object_name: &str) -> bool {
    connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [object_type, object_name],
            |_row| Ok(true),
        )
        .unwrap_or(false)
}

#[test]
fn setup_creates_store_db_at_home_override() {
    let (_dir, home) = temp_home("pocketsage-setup");

    let context = ensure_initialized_at(&home);
    assert!(context.is_ok());
    if let Ok(setup) = context {
        assert!(setup.db_path.ends_with("finance.db"));
        assert!(db_path(&home).exists());
    }
}

#[test]
fn setup_is_idempotent_for_an_existing_store() {
    let (_dir, home) = temp_home("pocketsage-setup");

    assert!(ensure_initialized_at(&home).is_ok());
    assert!(ensure_initialized_at(&home).is_ok());
}

#[test]
fn setup_creates_transactions_table_and_indexes() {
    let (_dir, home) = temp_home("pocketsage-setup");

    let context = ensure_initialized_at(&home);
    assert!(context.is_ok());

    let connection = Connection::open(db_path(&home));
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        assert!(object_exists(&conn, "table", "transactions"));
        assert!(object_exists(&conn, "index", "idx_transactions_date"));
        assert!(object_exists(&conn, "index", "idx_transactions_category"));
        assert!(object_exists(&conn, "index", "idx_transactions_name"));
        assert!(object_exists(&conn, "index", "idx_transactions_account"));
    }
}

#[test]
fn setup_rejects_a_corrupt_database_file() {
    let (_dir, home) = temp_home("pocketsage-setup");
    std::fs::create_dir_all(&home).expect("create home");
    std::fs::write(db_path(&home), "this is not a sqlite database").expect("write garbage");

    let context = ensure_initialized_at(&home);
    assert!(context.is_err());
    if let Err(error) = context {
        assert_eq!(error.code, "store_corrupt");
    }
}
