use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

pub const REQUIRED_INDEX_NAMES: [&str; 4] = [
    "idx_transactions_date",
    "idx_transactions_category",
    "idx_transactions_name",
    "idx_transactions_account",
];

pub const TRANSACTIONS_COLUMNS: [&str; 8] = [
    "id",
    "date",
    "name",
    "amount",
    "category",
    "subcategory",
    "account_name",
    "account_mask",
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(vec![M::up(BOOTSTRAP_SQL)]);
    migrations.to_latest(conn)
}
