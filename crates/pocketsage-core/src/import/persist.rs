use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, TransactionBehavior};

use super::parse::ParsedTransaction;
use crate::state::map_sqlite_error;
use crate::CoreResult;

/// Writes parsed transactions in one immediate transaction. Ids are
/// deterministic over row content plus a per-duplicate ordinal, so
/// re-importing the same file replaces the same rows instead of doubling
/// them.
pub fn persist_transactions(
    connection: &mut Connection,
    db_path: &Path,
    transactions: Vec<ParsedTransaction>,
) -> CoreResult<i64> {
    let tx = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut inserted = 0_i64;
    let mut ordinals: HashMap<String, u32> = HashMap::new();

    for parsed in transactions {
        let key = transaction_key(&parsed);
        let ordinal = ordinals.entry(key.clone()).or_insert(0);
        let id = format!("csv-{key}-{ordinal}");
        *ordinal += 1;

        let record = parsed.into_record(id);
        tx.execute(
            "INSERT OR REPLACE INTO transactions (
                id, date, name, amount, category, subcategory, account_name, account_mask
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.date,
                record.name,
                record.amount,
                record.category,
                record.subcategory,
                record.account_name,
                record.account_mask,
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
        inserted += 1;
    }

    tx.commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(inserted)
}

fn transaction_key(parsed: &ParsedTransaction) -> String {
    format!(
        "{}-{}-{}-{}",
        parsed.date, parsed.name, parsed.amount, parsed.account_mask
    )
}
