use chrono::NaiveDate;

use crate::store::TransactionRecord;

/// One CSV row normalized into the transaction shape, minus the id (assigned
/// at persist time).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    pub date: String,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub account_name: String,
    pub account_mask: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub transactions: Vec<ParsedTransaction>,
    pub issues: Vec<String>,
    pub skipped: i64,
}

const DATE_COLUMNS: [&str; 4] = ["date", "transaction_date", "trans_date", "posted_date"];
const NAME_COLUMNS: [&str; 5] = ["name", "description", "merchant", "memo", "payee"];
const AMOUNT_COLUMNS: [&str; 3] = ["amount", "transaction_amount", "debit"];
const CATEGORY_COLUMNS: [&str; 3] = ["category", "type", "transaction_type"];
const SUBCATEGORY_COLUMNS: [&str; 3] = ["subcategory", "sub_category", "detailed_category"];
const ACCOUNT_COLUMNS: [&str; 2] = ["account", "account_name"];
const MASK_COLUMNS: [&str; 3] = ["account_mask", "mask", "last_four"];

/// Parses CSV content into transactions. Bad rows are reported and skipped,
/// never fatal; a missing required column fails the whole parse with a
/// single issue so the caller can reject the file.
pub fn parse_csv(content: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(record) => record
            .iter()
            .map(|value| value.trim().to_lowercase())
            .collect(),
        Err(_) => {
            outcome
                .issues
                .push("CSV header row is missing or unreadable.".to_string());
            return outcome;
        }
    };

    let date_idx = find_column(&headers, &DATE_COLUMNS);
    let name_idx = find_column(&headers, &NAME_COLUMNS);
    let amount_idx = find_column(&headers, &AMOUNT_COLUMNS);
    let category_idx = find_column(&headers, &CATEGORY_COLUMNS);
    let subcategory_idx = find_column(&headers, &SUBCATEGORY_COLUMNS);
    let account_idx = find_column(&headers, &ACCOUNT_COLUMNS);
    let mask_idx = find_column(&headers, &MASK_COLUMNS);

    let mut missing = Vec::new();
    if date_idx.is_none() {
        missing.push("date");
    }
    if name_idx.is_none() {
        missing.push("name/description");
    }
    if amount_idx.is_none() {
        missing.push("amount");
    }
    if !missing.is_empty() {
        for column in missing {
            outcome
                .issues
                .push(format!("Missing required column: {column}"));
        }
        return outcome;
    }

    for (index, record) in reader.records().enumerate() {
        // Header is row 1; first data row is row 2.
        let row_number = index + 2;

        let record = match record {
            Ok(record) => record,
            Err(_) => {
                outcome.issues.push(format!("Row {row_number}: parse error"));
                outcome.skipped += 1;
                continue;
            }
        };

        let date_raw = field(&record, date_idx);
        let name = field(&record, name_idx);
        let amount_raw = field(&record, amount_idx);

        if date_raw.is_empty() && name.is_empty() && amount_raw.is_empty() {
            outcome.skipped += 1;
            continue;
        }
        if date_raw.is_empty() || name.is_empty() || amount_raw.is_empty() {
            outcome
                .issues
                .push(format!("Row {row_number}: missing required field"));
            outcome.skipped += 1;
            continue;
        }

        let Some(date) = normalize_date(&date_raw) else {
            outcome
                .issues
                .push(format!("Row {row_number}: invalid date \"{date_raw}\""));
            outcome.skipped += 1;
            continue;
        };

        let Some(amount) = parse_amount(&amount_raw) else {
            outcome
                .issues
                .push(format!("Row {row_number}: invalid amount \"{amount_raw}\""));
            outcome.skipped += 1;
            continue;
        };

        let category = field(&record, category_idx);
        let category = if category.is_empty() {
            "UNCATEGORIZED".to_string()
        } else {
            category
        };

        outcome.transactions.push(ParsedTransaction {
            date,
            name,
            amount,
            category,
            subcategory: field(&record, subcategory_idx),
            account_name: field(&record, account_idx),
            account_mask: field(&record, mask_idx),
        });
    }

    outcome
}

impl ParsedTransaction {
    pub fn into_record(self, id: String) -> TransactionRecord {
        TransactionRecord {
            id,
            date: self.date,
            name: self.name,
            amount: self.amount,
            category: self.category,
            subcategory: self.subcategory,
            account_name: self.account_name,
            account_mask: self.account_mask,
        }
    }
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(index) = headers.iter().position(|header| header == candidate) {
            return Some(index);
        }
    }
    None
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Accepts YYYY-MM-DD, M/D/YYYY, and M-D-YYYY; everything comes out as
/// YYYY-MM-DD.
fn normalize_date(raw: &str) -> Option<String> {
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    None
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{normalize_date, parse_amount, parse_csv};

    #[test]
    fn parses_well_formed_rows_with_aliased_headers() {
        let csv = "posted_date,description,transaction_amount,type,account,last_four\n\
                   2026-08-01,Netflix,$15.49,ENTERTAINMENT,Main Checking,3903\n\
                   08/02/2026,\"Corner Store, Inc\",\"1,200.00\",,,\n";
        let outcome = parse_csv(csv);
        assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
        assert_eq!(outcome.transactions.len(), 2);

        let first = &outcome.transactions[0];
        assert_eq!(first.date, "2026-08-01");
        assert_eq!(first.name, "Netflix");
        assert_eq!(first.amount, 15.49);
        assert_eq!(first.category, "ENTERTAINMENT");
        assert_eq!(first.account_name, "Main Checking");
        assert_eq!(first.account_mask, "3903");

        let second = &outcome.transactions[1];
        assert_eq!(second.date, "2026-08-02");
        assert_eq!(second.name, "Corner Store, Inc");
        assert_eq!(second.amount, 1200.0);
        assert_eq!(second.category, "UNCATEGORIZED");
    }

    #[test]
    fn missing_required_columns_fail_the_whole_parse() {
        let outcome = parse_csv("date,category\n2026-08-01,FOOD\n");
        assert!(outcome.transactions.is_empty());
        assert!(outcome
            .issues
            .iter()
            .any(|issue| issue.contains("name/description")));
        assert!(outcome.issues.iter().any(|issue| issue.contains("amount")));
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "date,name,amount\n\
                   not-a-date,Coffee,4.50\n\
                   2026-08-03,Lunch,abc\n\
                   2026-08-04,Groceries,52.10\n";
        let outcome = parse_csv(csv);
        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.skipped, 2);
        assert!(outcome.issues.iter().any(|issue| issue.contains("invalid date")));
        assert!(outcome.issues.iter().any(|issue| issue.contains("invalid amount")));
    }

    #[test]
    fn date_formats_normalize_to_iso() {
        assert_eq!(normalize_date("2026-08-05"), Some("2026-08-05".to_string()));
        assert_eq!(normalize_date("8/5/2026"), Some("2026-08-05".to_string()));
        assert_eq!(normalize_date("08-05-2026"), Some("2026-08-05".to_string()));
        assert_eq!(normalize_date("August 5, 2026"), None);
    }

    #[test]
    fn amounts_strip_currency_punctuation() {
        assert_eq!(parse_amount("$1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("-42.00"), Some(-42.0));
        assert_eq!(parse_amount("twelve"), None);
    }
}
