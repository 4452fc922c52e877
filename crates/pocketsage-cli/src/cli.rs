use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Extended help shown after `pocketsage import --help`.
pub const IMPORT_AFTER_HELP: &str = "\
How import works:
  Pocketsage reads one CSV file per import. The header row names the
  columns; common bank-export spellings are accepted.

  Recognized columns (first match wins):
    date      date, transaction_date, trans_date, posted_date   (required)
    name      name, description, merchant, memo, payee          (required)
    amount    amount, transaction_amount, debit                 (required)
    category  category, type, transaction_type
    subcategory  subcategory, sub_category, detailed_category
    account   account, account_name
    mask      account_mask, mask, last_four

  Dates may be YYYY-MM-DD, M/D/YYYY, or M-D-YYYY.
  Amounts may carry `$` and thousands separators.
  Signed amount rules (strict):
    positive = money out (debit, spending)
    negative = money in (credit, income)

  To read stdin, use `-` as the path.
  Example: cat rows.csv | pocketsage import -

What to do next:
  1. Run `pocketsage import --dry-run <path>` and fix any reported issues.
  2. Run `pocketsage import <path>` once dry-run passes.
  3. Ask a question: `pocketsage ask \"what did I spend last month?\"`.
";

#[derive(Debug, Parser)]
#[command(
    name = "pocketsage",
    version,
    about = "grounded personal finance chat",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import bank transactions from a CSV file into your local store
    #[command(after_long_help = IMPORT_AFTER_HELP)]
    Import {
        /// Validate import data without writing to the store
        #[arg(long)]
        dry_run: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a CSV file (use `-` for stdin)
        path: String,
    },
    /// Ask a natural-language question answered by the chat model
    Ask {
        /// The question to ask (quote it, or let the shell pass the words)
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Also print the grounding context sent to the model
        #[arg(long)]
        show_context: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the grounding context a question would send to the model
    Context {
        /// The question to inspect
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Browse stored transactions with optional filters
    Transactions {
        /// Only show transactions in this category
        #[arg(long)]
        category: Option<String>,
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Only show transactions whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Maximum rows to return (1-500)
        #[arg(long)]
        limit: Option<i64>,
        /// Rows to skip before the first returned row
        #[arg(long)]
        offset: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List the accounts derived from stored transactions
    Accounts {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show ledger totals, top categories, and recent months
    Summary {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
