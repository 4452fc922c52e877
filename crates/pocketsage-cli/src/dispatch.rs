use pocketsage_core::commands;
use pocketsage_core::commands::accounts::AccountsData;
use pocketsage_core::commands::ask::AskData;
use pocketsage_core::commands::context::ContextData;
use pocketsage_core::commands::summary::SummaryData;
use pocketsage_core::import::ImportOutcome;
use pocketsage_core::store::{TransactionFilter, TransactionPage};
use pocketsage_core::CoreResult;

use crate::cli::{Cli, Commands};

/// One variant per command so text rendering can stay typed instead of
/// round-tripping through JSON values.
#[derive(Debug)]
pub enum CommandOutput {
    Import(ImportOutcome),
    Ask { data: AskData, show_context: bool },
    Context(ContextData),
    Transactions(TransactionPage),
    Accounts(AccountsData),
    Summary(SummaryData),
}

pub fn dispatch(cli: &Cli) -> CoreResult<CommandOutput> {
    match &cli.command {
        Commands::Import { dry_run, path, .. } => {
            commands::import::run(path, *dry_run).map(CommandOutput::Import)
        }
        Commands::Ask {
            question,
            show_context,
            ..
        } => commands::ask::run(&question.join(" ")).map(|data| CommandOutput::Ask {
            data,
            show_context: *show_context,
        }),
        Commands::Context { question, .. } => {
            commands::context::run(&question.join(" ")).map(CommandOutput::Context)
        }
        Commands::Transactions {
            category,
            from,
            to,
            search,
            limit,
            offset,
            ..
        } => {
            let filter = TransactionFilter {
                category: category.clone(),
                start_date: from.as_ref().map(|value| value.as_str().to_string()),
                end_date: to.as_ref().map(|value| value.as_str().to_string()),
                search: search.clone(),
                limit: *limit,
                offset: *offset,
            };
            commands::transactions::run(filter).map(CommandOutput::Transactions)
        }
        Commands::Accounts { .. } => commands::accounts::run().map(CommandOutput::Accounts),
        Commands::Summary { .. } => commands::summary::run().map(CommandOutput::Summary),
    }
}
