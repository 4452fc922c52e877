use std::path::Path;

use crate::commands::setup_for;
use crate::import::{execute, ImportOutcome};
use crate::CoreResult;

pub fn run(path: &str, dry_run: bool) -> CoreResult<ImportOutcome> {
    run_with_home_override(path, dry_run, None)
}

#[doc(hidden)]
pub fn run_with_home_override(
    path: &str,
    dry_run: bool,
    home_override: Option<&Path>,
) -> CoreResult<ImportOutcome> {
    let setup = setup_for(home_override)?;
    execute(&setup, path, dry_run)
}
