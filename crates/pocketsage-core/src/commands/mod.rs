pub mod accounts;
pub mod ask;
pub mod context;
pub mod import;
pub mod summary;
pub mod transactions;

use std::path::Path;

use crate::setup::{ensure_initialized, ensure_initialized_at, SetupContext};
use crate::CoreResult;

pub(crate) fn setup_for(home_override: Option<&Path>) -> CoreResult<SetupContext> {
    match home_override {
        Some(home) => ensure_initialized_at(home),
        None => ensure_initialized(),
    }
}
