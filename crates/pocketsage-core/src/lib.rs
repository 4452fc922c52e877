pub mod chat;
pub mod classify;
pub mod commands;
pub mod context;
pub mod error;
pub mod import;
pub mod migrations;
pub mod setup;
pub mod state;
pub mod store;

pub use error::{CoreError, CoreResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
