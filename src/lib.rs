// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod filtering;
pub mod formatting;
pub mod graphql_fields;
pub mod logging;
pub mod models;
pub mod notifier;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::{SlackClient, TeamDirectoryClient};
pub use config::Config;
pub use error::{NotifyError, NotifyResult};
pub use filtering::{EmailFilter, SlugFilter};
pub use models::*;
pub use notifier::{DispatchSummary, Notifier};
