//! CLI command handlers. Each command is in its own file.

mod config;
mod serve;

pub use config::run_config;
pub use serve::run_serve;
