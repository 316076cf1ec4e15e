//! Subcommand handlers.

pub mod check;
pub mod config_cmd;
pub mod defaults;
pub mod profiles;
