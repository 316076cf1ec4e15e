//! Config file resolution for the CLI.
//!
//! `--config` (or `LOCMAN_CONFIG`) names an explicit file that must exist;
//! otherwise the platform path is used and a missing file means defaults.

use std::path::PathBuf;

use locman_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Path the CLI reads and writes.
pub fn path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(locman_config::config_path)
}

/// Load the merged configuration for this invocation.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    match global.config {
        Some(ref explicit) => {
            if !explicit.exists() {
                return Err(CliError::NoConfig {
                    path: explicit.display().to_string(),
                });
            }
            Ok(locman_config::load_config_from(explicit)?)
        }
        None => Ok(locman_config::load_config()?),
    }
}
