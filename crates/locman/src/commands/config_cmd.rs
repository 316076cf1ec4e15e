//! Config subcommand handlers.

use locman_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Path => {
            let path = config::path(global);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::path(global);
            if path.exists() && !*force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let starter = Config::starter();
            match global.config {
                Some(ref explicit) => locman_config::save_config_to(&starter, explicit)?,
                None => locman_config::save_config(&starter)?,
            }
            tracing::info!(path = %path.display(), "wrote starter config");
            if !global.quiet {
                eprintln!("Wrote starter config to {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let rendered = toml::to_string_pretty(&cfg)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }
    }
}
