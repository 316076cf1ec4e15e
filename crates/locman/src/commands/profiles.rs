//! `locman profiles`: list configured profiles.

use serde::Serialize;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ProfileEntry {
    name: String,
    default: bool,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let active = cfg.active_profile_name(global.profile.as_deref());

    let entries: Vec<ProfileEntry> = cfg
        .profile_names()
        .into_iter()
        .map(|name| ProfileEntry {
            default: name == active,
            name,
        })
        .collect();

    let rendered = output::render_list(
        &global.output,
        &entries,
        |e| ProfileRow {
            name: e.name.clone(),
            default: if e.default { "*" } else { "" },
        },
        |e| e.name.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
