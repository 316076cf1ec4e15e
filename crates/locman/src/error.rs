//! CLI error types with miette diagnostics.
//!
//! Maps config and core errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use locman_config::ConfigError;
use locman_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INVALID: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────

    #[error("Profile '{profile}' has an invalid {field}")]
    #[diagnostic(
        code(locman::invalid_argument),
        help("{reason}. Values in the default_providers and play_services sections must not be negative.")
    )]
    InvalidArgument {
        profile: String,
        field: String,
        reason: String,
    },

    #[error("Profile '{profile}' cannot be built: {reason}")]
    #[diagnostic(
        code(locman::illegal_state),
        help(
            "Add a [profiles.{profile}.default_providers] or \
             [profiles.{profile}.play_services] section."
        )
    )]
    IllegalState { profile: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(locman::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: locman config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(locman::no_config),
        help(
            "Create one with: locman config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(locman::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(locman::config))]
    Config(Box<figment::Error>),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(locman::serialize))]
    Serialization(#[from] toml::ser::Error),

    // ── IO / Output ──────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(locman::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::IllegalState { .. } => exit_code::INVALID,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } => exit_code::NOT_FOUND,
            Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    fn from_core(profile: String, err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument { field, reason } => Self::InvalidArgument {
                profile,
                field: field.into(),
                reason,
            },
            CoreError::IllegalState { reason } => Self::IllegalState { profile, reason },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid { profile, source } => Self::from_core(profile, source),
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Serialization(e) => Self::Serialization(e),
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}
