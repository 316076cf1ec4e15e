//! Shared configuration for locman.
//!
//! TOML profiles layered with figment (defaults, file, `LOCMAN_` env vars)
//! and translation to `locman_core::LocationConfiguration`. Every value is
//! applied through the core builders, so validation lives in one place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use locman_core::{
    CoreError, DefaultProviderConfiguration, GooglePlayServicesConfiguration,
    LocationConfiguration, LocationPermission, LocationPriority, LocationRequest,
    PermissionConfiguration, ProviderSource, StubPermissionProvider, defaults,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid profile '{profile}': {source}")]
    Invalid {
        profile: String,
        #[source]
        source: CoreError,
    },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named explicitly.
    pub default_profile: Option<String>,

    /// Named location profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// A config with one profile using the built-in providers and
    /// interactive permission requests. Written by `locman config init`.
    pub fn starter() -> Self {
        let profile = Profile {
            keep_tracking: Some(defaults::KEEP_TRACKING),
            permission: Some(PermissionSettings {
                mode: PermissionMode::Request,
                rationale_message: Some("Location is needed to show where you are.".into()),
                required_permissions: None,
            }),
            play_services: None,
            default_providers: Some(DefaultProviderSettings {
                wait_period_ms: Some(millis(defaults::WAIT_PERIOD)),
                gps_message: Some("Please enable GPS to continue.".into()),
                ..DefaultProviderSettings::default()
            }),
        };

        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_owned(), profile);
        Self {
            default_profile: Some("default".into()),
            profiles,
        }
    }

    /// Resolve which profile to use: explicit override, then `default_profile`,
    /// then `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_owned(),
                available: self.profile_names(),
            })
    }

    /// Profile names in sorted order.
    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }
}

/// A named location profile. Every section is optional; absent values keep
/// the defaults table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Continuous updates instead of a single fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_tracking: Option<bool>,

    /// Permission request policy. Omit to never request permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionSettings>,

    /// Enables Play Services as a location source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_services: Option<PlayServicesSettings>,

    /// Enables the GPS and Network providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_providers: Option<DefaultProviderSettings>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMode {
    /// Ask the user for missing permissions.
    #[default]
    Request,
    /// Never ask.
    Stub,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionSettings {
    #[serde(default)]
    pub mode: PermissionMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale_message: Option<String>,

    /// e.g. `["ACCESS_FINE_LOCATION"]`. Defaults to coarse + fine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<Vec<LocationPermission>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlayServicesSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<LocationPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastest_interval_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_period_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_for_google_play_services: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_for_settings_api: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_settings_api_suspended: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_last_known_location: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_time_interval_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_distance_interval_m: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_accuracy_m: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_time_period_ms: Option<i64>,

    /// Shared GPS + Network budget. Applied before the per-provider values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_period_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_wait_period_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_wait_period_ms: Option<i64>,

    /// Prompt text for enabling GPS. Empty or absent means never prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_message: Option<String>,
}

// ── Translation to core types ───────────────────────────────────────

impl PermissionSettings {
    pub fn to_configuration(&self) -> Result<PermissionConfiguration, CoreError> {
        let mut builder = PermissionConfiguration::builder();
        if let Some(ref message) = self.rationale_message {
            builder.rationale_message(message.clone());
        }
        if let Some(ref permissions) = self.required_permissions {
            builder.required_permissions(permissions.iter().copied())?;
        }
        if self.mode == PermissionMode::Stub {
            builder.permission_provider(StubPermissionProvider);
        }
        Ok(builder.build())
    }
}

impl PlayServicesSettings {
    pub fn to_configuration(&self) -> Result<GooglePlayServicesConfiguration, CoreError> {
        let mut builder = GooglePlayServicesConfiguration::builder();

        if self.priority.is_some() || self.interval_ms.is_some() || self.fastest_interval_ms.is_some()
        {
            let request = LocationRequest::new(
                self.priority.unwrap_or(defaults::LOCATION_PRIORITY),
                self.interval_ms
                    .unwrap_or_else(|| millis(defaults::LOCATION_INTERVAL)),
                self.fastest_interval_ms
                    .unwrap_or_else(|| millis(defaults::LOCATION_FASTEST_INTERVAL)),
            )?;
            builder.location_request(request);
        }
        if let Some(ms) = self.wait_period_ms {
            builder.wait_period(ms)?;
        }
        if let Some(v) = self.fallback_to_default {
            builder.fallback_to_default(v);
        }
        if let Some(v) = self.ask_for_google_play_services {
            builder.ask_for_google_play_services(v);
        }
        if let Some(v) = self.ask_for_settings_api {
            builder.ask_for_settings_api(v);
        }
        if let Some(v) = self.fail_on_settings_api_suspended {
            builder.fail_on_settings_api_suspended(v);
        }
        if let Some(v) = self.ignore_last_known_location {
            builder.ignore_last_known_location(v);
        }
        Ok(builder.build())
    }
}

impl DefaultProviderSettings {
    pub fn to_configuration(&self) -> Result<DefaultProviderConfiguration, CoreError> {
        let mut builder = DefaultProviderConfiguration::builder();

        if let Some(ms) = self.required_time_interval_ms {
            builder.required_time_interval(ms)?;
        }
        if let Some(m) = self.required_distance_interval_m {
            builder.required_distance_interval(m)?;
        }
        if let Some(m) = self.acceptable_accuracy_m {
            builder.acceptable_accuracy(m)?;
        }
        if let Some(ms) = self.acceptable_time_period_ms {
            builder.acceptable_time_period(ms)?;
        }

        // Shared budget first so per-provider values override it.
        let wait_periods = [
            (ProviderSource::DefaultProviders, self.wait_period_ms),
            (ProviderSource::Gps, self.gps_wait_period_ms),
            (ProviderSource::Network, self.network_wait_period_ms),
        ];
        for (source, ms) in wait_periods {
            if let Some(ms) = ms {
                builder.set_wait_period(source, ms)?;
            }
        }

        if let Some(ref message) = self.gps_message {
            builder.gps_message(message.clone());
        }
        Ok(builder.build())
    }
}

/// Build a `LocationConfiguration` from a profile.
///
/// Core validation errors are tagged with the profile name.
pub fn profile_to_location_configuration(
    profile: &Profile,
    profile_name: &str,
) -> Result<LocationConfiguration, ConfigError> {
    let invalid = |source: CoreError| ConfigError::Invalid {
        profile: profile_name.to_owned(),
        source,
    };

    let mut builder = LocationConfiguration::builder();
    if let Some(keep_tracking) = profile.keep_tracking {
        builder.keep_tracking(keep_tracking);
    }
    if let Some(ref permission) = profile.permission {
        builder.ask_for_permission(permission.to_configuration().map_err(invalid)?);
    }
    if let Some(ref play_services) = profile.play_services {
        builder.use_google_play_services(play_services.to_configuration().map_err(invalid)?);
    }
    if let Some(ref default_providers) = profile.default_providers {
        builder.use_default_providers(default_providers.to_configuration().map_err(invalid)?);
    }

    let configuration = builder.build().map_err(invalid)?;
    tracing::debug!(profile = profile_name, "resolved location profile");
    Ok(configuration)
}

/// Milliseconds as the signed type the builders accept.
fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "locman", "locman").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("locman");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; the defaults and env layers still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LOCMAN_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    const NAVIGATION: &str = r#"
default_profile = "navigation"

[profiles.navigation]
keep_tracking = true

[profiles.navigation.permission]
mode = "request"
rationale_message = "We need your location to navigate."
required_permissions = ["ACCESS_FINE_LOCATION"]

[profiles.navigation.play_services]
priority = "balanced_power_accuracy"
interval_ms = 10000
fastest_interval_ms = 5000
wait_period_ms = 15000
fallback_to_default = false

[profiles.navigation.default_providers]
required_time_interval_ms = 10000
required_distance_interval_m = 5
acceptable_accuracy_m = 10.0
acceptable_time_period_ms = 60000
wait_period_ms = 20000
gps_wait_period_ms = 30000
gps_message = "Please enable GPS"

[profiles.quick]
default_providers = {}
"#;

    #[test]
    fn loads_profiles_from_file() {
        let (_dir, path) = write_config(NAVIGATION);
        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("navigation"));
        assert_eq!(cfg.profile_names(), vec!["navigation", "quick"]);
        assert_eq!(cfg.active_profile_name(None), "navigation");
        assert_eq!(cfg.active_profile_name(Some("quick")), "quick");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profile_translates_to_location_configuration() {
        let (_dir, path) = write_config(NAVIGATION);
        let cfg = load_config_from(&path).unwrap();
        let location =
            profile_to_location_configuration(cfg.profile("navigation").unwrap(), "navigation")
                .unwrap();

        assert!(location.keep_tracking());

        let permission = location.permission_configuration();
        assert_eq!(
            permission.required_permissions(),
            &[LocationPermission::AccessFineLocation]
        );
        assert_eq!(
            permission.rationale_message(),
            "We need your location to navigate."
        );

        let play = location.google_play_services_configuration().unwrap();
        assert_eq!(
            play.location_request().priority(),
            LocationPriority::BalancedPowerAccuracy
        );
        assert_eq!(play.location_request().interval(), Duration::from_secs(10));
        assert_eq!(play.wait_period(), Duration::from_secs(15));
        assert!(!play.fallback_to_default());

        let providers = location.default_provider_configuration().unwrap();
        assert_eq!(providers.gps_wait_period(), Duration::from_secs(30));
        assert_eq!(providers.network_wait_period(), Duration::from_secs(20));
        assert_eq!(providers.required_distance_interval(), 5);
        assert!(providers.ask_for_gps_enable());
    }

    #[test]
    fn empty_default_providers_section_uses_defaults_and_stub_permissions() {
        let (_dir, path) = write_config(NAVIGATION);
        let cfg = load_config_from(&path).unwrap();
        let location =
            profile_to_location_configuration(cfg.profile("quick").unwrap(), "quick").unwrap();

        assert!(!location.keep_tracking());
        assert!(location.google_play_services_configuration().is_none());
        assert_eq!(
            location.default_provider_configuration().unwrap().gps_wait_period(),
            defaults::WAIT_PERIOD
        );
        assert_eq!(
            location.permission_configuration().provider().name(),
            StubPermissionProvider::NAME
        );
    }

    #[test]
    fn profile_without_providers_is_rejected() {
        let profile = Profile {
            keep_tracking: Some(true),
            ..Profile::default()
        };
        let err = profile_to_location_configuration(&profile, "empty").unwrap_err();

        match err {
            ConfigError::Invalid { profile, source } => {
                assert_eq!(profile, "empty");
                assert!(source.is_illegal_state());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_values_are_reported_with_profile_name() {
        let (_dir, path) = write_config(
            r"
[profiles.broken.default_providers]
gps_wait_period_ms = -1
",
        );
        let cfg = load_config_from(&path).unwrap();
        let err =
            profile_to_location_configuration(cfg.profile("broken").unwrap(), "broken").unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid profile 'broken': invalid wait_period: Wait period cannot be set to negative value"
        );
    }

    #[test]
    fn empty_permission_list_is_rejected() {
        let settings = PermissionSettings {
            required_permissions: Some(Vec::new()),
            ..PermissionSettings::default()
        };
        assert!(settings.to_configuration().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn stub_mode_selects_stub_provider() {
        let settings = PermissionSettings {
            mode: PermissionMode::Stub,
            ..PermissionSettings::default()
        };
        let cfg = settings.to_configuration().unwrap();
        assert_eq!(cfg.provider().name(), StubPermissionProvider::NAME);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config(
            r"
[profiles.typo.default_providers]
gps_wait_ms = 100
",
        );
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn unknown_profile_lists_available_names() {
        let (_dir, path) = write_config(NAVIGATION);
        let cfg = load_config_from(&path).unwrap();

        match cfg.profile("nope").unwrap_err() {
            ConfigError::ProfileNotFound { name, available } => {
                assert_eq!(name, "nope");
                assert_eq!(available, vec!["navigation", "quick"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn starter_config_round_trips_and_builds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        save_config_to(&Config::starter(), &path).unwrap();

        let cfg = load_config_from(&path).unwrap();
        let name = cfg.active_profile_name(None);
        let location = profile_to_location_configuration(cfg.profile(&name).unwrap(), &name)
            .unwrap();

        assert_eq!(
            location.permission_configuration().rationale_message(),
            "Location is needed to show where you are."
        );
        assert!(
            location
                .default_provider_configuration()
                .unwrap()
                .ask_for_gps_enable()
        );
    }
}
