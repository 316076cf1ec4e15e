//! `locman check`: build a profile and render the resolved configuration.

use serde::Serialize;

use locman_core::{
    DefaultProviderConfiguration, GooglePlayServicesConfiguration, LocationConfiguration,
    PermissionConfiguration,
};

use crate::cli::{CheckArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output::{self, SettingRow, millis};

// ── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LocationReport {
    pub profile: String,
    pub keep_tracking: bool,
    pub permission: PermissionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_services: Option<PlayServicesReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_providers: Option<DefaultProvidersReport>,
}

#[derive(Debug, Serialize)]
pub struct PermissionReport {
    pub provider: String,
    pub required_permissions: Vec<String>,
    pub rationale_message: String,
}

#[derive(Debug, Serialize)]
pub struct PlayServicesReport {
    pub priority: String,
    pub interval_ms: u64,
    pub fastest_interval_ms: u64,
    pub wait_period_ms: u64,
    pub fallback_to_default: bool,
    pub ask_for_google_play_services: bool,
    pub ask_for_settings_api: bool,
    pub fail_on_settings_api_suspended: bool,
    pub ignore_last_known_location: bool,
}

#[derive(Debug, Serialize)]
pub struct DefaultProvidersReport {
    pub required_time_interval_ms: u64,
    pub required_distance_interval_m: u64,
    pub acceptable_accuracy_m: f32,
    pub acceptable_time_period_ms: u64,
    pub gps_wait_period_ms: u64,
    pub network_wait_period_ms: u64,
    pub ask_for_gps_enable: bool,
    pub gps_message: String,
}

impl From<&PermissionConfiguration> for PermissionReport {
    fn from(cfg: &PermissionConfiguration) -> Self {
        Self {
            provider: cfg.provider().name().to_owned(),
            required_permissions: cfg
                .required_permissions()
                .iter()
                .map(ToString::to_string)
                .collect(),
            rationale_message: cfg.rationale_message().to_owned(),
        }
    }
}

impl From<&GooglePlayServicesConfiguration> for PlayServicesReport {
    fn from(cfg: &GooglePlayServicesConfiguration) -> Self {
        let request = cfg.location_request();
        Self {
            priority: request.priority().to_string(),
            interval_ms: millis(request.interval()),
            fastest_interval_ms: millis(request.fastest_interval()),
            wait_period_ms: millis(cfg.wait_period()),
            fallback_to_default: cfg.fallback_to_default(),
            ask_for_google_play_services: cfg.ask_for_google_play_services(),
            ask_for_settings_api: cfg.ask_for_settings_api(),
            fail_on_settings_api_suspended: cfg.fail_on_settings_api_suspended(),
            ignore_last_known_location: cfg.ignore_last_known_location(),
        }
    }
}

impl From<&DefaultProviderConfiguration> for DefaultProvidersReport {
    fn from(cfg: &DefaultProviderConfiguration) -> Self {
        Self {
            required_time_interval_ms: millis(cfg.required_time_interval()),
            required_distance_interval_m: cfg.required_distance_interval(),
            acceptable_accuracy_m: cfg.acceptable_accuracy(),
            acceptable_time_period_ms: millis(cfg.acceptable_time_period()),
            gps_wait_period_ms: millis(cfg.gps_wait_period()),
            network_wait_period_ms: millis(cfg.network_wait_period()),
            ask_for_gps_enable: cfg.ask_for_gps_enable(),
            gps_message: cfg.gps_message().to_owned(),
        }
    }
}

impl LocationReport {
    pub fn new(profile: &str, cfg: &LocationConfiguration) -> Self {
        Self {
            profile: profile.to_owned(),
            keep_tracking: cfg.keep_tracking(),
            permission: PermissionReport::from(cfg.permission_configuration().as_ref()),
            play_services: cfg
                .google_play_services_configuration()
                .map(|p| PlayServicesReport::from(p.as_ref())),
            default_providers: cfg
                .default_provider_configuration()
                .map(|p| DefaultProvidersReport::from(p.as_ref())),
        }
    }

    fn rows(&self) -> Vec<SettingRow> {
        let mut rows = vec![
            SettingRow::new("profile", &self.profile),
            SettingRow::new("keep_tracking", self.keep_tracking),
            SettingRow::new("permission.provider", &self.permission.provider),
            SettingRow::new(
                "permission.required_permissions",
                self.permission.required_permissions.join(", "),
            ),
            SettingRow::new(
                "permission.rationale_message",
                &self.permission.rationale_message,
            ),
        ];

        if let Some(ref p) = self.play_services {
            rows.extend([
                SettingRow::new("play_services.priority", &p.priority),
                SettingRow::new("play_services.interval_ms", p.interval_ms),
                SettingRow::new("play_services.fastest_interval_ms", p.fastest_interval_ms),
                SettingRow::new("play_services.wait_period_ms", p.wait_period_ms),
                SettingRow::new("play_services.fallback_to_default", p.fallback_to_default),
                SettingRow::new(
                    "play_services.ask_for_google_play_services",
                    p.ask_for_google_play_services,
                ),
                SettingRow::new("play_services.ask_for_settings_api", p.ask_for_settings_api),
                SettingRow::new(
                    "play_services.fail_on_settings_api_suspended",
                    p.fail_on_settings_api_suspended,
                ),
                SettingRow::new(
                    "play_services.ignore_last_known_location",
                    p.ignore_last_known_location,
                ),
            ]);
        } else {
            rows.push(SettingRow::new("play_services", "disabled"));
        }

        if let Some(ref d) = self.default_providers {
            rows.extend([
                SettingRow::new(
                    "default_providers.required_time_interval_ms",
                    d.required_time_interval_ms,
                ),
                SettingRow::new(
                    "default_providers.required_distance_interval_m",
                    d.required_distance_interval_m,
                ),
                SettingRow::new(
                    "default_providers.acceptable_accuracy_m",
                    d.acceptable_accuracy_m,
                ),
                SettingRow::new(
                    "default_providers.acceptable_time_period_ms",
                    d.acceptable_time_period_ms,
                ),
                SettingRow::new("default_providers.gps_wait_period_ms", d.gps_wait_period_ms),
                SettingRow::new(
                    "default_providers.network_wait_period_ms",
                    d.network_wait_period_ms,
                ),
                SettingRow::new("default_providers.ask_for_gps_enable", d.ask_for_gps_enable),
                SettingRow::new("default_providers.gps_message", &d.gps_message),
            ]);
        } else {
            rows.push(SettingRow::new("default_providers", "disabled"));
        }

        rows
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &CheckArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let name = cfg.active_profile_name(args.name.as_deref().or(global.profile.as_deref()));
    let profile = cfg.profile(&name)?;

    let location = locman_config::profile_to_location_configuration(profile, &name)?;
    tracing::info!(profile = %name, "profile is valid");

    let report = LocationReport::new(&name, &location);
    let rendered = output::render_settings(&global.output, &report, &report.rows())?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
