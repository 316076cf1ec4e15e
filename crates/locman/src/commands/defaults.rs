//! `locman defaults`: show the built-in defaults table.

use serde::Serialize;

use locman_core::defaults;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, SettingRow, millis};

#[derive(Debug, Serialize)]
struct DefaultsReport {
    location_interval_ms: u64,
    location_distance_interval_m: u64,
    min_accuracy_m: f32,
    time_period_ms: u64,
    wait_period_ms: u64,
    keep_tracking: bool,
    fallback_to_default: bool,
    ask_for_gp_services: bool,
    ask_for_settings_api: bool,
    fail_on_settings_api_suspended: bool,
    ignore_last_known_location: bool,
    location_priority: String,
    location_fastest_interval_ms: u64,
    location_permissions: Vec<String>,
}

impl DefaultsReport {
    fn current() -> Self {
        Self {
            location_interval_ms: millis(defaults::LOCATION_INTERVAL),
            location_distance_interval_m: defaults::LOCATION_DISTANCE_INTERVAL,
            min_accuracy_m: defaults::MIN_ACCURACY,
            time_period_ms: millis(defaults::TIME_PERIOD),
            wait_period_ms: millis(defaults::WAIT_PERIOD),
            keep_tracking: defaults::KEEP_TRACKING,
            fallback_to_default: defaults::FALLBACK_TO_DEFAULT,
            ask_for_gp_services: defaults::ASK_FOR_GP_SERVICES,
            ask_for_settings_api: defaults::ASK_FOR_SETTINGS_API,
            fail_on_settings_api_suspended: defaults::FAIL_ON_SETTINGS_API_SUSPENDED,
            ignore_last_known_location: defaults::IGNORE_LAST_KNOWN_LOCATION,
            location_priority: defaults::LOCATION_PRIORITY.to_string(),
            location_fastest_interval_ms: millis(defaults::LOCATION_FASTEST_INTERVAL),
            location_permissions: defaults::LOCATION_PERMISSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    fn rows(&self) -> Vec<SettingRow> {
        vec![
            SettingRow::new("location_interval_ms", self.location_interval_ms),
            SettingRow::new(
                "location_distance_interval_m",
                self.location_distance_interval_m,
            ),
            SettingRow::new("min_accuracy_m", self.min_accuracy_m),
            SettingRow::new("time_period_ms", self.time_period_ms),
            SettingRow::new("wait_period_ms", self.wait_period_ms),
            SettingRow::new("keep_tracking", self.keep_tracking),
            SettingRow::new("fallback_to_default", self.fallback_to_default),
            SettingRow::new("ask_for_gp_services", self.ask_for_gp_services),
            SettingRow::new("ask_for_settings_api", self.ask_for_settings_api),
            SettingRow::new(
                "fail_on_settings_api_suspended",
                self.fail_on_settings_api_suspended,
            ),
            SettingRow::new("ignore_last_known_location", self.ignore_last_known_location),
            SettingRow::new("location_priority", &self.location_priority),
            SettingRow::new(
                "location_fastest_interval_ms",
                self.location_fastest_interval_ms,
            ),
            SettingRow::new("location_permissions", self.location_permissions.join(", ")),
        ]
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let report = DefaultsReport::current();
    let rendered = output::render_settings(&global.output, &report, &report.rows())?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
