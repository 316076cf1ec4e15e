// ── Google Play Services configuration ──
//
// Settings for the fused location provider. This is the only place the
// Play Services wait period can be set.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::defaults;
use crate::error::{CoreError, non_negative};

/// Power/accuracy trade-off requested from the fused provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LocationPriority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
    NoPower,
}

/// Update cadence handed to the fused provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    priority: LocationPriority,
    interval: Duration,
    fastest_interval: Duration,
}

impl LocationRequest {
    pub fn new(
        priority: LocationPriority,
        interval_millis: i64,
        fastest_interval_millis: i64,
    ) -> Result<Self, CoreError> {
        let interval = non_negative(interval_millis, "interval", "Location request interval")?;
        let fastest_interval = non_negative(
            fastest_interval_millis,
            "fastest_interval",
            "Location request fastest interval",
        )?;
        Ok(Self {
            priority,
            interval: Duration::from_millis(interval),
            fastest_interval: Duration::from_millis(fastest_interval),
        })
    }

    pub fn priority(&self) -> LocationPriority {
        self.priority
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fastest_interval(&self) -> Duration {
        self.fastest_interval
    }
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            priority: defaults::LOCATION_PRIORITY,
            interval: defaults::LOCATION_INTERVAL,
            fastest_interval: defaults::LOCATION_FASTEST_INTERVAL,
        }
    }
}

/// Immutable Play Services settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GooglePlayServicesConfiguration {
    location_request: LocationRequest,
    fallback_to_default: bool,
    ask_for_google_play_services: bool,
    ask_for_settings_api: bool,
    fail_on_settings_api_suspended: bool,
    ignore_last_known_location: bool,
    wait_period: Duration,
}

impl GooglePlayServicesConfiguration {
    pub fn builder() -> GooglePlayServicesConfigurationBuilder {
        GooglePlayServicesConfigurationBuilder::default()
    }

    pub fn location_request(&self) -> &LocationRequest {
        &self.location_request
    }

    /// Switch to the default providers when Play Services cannot deliver.
    pub fn fallback_to_default(&self) -> bool {
        self.fallback_to_default
    }

    /// Offer the user to install or update Play Services when unavailable.
    pub fn ask_for_google_play_services(&self) -> bool {
        self.ask_for_google_play_services
    }

    /// Use the settings API to ask the user to fix location settings.
    pub fn ask_for_settings_api(&self) -> bool {
        self.ask_for_settings_api
    }

    pub fn fail_on_settings_api_suspended(&self) -> bool {
        self.fail_on_settings_api_suspended
    }

    pub fn ignore_last_known_location(&self) -> bool {
        self.ignore_last_known_location
    }

    pub fn wait_period(&self) -> Duration {
        self.wait_period
    }
}

impl Default for GooglePlayServicesConfiguration {
    fn default() -> Self {
        GooglePlayServicesConfigurationBuilder::default().build()
    }
}

// ── Builder ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GooglePlayServicesConfigurationBuilder {
    location_request: LocationRequest,
    fallback_to_default: bool,
    ask_for_google_play_services: bool,
    ask_for_settings_api: bool,
    fail_on_settings_api_suspended: bool,
    ignore_last_known_location: bool,
    wait_period: Duration,
}

impl Default for GooglePlayServicesConfigurationBuilder {
    fn default() -> Self {
        Self {
            location_request: LocationRequest::default(),
            fallback_to_default: defaults::FALLBACK_TO_DEFAULT,
            ask_for_google_play_services: defaults::ASK_FOR_GP_SERVICES,
            ask_for_settings_api: defaults::ASK_FOR_SETTINGS_API,
            fail_on_settings_api_suspended: defaults::FAIL_ON_SETTINGS_API_SUSPENDED,
            ignore_last_known_location: defaults::IGNORE_LAST_KNOWN_LOCATION,
            wait_period: defaults::WAIT_PERIOD,
        }
    }
}

impl GooglePlayServicesConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location_request(&mut self, request: LocationRequest) -> &mut Self {
        self.location_request = request;
        self
    }

    pub fn fallback_to_default(&mut self, fallback: bool) -> &mut Self {
        self.fallback_to_default = fallback;
        self
    }

    pub fn ask_for_google_play_services(&mut self, ask: bool) -> &mut Self {
        self.ask_for_google_play_services = ask;
        self
    }

    pub fn ask_for_settings_api(&mut self, ask: bool) -> &mut Self {
        self.ask_for_settings_api = ask;
        self
    }

    pub fn fail_on_settings_api_suspended(&mut self, fail: bool) -> &mut Self {
        self.fail_on_settings_api_suspended = fail;
        self
    }

    pub fn ignore_last_known_location(&mut self, ignore: bool) -> &mut Self {
        self.ignore_last_known_location = ignore;
        self
    }

    /// How long to wait on Play Services before falling back.
    pub fn wait_period(&mut self, millis: i64) -> Result<&mut Self, CoreError> {
        let millis = non_negative(millis, "wait_period", "Wait period")?;
        self.wait_period = Duration::from_millis(millis);
        Ok(self)
    }

    pub fn build(&self) -> GooglePlayServicesConfiguration {
        tracing::debug!(
            priority = %self.location_request.priority,
            wait = ?self.wait_period,
            fallback_to_default = self.fallback_to_default,
            "built play services configuration"
        );

        GooglePlayServicesConfiguration {
            location_request: self.location_request,
            fallback_to_default: self.fallback_to_default,
            ask_for_google_play_services: self.ask_for_google_play_services,
            ask_for_settings_api: self.ask_for_settings_api,
            fail_on_settings_api_suspended: self.fail_on_settings_api_suspended,
            ignore_last_known_location: self.ignore_last_known_location,
            wait_period: self.wait_period,
        }
    }
}
