// ── Default (built-in) provider configuration ──
//
// Timing and accuracy parameters for the GPS and Network providers.
// Every numeric field is validated on assignment, so `build()` cannot fail.

use std::time::Duration;

use crate::defaults;
use crate::error::{CoreError, non_negative};
use crate::provider::ProviderSource;

/// Immutable timing/accuracy parameters for the GPS and Network providers.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultProviderConfiguration {
    required_time_interval: Duration,
    required_distance_interval: u64,
    acceptable_accuracy: f32,
    acceptable_time_period: Duration,
    gps_wait_period: Duration,
    network_wait_period: Duration,
    gps_message: String,
}

impl DefaultProviderConfiguration {
    pub fn builder() -> DefaultProviderConfigurationBuilder {
        DefaultProviderConfigurationBuilder::default()
    }

    /// Update period while tracking. Only used when `keep_tracking` is set.
    pub fn required_time_interval(&self) -> Duration {
        self.required_time_interval
    }

    /// Minimum movement in meters between tracking updates.
    pub fn required_distance_interval(&self) -> u64 {
        self.required_distance_interval
    }

    /// Accuracy in meters a fix must reach. Smaller is stricter.
    pub fn acceptable_accuracy(&self) -> f32 {
        self.acceptable_accuracy
    }

    /// How old a fix may be and still count as usable.
    pub fn acceptable_time_period(&self) -> Duration {
        self.acceptable_time_period
    }

    pub fn gps_wait_period(&self) -> Duration {
        self.gps_wait_period
    }

    pub fn network_wait_period(&self) -> Duration {
        self.network_wait_period
    }

    pub fn gps_message(&self) -> &str {
        &self.gps_message
    }

    /// The user is prompted to enable GPS only when a message is configured.
    pub fn ask_for_gps_enable(&self) -> bool {
        !self.gps_message.is_empty()
    }
}

impl Default for DefaultProviderConfiguration {
    fn default() -> Self {
        DefaultProviderConfigurationBuilder::default().build()
    }
}

// ── Builder ─────────────────────────────────────────────────────────

/// Accumulates validated parameters for a [`DefaultProviderConfiguration`].
///
/// Seeded from [`crate::defaults`]. Setters that can fail leave the
/// builder unchanged on error.
#[derive(Debug, Clone)]
pub struct DefaultProviderConfigurationBuilder {
    required_time_interval: Duration,
    required_distance_interval: u64,
    acceptable_accuracy: f32,
    acceptable_time_period: Duration,
    gps_wait_period: Duration,
    network_wait_period: Duration,
    gps_message: String,
}

impl Default for DefaultProviderConfigurationBuilder {
    fn default() -> Self {
        Self {
            required_time_interval: defaults::LOCATION_INTERVAL,
            required_distance_interval: defaults::LOCATION_DISTANCE_INTERVAL,
            acceptable_accuracy: defaults::MIN_ACCURACY,
            acceptable_time_period: defaults::TIME_PERIOD,
            gps_wait_period: defaults::WAIT_PERIOD,
            network_wait_period: defaults::WAIT_PERIOD,
            gps_message: defaults::EMPTY_STRING.to_owned(),
        }
    }
}

impl DefaultProviderConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required_time_interval(&mut self, millis: i64) -> Result<&mut Self, CoreError> {
        let millis = non_negative(millis, "required_time_interval", "Required time interval")?;
        self.required_time_interval = Duration::from_millis(millis);
        Ok(self)
    }

    pub fn required_distance_interval(&mut self, meters: i64) -> Result<&mut Self, CoreError> {
        self.required_distance_interval = non_negative(
            meters,
            "required_distance_interval",
            "Required distance interval",
        )?;
        Ok(self)
    }

    pub fn acceptable_accuracy(&mut self, meters: f32) -> Result<&mut Self, CoreError> {
        // NaN compares false and is let through; only negatives are rejected.
        if meters < 0.0 {
            return Err(CoreError::negative(
                "acceptable_accuracy",
                "Acceptable accuracy",
            ));
        }
        self.acceptable_accuracy = meters;
        Ok(self)
    }

    pub fn acceptable_time_period(&mut self, millis: i64) -> Result<&mut Self, CoreError> {
        let millis = non_negative(millis, "acceptable_time_period", "Acceptable time period")?;
        self.acceptable_time_period = Duration::from_millis(millis);
        Ok(self)
    }

    /// Message shown when asking the user to turn GPS on. Empty disables the prompt.
    pub fn gps_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.gps_message = message.into();
        self
    }

    /// Set how long to wait on `source` before switching to the next provider.
    ///
    /// `DefaultProviders` sets GPS and Network together and `None` is
    /// accepted and ignored. Play Services has its own wait period on
    /// [`crate::GooglePlayServicesConfiguration`], so passing
    /// `GooglePlayServices` here is an [`CoreError::IllegalState`].
    pub fn set_wait_period(
        &mut self,
        source: ProviderSource,
        millis: i64,
    ) -> Result<&mut Self, CoreError> {
        let period = Duration::from_millis(non_negative(millis, "wait_period", "Wait period")?);

        match source {
            ProviderSource::GooglePlayServices => {
                return Err(CoreError::illegal_state(
                    "GooglePlayServices waiting time period should be set on \
                     GooglePlayServicesConfiguration",
                ));
            }
            ProviderSource::Network => self.network_wait_period = period,
            ProviderSource::Gps => self.gps_wait_period = period,
            ProviderSource::DefaultProviders => {
                self.gps_wait_period = period;
                self.network_wait_period = period;
            }
            ProviderSource::None => {
                tracing::trace!(millis, "wait period for provider source `none` ignored");
            }
        }
        Ok(self)
    }

    pub fn build(&self) -> DefaultProviderConfiguration {
        tracing::debug!(
            gps_wait = ?self.gps_wait_period,
            network_wait = ?self.network_wait_period,
            ask_for_gps_enable = !self.gps_message.is_empty(),
            "built default provider configuration"
        );

        DefaultProviderConfiguration {
            required_time_interval: self.required_time_interval,
            required_distance_interval: self.required_distance_interval,
            acceptable_accuracy: self.acceptable_accuracy,
            acceptable_time_period: self.acceptable_time_period,
            gps_wait_period: self.gps_wait_period,
            network_wait_period: self.network_wait_period,
            gps_message: self.gps_message.clone(),
        }
    }
}
