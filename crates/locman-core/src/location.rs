// ── Root location configuration ──
//
// Composes the provider configurations, the permission policy and the
// tracking mode into one immutable value. Sub-configurations are shared
// through `Arc` so a single instance can back many consumers.

use std::sync::Arc;

use crate::default_provider::DefaultProviderConfiguration;
use crate::defaults;
use crate::error::CoreError;
use crate::permission::PermissionConfiguration;
use crate::play_services::GooglePlayServicesConfiguration;

/// How to acquire a location: which providers to try and how to ask for
/// permissions.
///
/// At least one of the Play Services or default provider configurations is
/// always present, and the permission configuration is never missing.
#[derive(Debug, Clone)]
pub struct LocationConfiguration {
    keep_tracking: bool,
    permission_configuration: Arc<PermissionConfiguration>,
    google_play_services_configuration: Option<Arc<GooglePlayServicesConfiguration>>,
    default_provider_configuration: Option<Arc<DefaultProviderConfiguration>>,
}

impl LocationConfiguration {
    pub fn builder() -> LocationConfigurationBuilder {
        LocationConfigurationBuilder::default()
    }

    /// Continuous updates rather than a single fix.
    pub fn keep_tracking(&self) -> bool {
        self.keep_tracking
    }

    pub fn permission_configuration(&self) -> &Arc<PermissionConfiguration> {
        &self.permission_configuration
    }

    pub fn google_play_services_configuration(
        &self,
    ) -> Option<&Arc<GooglePlayServicesConfiguration>> {
        self.google_play_services_configuration.as_ref()
    }

    pub fn default_provider_configuration(&self) -> Option<&Arc<DefaultProviderConfiguration>> {
        self.default_provider_configuration.as_ref()
    }
}

// ── Builder ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LocationConfigurationBuilder {
    keep_tracking: bool,
    permission_configuration: Option<Arc<PermissionConfiguration>>,
    google_play_services_configuration: Option<Arc<GooglePlayServicesConfiguration>>,
    default_provider_configuration: Option<Arc<DefaultProviderConfiguration>>,
}

impl Default for LocationConfigurationBuilder {
    fn default() -> Self {
        Self {
            keep_tracking: defaults::KEEP_TRACKING,
            permission_configuration: None,
            google_play_services_configuration: None,
            default_provider_configuration: None,
        }
    }
}

impl LocationConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_tracking(&mut self, keep_tracking: bool) -> &mut Self {
        self.keep_tracking = keep_tracking;
        self
    }

    /// Permission request policy. Without one, no permission is ever
    /// requested and acquisition fails silently if they are not granted.
    pub fn ask_for_permission(
        &mut self,
        configuration: impl Into<Arc<PermissionConfiguration>>,
    ) -> &mut Self {
        self.permission_configuration = Some(configuration.into());
        self
    }

    /// Enables Play Services as a location source.
    pub fn use_google_play_services(
        &mut self,
        configuration: impl Into<Arc<GooglePlayServicesConfiguration>>,
    ) -> &mut Self {
        self.google_play_services_configuration = Some(configuration.into());
        self
    }

    /// Enables the GPS and Network providers as location sources.
    pub fn use_default_providers(
        &mut self,
        configuration: impl Into<Arc<DefaultProviderConfiguration>>,
    ) -> &mut Self {
        self.default_provider_configuration = Some(configuration.into());
        self
    }

    pub fn build(&self) -> Result<LocationConfiguration, CoreError> {
        if self.google_play_services_configuration.is_none()
            && self.default_provider_configuration.is_none()
        {
            return Err(CoreError::illegal_state(
                "You need to specify one of the provider configurations. \
                 Please see GooglePlayServicesConfiguration and DefaultProviderConfiguration",
            ));
        }

        let permission_configuration = if let Some(cfg) = &self.permission_configuration {
            Arc::clone(cfg)
        } else {
            tracing::debug!("no permission configuration set, permissions will not be requested");
            Arc::new(PermissionConfiguration::stub())
        };

        tracing::debug!(
            keep_tracking = self.keep_tracking,
            play_services = self.google_play_services_configuration.is_some(),
            default_providers = self.default_provider_configuration.is_some(),
            permission_provider = permission_configuration.provider().name(),
            "built location configuration"
        );

        Ok(LocationConfiguration {
            keep_tracking: self.keep_tracking,
            permission_configuration,
            google_play_services_configuration: self.google_play_services_configuration.clone(),
            default_provider_configuration: self.default_provider_configuration.clone(),
        })
    }
}
