// ── Permission configuration ──
//
// Which runtime permissions a location request needs and the policy that
// decides whether to ask the user for them. The policy is a capability
// (`PermissionProvider`) chosen at configuration time.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::defaults;
use crate::error::CoreError;

/// A location-related runtime permission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationPermission {
    AccessCoarseLocation,
    AccessFineLocation,
    AccessBackgroundLocation,
}

impl LocationPermission {
    /// Fully qualified platform permission name.
    pub fn android_name(self) -> &'static str {
        match self {
            Self::AccessCoarseLocation => "android.permission.ACCESS_COARSE_LOCATION",
            Self::AccessFineLocation => "android.permission.ACCESS_FINE_LOCATION",
            Self::AccessBackgroundLocation => "android.permission.ACCESS_BACKGROUND_LOCATION",
        }
    }
}

// ── Providers ───────────────────────────────────────────────────────

/// Decides whether permissions get requested from the user.
pub trait PermissionProvider: fmt::Debug + Send + Sync {
    /// Short identifier, used in logs and rendered output.
    fn name(&self) -> &str;

    /// Given the permissions that are not granted yet, should the user be asked?
    fn should_request(&self, missing: &[LocationPermission]) -> bool;
}

/// Asks the user whenever a required permission is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPermissionProvider;

impl DefaultPermissionProvider {
    pub const NAME: &'static str = "default";
}

impl PermissionProvider for DefaultPermissionProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn should_request(&self, missing: &[LocationPermission]) -> bool {
        !missing.is_empty()
    }
}

/// Never asks. Ungranted permissions make location acquisition fail silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPermissionProvider;

impl StubPermissionProvider {
    pub const NAME: &'static str = "stub";
}

impl PermissionProvider for StubPermissionProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn should_request(&self, _missing: &[LocationPermission]) -> bool {
        false
    }
}

// ── Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PermissionConfiguration {
    provider: Arc<dyn PermissionProvider>,
    required_permissions: Vec<LocationPermission>,
    rationale_message: String,
}

impl PermissionConfiguration {
    pub fn builder() -> PermissionConfigurationBuilder {
        PermissionConfigurationBuilder::default()
    }

    /// Configuration that never requests anything from the user.
    pub fn stub() -> Self {
        Self::builder()
            .permission_provider(StubPermissionProvider)
            .build()
    }

    pub fn provider(&self) -> &Arc<dyn PermissionProvider> {
        &self.provider
    }

    pub fn required_permissions(&self) -> &[LocationPermission] {
        &self.required_permissions
    }

    /// Text explaining why the permissions are needed. Empty when unset.
    pub fn rationale_message(&self) -> &str {
        &self.rationale_message
    }

    /// Required permissions absent from `granted`, in declaration order.
    pub fn missing_permissions(&self, granted: &[LocationPermission]) -> Vec<LocationPermission> {
        self.required_permissions
            .iter()
            .copied()
            .filter(|p| !granted.contains(p))
            .collect()
    }

    /// Whether the configured provider would prompt the user given `granted`.
    pub fn will_request(&self, granted: &[LocationPermission]) -> bool {
        let missing = self.missing_permissions(granted);
        self.provider.should_request(&missing)
    }
}

// ── Builder ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PermissionConfigurationBuilder {
    provider: Option<Arc<dyn PermissionProvider>>,
    required_permissions: Vec<LocationPermission>,
    rationale_message: String,
}

impl Default for PermissionConfigurationBuilder {
    fn default() -> Self {
        Self {
            provider: None,
            required_permissions: defaults::LOCATION_PERMISSIONS.to_vec(),
            rationale_message: defaults::EMPTY_STRING.to_owned(),
        }
    }
}

impl PermissionConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rationale_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.rationale_message = message.into();
        self
    }

    /// Replace the required permission set. Duplicates are dropped.
    pub fn required_permissions(
        &mut self,
        permissions: impl IntoIterator<Item = LocationPermission>,
    ) -> Result<&mut Self, CoreError> {
        let mut unique: Vec<LocationPermission> = Vec::new();
        for permission in permissions {
            if !unique.contains(&permission) {
                unique.push(permission);
            }
        }
        if unique.is_empty() {
            return Err(CoreError::InvalidArgument {
                field: "required_permissions",
                reason: "Required permissions cannot be empty".into(),
            });
        }
        self.required_permissions = unique;
        Ok(self)
    }

    pub fn permission_provider<P>(&mut self, provider: P) -> &mut Self
    where
        P: PermissionProvider + 'static,
    {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Share an existing provider instance.
    pub fn shared_permission_provider(&mut self, provider: Arc<dyn PermissionProvider>) -> &mut Self {
        self.provider = Some(provider);
        self
    }

    /// Falls back to [`DefaultPermissionProvider`] when no provider was set.
    pub fn build(&self) -> PermissionConfiguration {
        let provider = self
            .provider
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultPermissionProvider));

        tracing::debug!(
            provider = provider.name(),
            permissions = ?self.required_permissions,
            "built permission configuration"
        );

        PermissionConfiguration {
            provider,
            required_permissions: self.required_permissions.clone(),
            rationale_message: self.rationale_message.clone(),
        }
    }
}
