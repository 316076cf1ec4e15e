// locman-core: immutable, validated configuration for location acquisition.
//
// Builders accumulate and validate settings; `build()` hands back an
// immutable value that can be shared freely across threads. Nothing in
// this crate performs I/O or acquires a location.

pub mod default_provider;
pub mod defaults;
pub mod error;
pub mod location;
pub mod permission;
pub mod play_services;
pub mod provider;

// ── Primary re-exports ──────────────────────────────────────────────
pub use default_provider::{DefaultProviderConfiguration, DefaultProviderConfigurationBuilder};
pub use error::CoreError;
pub use location::{LocationConfiguration, LocationConfigurationBuilder};
pub use permission::{
    DefaultPermissionProvider, LocationPermission, PermissionConfiguration,
    PermissionConfigurationBuilder, PermissionProvider, StubPermissionProvider,
};
pub use play_services::{
    GooglePlayServicesConfiguration, GooglePlayServicesConfigurationBuilder, LocationPriority,
    LocationRequest,
};
pub use provider::ProviderSource;
