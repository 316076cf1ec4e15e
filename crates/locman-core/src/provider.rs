// ── Provider source selector ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A candidate source for a location fix.
///
/// Only used to pick which wait period a setter touches; configurations
/// never store one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderSource {
    GooglePlayServices,
    Network,
    Gps,
    /// GPS and Network together.
    DefaultProviders,
    None,
}

impl ProviderSource {
    /// Whether this source is one of the built-in (non Play-Services) providers.
    pub fn is_default_provider(self) -> bool {
        matches!(self, Self::Network | Self::Gps | Self::DefaultProviders)
    }
}
