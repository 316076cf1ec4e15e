// ── Defaults table ──
//
// Initial values every builder is seeded with. Builders read these
// constants directly; nothing here is computed at runtime.

use std::time::Duration;

use crate::permission::LocationPermission;
use crate::play_services::LocationPriority;

pub const SECOND: Duration = Duration::from_secs(1);
pub const MINUTE: Duration = Duration::from_secs(60);

/// Update period while tracking with the default providers.
pub const LOCATION_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// Minimum movement (meters) between tracking updates.
pub const LOCATION_DISTANCE_INTERVAL: u64 = 0;
/// Accuracy (meters) a fix must reach to be accepted.
pub const MIN_ACCURACY: f32 = 5.0;
/// How old a cached fix may be and still count as usable.
pub const TIME_PERIOD: Duration = Duration::from_secs(5 * 60);
/// Budget for a single provider before falling back to the next one.
pub const WAIT_PERIOD: Duration = Duration::from_secs(20);
pub const EMPTY_STRING: &str = "";
pub const KEEP_TRACKING: bool = false;

pub const FALLBACK_TO_DEFAULT: bool = true;
pub const ASK_FOR_GP_SERVICES: bool = false;
pub const ASK_FOR_SETTINGS_API: bool = true;
pub const FAIL_ON_SETTINGS_API_SUSPENDED: bool = false;
pub const IGNORE_LAST_KNOWN_LOCATION: bool = false;

pub const LOCATION_PRIORITY: LocationPriority = LocationPriority::HighAccuracy;
pub const LOCATION_FASTEST_INTERVAL: Duration = MINUTE;

pub const LOCATION_PERMISSIONS: &[LocationPermission] = &[
    LocationPermission::AccessCoarseLocation,
    LocationPermission::AccessFineLocation,
];
