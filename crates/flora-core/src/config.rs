//! Centralized configuration for the Flora library.
//!
//! Chart sizes, derived-scalar category lists, cache limits and the
//! comparison defaults live here so the dashboard and the library agree.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Plant Species Dashboard";
    pub const DEFAULT_DATA_DIR_NAME: &'static str = "competingEnrichedData";
    pub const DEFAULT_SOURCE_ID: &'static str = "sonnet-chat";
    pub const UPLOAD_SOURCE_ID: &'static str = "upload";
}

/// Summary statistics sizing and category rules.
pub struct DashboardConfig;

impl DashboardConfig {
    /// Entries kept verbatim before collapsing into "Other".
    pub const TOP_N_DEFAULT: usize = 9;
    pub const ORDER_DISTRIBUTION_TOP_N: usize = 12;
    pub const FAMILY_LEADERBOARD_SIZE: usize = 20;
    pub const TOP_GEOGRAPHIC: usize = 5;

    pub const OTHER_LABEL: &'static str = "Other";
    pub const UNKNOWN_ORDER: &'static str = "Unknown";

    pub const CONSERVATION_CONCERN_STATUSES: [&'static str; 2] = ["Rare", "Very rare/Endangered"];
    pub const HUMAN_INFLUENCE_HABITS: [&'static str; 2] = ["Cultivated", "Both"];
}

/// Sizes and fixed axes for the derived chart series.
pub struct ChartConfig;

impl ChartConfig {
    pub const FAMILY_BY_ORIGIN_FAMILIES: usize = 9;
    pub const FAMILY_BY_ORIGIN_ORIGINS: usize = 10;
    pub const COMMERCIAL_SOURCES: usize = 10;
    pub const GENERAL_LOCATIONS: usize = 15;
    pub const HEMISPHERE_ORDERS: usize = 10;

    pub const DEVELOPMENT_LEVELS: [&'static str; 3] = ["Low", "Moderate", "High"];
    pub const COMMERCIAL_LEVELS: [&'static str; 3] = ["None", "Limited", "Major"];
}

/// Data density comparison rules.
pub struct CompareConfig;

impl CompareConfig {
    pub const EMPTY_LABEL: &'static str = "Empty/NA";
    pub const FILLED_LABEL: &'static str = "Filled";
    /// Values treated as missing in addition to whitespace-only strings.
    pub const EMPTY_MARKERS: [&'static str; 5] = ["", "NA", "n/a", "N/A", "-"];
    /// A column gets a per-value breakdown when its distinct count is in 2..=10.
    pub const MAX_DISTRIBUTION_VALUES: usize = 10;

    pub const DEFAULT_COLUMNS: [&'static str; 13] = [
        "SPECIES",
        "LITERAL LATIN",
        "COMMON NAME",
        "COMMON GENUS NAME",
        "COMMON FAMILY NAME",
        "LIFE-FORM TYPE",
        "GROWTH FORM",
        "GEOGRAPHIC ORIGIN",
        "SPECIFIC LOCATION",
        "GENERAL LOCATION",
        "HEMISPHERE",
        "NOTES",
        "IMAGE",
    ];
}

/// Summary cache limits.
pub struct CacheSettings;

impl CacheSettings {
    pub const MAX_ENTRIES: u64 = 16;
    pub const TIME_TO_IDLE: Duration = Duration::from_secs(1800);
}
