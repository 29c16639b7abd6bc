// WasteDesk - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "WasteDesk";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "WasteDesk";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Pagination
// =============================================================================

/// Rows shown per page when neither config nor CLI sets a page size.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Smallest accepted page size. Page size must be positive.
pub const MIN_PAGE_SIZE: usize = 1;

/// Largest accepted page size (keeps a single page readable in a terminal).
pub const MAX_PAGE_SIZE: usize = 500;

// =============================================================================
// Filters
// =============================================================================

/// Raw filter inputs that mean "no constraint" for every filter kind.
pub const ANY_FILTER_TOKENS: &[&str] = &["", "*"];

/// Extra "no constraint" token accepted by choice filters ("All statuses").
pub const ALL_CHOICE_TOKEN: &str = "all";

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 1_024;

// =============================================================================
// Zones
// =============================================================================

/// Utilization (percent) at or above which a zone is in the high band.
pub const UTILIZATION_HIGH_THRESHOLD: u8 = 90;

/// Utilization (percent) at or above which a zone is in the medium band.
pub const UTILIZATION_MEDIUM_THRESHOLD: u8 = 70;

/// Upper bound of a zone's utilization percentage.
pub const MAX_UTILIZATION: u8 = 100;

// =============================================================================
// Dashboard
// =============================================================================

/// Number of collectors shown in the "recent collectors" summary block.
pub const DEFAULT_RECENT_COLLECTORS: usize = 5;

/// Upper bound for the configurable recent-collectors count.
pub const MAX_RECENT_COLLECTORS: usize = 50;

/// Maximum number of action notices retained in the history.
pub const MAX_NOTICES: usize = 100;

// =============================================================================
// Forms
// =============================================================================

/// Minimum length of a request address street.
pub const MIN_STREET_LENGTH: usize = 3;

/// Minimum length of a request address city.
pub const MIN_CITY_LENGTH: usize = 2;

/// Pickup time given to requests created through the wizard (hour, minute).
pub const DEFAULT_PICKUP_TIME: (u32, u32) = (10, 0);

pub const MIN_COLLECTOR_NAME_LENGTH: usize = 2;

/// Minimum phone number length, counting every character typed.
pub const MIN_PHONE_LENGTH: usize = 10;

// =============================================================================
// Dataset files
// =============================================================================

/// Maximum size of a JSON dataset file in bytes.
pub const MAX_DATASET_FILE_SIZE: u64 = 8 * 1024 * 1024; // 8 MB

/// Maximum number of records accepted per view from a dataset file.
pub const MAX_RECORDS_PER_VIEW: usize = 100_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
