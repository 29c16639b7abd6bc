// WasteDesk - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Every value is checked against the limits in
// util/constants.rs; bad values fall back to defaults with a warning.
//
// Runs before the tracing subscriber exists (the log level comes from this
// file), so nothing here logs. Outcomes are returned for main to report.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for WasteDesk configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/wastedesk/ or %APPDATA%\WasteDesk\config\)
    pub config_dir: PathBuf,

    /// True when no platform directory was found and `.` is used instead.
    pub is_fallback: bool,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => Self {
                config_dir: proj_dirs.config_dir().to_path_buf(),
                is_fallback: false,
            },
            None => Self {
                config_dir: PathBuf::from("."),
                is_fallback: true,
            },
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so an older binary can read a newer file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub list: ListSection,
    pub summary: SummarySection,
    pub data: DataSection,
    pub logging: LoggingSection,
}

/// `[list]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ListSection {
    /// Rows per page in every list view.
    pub page_size: Option<usize>,
}

/// `[summary]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SummarySection {
    /// Collectors listed under "recent collectors".
    pub recent_collectors: Option<usize>,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// JSON dataset file. Relative paths resolve against the config directory.
    pub path: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub page_size: usize,
    pub recent_collectors: usize,

    /// Dataset file; `None` means the built-in sample data.
    pub data_path: Option<PathBuf>,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: constants::DEFAULT_PAGE_SIZE,
            recent_collectors: constants::DEFAULT_RECENT_COLLECTORS,
            data_path: None,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from `config_dir`.
///
/// Returns the validated config and a list of non-fatal warnings. A missing
/// file yields defaults with no warnings (first run). An unreadable or
/// unparseable file yields defaults plus one warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        return (AppConfig::default(), Vec::new());
    }

    match read_raw_config(&config_path) {
        Ok(raw) => validate_config(raw, config_dir),
        Err(e) => (AppConfig::default(), vec![format!("{e}. Using defaults.")]),
    }
}

fn read_raw_config(config_path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })
}

/// Check each raw value against its limits, accumulating every problem.
pub fn validate_config(raw: RawConfig, config_dir: &Path) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- List: page_size --
    if let Some(size) = raw.list.page_size {
        if (constants::MIN_PAGE_SIZE..=constants::MAX_PAGE_SIZE).contains(&size) {
            config.page_size = size;
        } else {
            warnings.push(out_of_range(
                "[list] page_size",
                size,
                format!(
                    "{}-{} (using default {})",
                    constants::MIN_PAGE_SIZE,
                    constants::MAX_PAGE_SIZE,
                    constants::DEFAULT_PAGE_SIZE
                ),
            ));
        }
    }

    // -- Summary: recent_collectors --
    if let Some(count) = raw.summary.recent_collectors {
        if count <= constants::MAX_RECENT_COLLECTORS {
            config.recent_collectors = count;
        } else {
            warnings.push(out_of_range(
                "[summary] recent_collectors",
                count,
                format!(
                    "0-{} (using default {})",
                    constants::MAX_RECENT_COLLECTORS,
                    constants::DEFAULT_RECENT_COLLECTORS
                ),
            ));
        }
    }

    // -- Data: path --
    if let Some(path) = raw.data.path.filter(|p| !p.trim().is_empty()) {
        let path = PathBuf::from(path.trim());
        config.data_path = Some(if path.is_relative() {
            config_dir.join(path)
        } else {
            path
        });
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let lower = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
            config.log_level = Some(lower);
        } else {
            warnings.push(out_of_range(
                "[logging] level",
                level,
                format!(
                    "one of {} (using default {})",
                    constants::VALID_LOG_LEVELS.join(", "),
                    constants::DEFAULT_LOG_LEVEL
                ),
            ));
        }
    }

    (config, warnings)
}

fn out_of_range(field: &str, value: impl ToString, expected: String) -> String {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
[list]
page_size = 20

[summary]
recent_collectors = 3

[data]
path = "records.json"

[logging]
level = "DEBUG"

[future]
unknown = true
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.recent_collectors, 3);
        assert_eq!(config.data_path, Some(dir.path().join("records.json")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[list]\npage_size = 0\n[summary]\nrecent_collectors = 999\n[logging]\nlevel = \"loud\"\n",
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("page_size"));
        assert_eq!(config.page_size, constants::DEFAULT_PAGE_SIZE);
        assert_eq!(config.recent_collectors, constants::DEFAULT_RECENT_COLLECTORS);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_unparseable_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[list\npage_size = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Using defaults"));
    }

    #[test]
    fn test_absolute_data_path_kept() {
        let raw = RawConfig {
            data: DataSection {
                path: Some("/srv/wastedesk/data.json".to_string()),
            },
            ..RawConfig::default()
        };
        let (config, _) = validate_config(raw, Path::new("/etc/wastedesk"));
        assert_eq!(config.data_path, Some(PathBuf::from("/srv/wastedesk/data.json")));
    }

    #[test]
    fn test_resolve_reports_fallback() {
        let paths = PlatformPaths::resolve();
        if paths.is_fallback {
            assert_eq!(paths.config_dir, PathBuf::from("."));
        } else {
            assert!(paths.config_dir.is_absolute());
        }
    }
}
