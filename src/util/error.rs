// WasteDesk - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// List operations themselves never fail; these errors cover user input,
// dataset loading, dashboard actions and export. Config problems are
// reported as warnings and never abort a run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all WasteDesk operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum WasteDeskError {
    /// A filter name or value was rejected.
    Filter(FilterError),

    /// Dataset loading or validation failed.
    Data(DataError),

    /// A dashboard action (add, delete, accept, reject) was refused.
    Action(ActionError),

    /// Export operation failed.
    Export(ExportError),

    /// An interactive command could not be parsed.
    Command(CommandError),

    /// I/O error on the terminal streams.
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for WasteDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Data(e) => write!(f, "Dataset error: {e}"),
            Self::Action(e) => write!(f, "Action failed: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Command(e) => write!(f, "Command error: {e}"),
            Self::Io { operation, source } => {
                write!(f, "I/O error during {operation}: {source}")
            }
        }
    }
}

impl std::error::Error for WasteDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(e) => Some(e),
            Self::Data(e) => Some(e),
            Self::Action(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Command(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors raised while turning user input into a filter selection.
#[derive(Debug)]
pub enum FilterError {
    /// The view has no filter with this name.
    UnknownFilter {
        view: &'static str,
        name: String,
        available: Vec<&'static str>,
    },

    /// A choice filter was given a token outside its option list.
    UnknownOption {
        filter: String,
        value: String,
        options: &'static [&'static str],
    },

    /// A range filter input could not be parsed.
    InvalidRange {
        filter: String,
        input: String,
        reason: &'static str,
    },

    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// User-provided regex exceeds the maximum allowed length.
    PatternTooLong { length: usize, max_length: usize },

    /// The value kind does not fit the filter kind (e.g. a range for a search).
    ValueMismatch {
        filter: String,
        expected: &'static str,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFilter {
                view,
                name,
                available,
            } => write!(
                f,
                "The {view} view has no filter '{name}'. Available: {}",
                available.join(", ")
            ),
            Self::UnknownOption {
                filter,
                value,
                options,
            } => write!(
                f,
                "'{value}' is not a valid option for '{filter}'. Expected one of: {}",
                options.join(", ")
            ),
            Self::InvalidRange {
                filter,
                input,
                reason,
            } => write!(f, "Invalid range '{input}' for '{filter}': {reason}"),
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid filter regex '{pattern}': {source}")
            }
            Self::PatternTooLong { length, max_length } => write!(
                f,
                "Filter regex is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::ValueMismatch { filter, expected } => {
                write!(f, "Filter '{filter}' expects {expected}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FilterError> for WasteDeskError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Field constraints
// ---------------------------------------------------------------------------

/// A field constraint violated by a loaded record or by form input.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIssue {
    /// A required text field is blank.
    EmptyField { field: &'static str },

    /// A text field is shorter than its minimum length.
    TooShort { field: &'static str, min: usize },

    /// Zone utilization above the percentage cap.
    UtilizationTooHigh { value: u8, max: u8 },

    /// A stored weight is negative or not a number.
    NegativeWeight { value: f64 },

    /// A weight entered for a new request or collected item must be above zero.
    NotPositive { field: &'static str, value: f64 },

    InvalidEmail { value: String },

    /// A value outside a fixed token list.
    UnknownValue {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} is empty"),
            Self::TooShort { field, min } => {
                write!(f, "{field} must be at least {min} characters")
            }
            Self::UtilizationTooHigh { value, max } => {
                write!(f, "utilization {value} exceeds {max}")
            }
            Self::NegativeWeight { value } => {
                write!(f, "garbage weight {value} must be a non-negative number")
            }
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be greater than 0, got {value}")
            }
            Self::InvalidEmail { value } => {
                write!(f, "'{value}' is not a valid email address")
            }
            Self::UnknownValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "unknown {field} '{value}' (expected {})",
                expected.join(", ")
            ),
        }
    }
}

impl std::error::Error for RecordIssue {}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Errors related to loading a JSON dataset file.
#[derive(Debug)]
pub enum DataError {
    /// I/O error reading the dataset file.
    Io { path: PathBuf, source: io::Error },

    /// Dataset file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// JSON could not be parsed into the dataset shape.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A view holds more records than the configured maximum.
    TooManyRecords {
        view: &'static str,
        count: usize,
        max: usize,
    },

    /// Two records in the same view share an id.
    DuplicateId { view: &'static str, id: String },

    /// A record violates a field constraint.
    InvalidRecord {
        view: &'static str,
        id: String,
        issue: RecordIssue,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "I/O error reading dataset '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Dataset '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "Failed to parse dataset '{}': {source}", path.display())
            }
            Self::TooManyRecords { view, count, max } => {
                write!(f, "Dataset has {count} {view}, maximum is {max}")
            }
            Self::DuplicateId { view, id } => {
                write!(f, "Duplicate id '{id}' in {view}")
            }
            Self::InvalidRecord { view, id, issue } => {
                write!(f, "Invalid record '{id}' in {view}: {issue}")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DataError> for WasteDeskError {
    fn from(e: DataError) -> Self {
        Self::Data(e)
    }
}

// ---------------------------------------------------------------------------
// Action errors
// ---------------------------------------------------------------------------

/// Errors raised by dashboard actions.
#[derive(Debug)]
pub enum ActionError {
    /// No record with this id exists in the view.
    NotFound { view: &'static str, id: String },

    /// A zone name was empty after trimming.
    EmptyZoneName,

    /// Accept/reject was attempted on a request that is no longer pending.
    NotPending { id: String, status: &'static str },

    /// A confirmation arrived with no deletion awaiting it.
    NoPendingDelete,

    /// The action does not apply to this view.
    Unsupported {
        action: &'static str,
        view: &'static str,
    },

    /// Input for a new or edited record was rejected.
    InvalidInput(RecordIssue),

    /// A wizard step was submitted while no request form is open.
    NoRequestForm,

    /// A wizard step was submitted out of order.
    WrongFormStep {
        expected: &'static str,
        actual: &'static str,
    },

    /// A request that has been rejected or is still pending cannot take
    /// collected items.
    NotCollectable { id: String, status: &'static str },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { view, id } => write!(f, "No record '{id}' in {view}"),
            Self::EmptyZoneName => f.write_str("Zone name must not be empty"),
            Self::NotPending { id, status } => {
                write!(f, "Request #{id} is already {status}")
            }
            Self::NoPendingDelete => f.write_str("Nothing is awaiting confirmation"),
            Self::Unsupported { action, view } => {
                write!(f, "'{action}' is not available in the {view} view")
            }
            Self::InvalidInput(issue) => write!(f, "Invalid input: {issue}"),
            Self::NoRequestForm => {
                f.write_str("No request form is open. Type 'new-request' to start one")
            }
            Self::WrongFormStep { expected, actual } => {
                write!(f, "The request form is on the {actual} step, not {expected}")
            }
            Self::NotCollectable { id, status } => {
                write!(f, "Request #{id} is {status}; only accepted or completed requests take collected items")
            }
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(issue) => Some(issue),
            _ => None,
        }
    }
}

impl From<RecordIssue> for ActionError {
    fn from(issue: RecordIssue) -> Self {
        Self::InvalidInput(issue)
    }
}

impl From<ActionError> for WasteDeskError {
    fn from(e: ActionError) -> Self {
        Self::Action(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for WasteDeskError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading `config.toml`. Rendered into warning
/// text; the affected setting falls back to its default.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Errors from parsing a line typed into the interactive browser.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command.
    Unknown { command: String },

    /// A required argument was not supplied.
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// A numeric argument could not be parsed.
    InvalidNumber { command: &'static str, input: String },

    /// A date argument is not `YYYY-MM-DD`.
    InvalidDate { command: &'static str, input: String },

    /// The name does not match any view.
    UnknownView { input: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { command } => {
                write!(f, "Unknown command '{command}'. Type 'help' for a list.")
            }
            Self::MissingArgument { command, argument } => {
                write!(f, "'{command}' needs a {argument}")
            }
            Self::InvalidNumber { command, input } => {
                write!(f, "'{command}' expects a number, got '{input}'")
            }
            Self::InvalidDate { command, input } => {
                write!(f, "'{command}' expects a date as YYYY-MM-DD, got '{input}'")
            }
            Self::UnknownView { input } => write!(
                f,
                "Unknown view '{input}' (expected zones, collectors, or requests)"
            ),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<CommandError> for WasteDeskError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

/// Convenience type alias for WasteDesk results.
pub type Result<T> = std::result::Result<T, WasteDeskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_record_carries_typed_issue() {
        let err = DataError::InvalidRecord {
            view: "requests",
            id: "7".to_string(),
            issue: RecordIssue::NegativeWeight { value: -2.5 },
        };
        assert_eq!(
            err.to_string(),
            "Invalid record '7' in requests: garbage weight -2.5 must be a non-negative number"
        );
    }

    #[test]
    fn test_invalid_input_exposes_issue_as_source() {
        let err = ActionError::from(RecordIssue::TooShort {
            field: "name",
            min: 2,
        });
        assert_eq!(err.to_string(), "Invalid input: name must be at least 2 characters");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("name must be at least 2 characters"));
    }

    #[test]
    fn test_unknown_value_lists_expected_tokens() {
        let issue = RecordIssue::UnknownValue {
            field: "status",
            value: "retired".to_string(),
            expected: &["active", "inactive"],
        };
        assert_eq!(
            issue.to_string(),
            "unknown status 'retired' (expected active, inactive)"
        );
    }
}
