// WasteDesk - util/logging.rs
//
// tracing subscriber setup for the CLI and the interactive browser.
//
// Verbosity sources, strongest first:
//   - RUST_LOG (full EnvFilter directive syntax)
//   - the --debug flag
//   - [logging] level in config.toml
//
// Output: stderr, so table output on stdout stays clean for piping.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Without any source the level is `info`.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .try_init();

    // A second init (e.g. from tests) keeps the first subscriber.
    if result.is_err() {
        return;
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
