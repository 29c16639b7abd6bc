// WasteDesk - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading, then logging initialisation (debug mode support),
//    then reporting what the config load found
// 3. Dataset loading (JSON file or built-in sample)
// 4. Dispatch to one-shot commands or the interactive browser

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use wastedesk::app::command::split_filter_arg;
use wastedesk::app::dataset;
use wastedesk::app::state::{DashboardState, ViewSettings};
use wastedesk::core::export::ExportFormat;
use wastedesk::core::model::ViewKind;
use wastedesk::platform::config::{self, PlatformPaths};
use wastedesk::ui::{render, shell};
use wastedesk::util::constants;
use wastedesk::util::error::{CommandError, ExportError, WasteDeskError};

/// WasteDesk: filter and page through waste-collection zones, collectors,
/// and pickup requests.
#[derive(Parser, Debug)]
#[command(name = "wastedesk", version, about)]
struct Cli {
    /// JSON dataset file (overrides `[data] path`; default is built-in sample data).
    #[arg(long = "data", global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Directory holding config.toml (default: platform config directory).
    #[arg(long = "config-dir", global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of a view.
    List {
        #[arg(value_enum)]
        view: ViewArg,

        /// Filter as NAME=VALUE; repeatable.
        #[arg(short = 'f', long = "filter", value_name = "NAME=VALUE")]
        filters: Vec<String>,

        /// Page to show (clamped to the last page).
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<usize>,
    },

    /// List the filters a view offers.
    Filters {
        #[arg(value_enum)]
        view: ViewArg,
    },

    /// Write every record that passes the filters to a file.
    Export {
        #[arg(value_enum)]
        view: ViewArg,

        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: PathBuf,

        /// Filter as NAME=VALUE; repeatable.
        #[arg(short = 'f', long = "filter", value_name = "NAME=VALUE")]
        filters: Vec<String>,
    },

    /// Show dashboard totals and recent collectors.
    Summary,

    /// Interactive browser on stdin (type 'help' for commands).
    Browse {
        #[arg(value_enum, default_value_t = ViewArg::Zones)]
        view: ViewArg,

        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Zones,
    Collectors,
    Requests,
}

impl From<ViewArg> for ViewKind {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Zones => ViewKind::Zones,
            ViewArg::Collectors => ViewKind::Collectors,
            ViewArg::Requests => ViewKind::Requests,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number"))?;
    if (constants::MIN_PAGE_SIZE..=constants::MAX_PAGE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "page size must be between {} and {}",
            constants::MIN_PAGE_SIZE,
            constants::MAX_PAGE_SIZE
        ))
    }
}

fn output_error(source: io::Error) -> WasteDeskError {
    WasteDeskError::Io {
        operation: "writing output",
        source,
    }
}

/// Apply `NAME=VALUE` arguments to one view.
fn apply_filter_args(
    state: &mut DashboardState,
    view: ViewKind,
    args: &[String],
) -> Result<(), WasteDeskError> {
    for arg in args {
        let (name, value) = split_filter_arg(arg);
        if name.is_empty() {
            return Err(CommandError::MissingArgument {
                command: "--filter",
                argument: "filter name",
            }
            .into());
        }
        state.view_mut(view).set_filter_input(name, value)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), WasteDeskError> {
    // The log level lives in config.toml, so the config is read before the
    // subscriber exists and its outcome is logged afterwards.
    let (config_dir, dir_is_fallback) = match cli.config_dir.clone() {
        Some(dir) => (dir, false),
        None => {
            let paths = PlatformPaths::resolve();
            (paths.config_dir, paths.is_fallback)
        }
    };
    let (app_config, config_warnings) = config::load_config(&config_dir);

    wastedesk::util::logging::init(cli.debug, app_config.log_level.as_deref());
    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "WasteDesk starting"
    );
    if dir_is_fallback {
        tracing::warn!("Could not determine platform directories, using current directory");
    }
    tracing::debug!(
        page_size = app_config.page_size,
        recent_collectors = app_config.recent_collectors,
        data_path = ?app_config.data_path,
        "Configuration loaded"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config problem");
        eprintln!("Warning: {warning}");
    }

    let data_path = cli.data.clone().or(app_config.data_path.clone());
    let data = dataset::load_or_sample(data_path.as_deref())?;

    let page_size_override = match &cli.command {
        Commands::List { page_size, .. } | Commands::Browse { page_size, .. } => *page_size,
        _ => None,
    };
    let settings = ViewSettings {
        page_size: page_size_override.unwrap_or(app_config.page_size),
        recent_collectors: app_config.recent_collectors,
    };
    let mut state = DashboardState::new(data, settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List {
            view,
            filters,
            page,
            ..
        } => {
            let view = ViewKind::from(view);
            apply_filter_args(&mut state, view, &filters)?;
            state.view_mut(view).change_page(page);
            render::render_table(&mut out, &state.view(view).table()).map_err(output_error)?;
        }
        Commands::Filters { view } => {
            let view = ViewKind::from(view);
            render::render_filters(&mut out, view, &state.view(view).filter_catalog())
                .map_err(output_error)?;
        }
        Commands::Export {
            view,
            format,
            output,
            filters,
        } => {
            let view = ViewKind::from(view);
            apply_filter_args(&mut state, view, &filters)?;

            let file = std::fs::File::create(&output).map_err(|e| ExportError::Io {
                path: output.clone(),
                source: e,
            })?;
            let mut writer = BufWriter::new(file);
            let count =
                state
                    .view(view)
                    .export_filtered(format.into(), &mut writer, &output)?;
            writer.flush().map_err(|e| ExportError::Io {
                path: output.clone(),
                source: e,
            })?;
            writeln!(out, "Exported {count} {view} to {}", output.display())
                .map_err(output_error)?;
        }
        Commands::Summary => {
            render::render_summary(&mut out, &state.summary(), state.recent_collectors())
                .map_err(output_error)?;
        }
        Commands::Browse { view, .. } => {
            let stdin = io::stdin();
            shell::run(&mut state, view.into(), stdin.lock(), &mut out)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "WasteDesk failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "wastedesk",
            "list",
            "zones",
            "-f",
            "utilization=>=90",
            "--page-size",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                filters, page_size, ..
            } => {
                assert_eq!(filters, vec!["utilization=>=90".to_string()]);
                assert_eq!(page_size, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(parse_page_size("5"), Ok(5));
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("501").is_err());
        assert!(parse_page_size("ten").is_err());
    }
}
