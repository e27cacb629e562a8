//! Stepline CLI entry point.

use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use stepline::cli::{Cli, CommandDispatcher, Commands, EngineSetup};
use stepline::config::EngineEnvironment;
use stepline::runner::{open_run_log, RUN_LOG_MAX_BYTES};
use stepline::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` or `--verbose` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. `LOG_LEVEL` from the environment or the `.env` file
/// 4. Default is INFO
///
/// An unusable `LOG_LEVEL` falls back to INFO and is reported once the
/// subscriber is up. When `run_log` is given, events are also appended to it
/// without colors.
fn init_tracing(debug: bool, log_level: Option<String>, run_log: Option<File>) {
    let mut rejected = None;
    let filter = if debug {
        EnvFilter::new("stepline=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            log_level
                .and_then(|level| match EnvFilter::try_new(format!("stepline={}", level)) {
                    Ok(filter) => Some(filter),
                    Err(e) => {
                        rejected = Some((level, e));
                        None
                    }
                })
                .unwrap_or_else(|| EnvFilter::new("stepline=info"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(run_log.map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
        }))
        .with(filter)
        .init();

    if let Some((level, e)) = rejected {
        tracing::warn!("Ignoring LOG_LEVEL={}: {}; using info", level, e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = EngineEnvironment::load(&cli.env_file)
        .ok()
        .and_then(|env| env.log_level());
    let setup = EngineSetup::from_cli(&cli);

    // Only commands that execute the workflow keep a run log.
    let runs_workflow = matches!(
        cli.command,
        None | Some(Commands::Run(_) | Commands::Batch(_) | Commands::Interactive(_))
    );
    let mut run_log_error = None;
    let run_log = if runs_workflow {
        match setup
            .resolve_dirs()
            .and_then(|options| open_run_log(&options.output_dir, RUN_LOG_MAX_BYTES))
        {
            Ok(file) => Some(file),
            Err(e) => {
                run_log_error = Some(e);
                None
            }
        }
    } else {
        None
    };

    init_tracing(cli.debug || cli.verbose, log_level, run_log);

    if let Some(e) = run_log_error {
        tracing::warn!("Run log disabled: {}", e);
    }

    tracing::debug!("Stepline starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let output_mode = OutputMode::from_flags(cli.quiet, cli.verbose);
    let mut ui = create_ui(true, output_mode);

    let dispatcher = CommandDispatcher::new(setup);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
