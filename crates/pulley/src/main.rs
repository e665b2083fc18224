// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pulley command-line entry point.

mod exit;
mod welcome;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use pulley_config::{FileLoader, Settings, SettingsOverrides};
use pulley_core::PulleyError;
use pulley_pipeline::{Pipeline, PipelineOptions};
use pulley_report::{ConsoleSink, FileSink, Reporter, TracingSink, Verbosity};
use tracing::{debug, error};

use crate::exit::ExitCode;

/// Pulley - fetch declared packages from their sources and bundle them.
#[derive(Parser, Debug)]
#[command(name = "pulley", version, about, long_about = None)]
struct Cli {
    /// Pulleyfile to load instead of discovering one in the working directory.
    #[arg(short, long, value_name = "PATH")]
    pulleyfile: Option<PathBuf>,

    /// Bundle destination.
    #[arg(short, long, value_name = "PATH")]
    dest: Option<PathBuf>,

    /// Bundler to use, overriding the Pulleyfile.
    #[arg(short, long, value_name = "NAME")]
    bundler: Option<String>,

    /// Show more output; repeat for more.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Show no output.
    #[arg(short, long)]
    quiet: bool,

    /// Also append the report to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Disable coloured console output.
    #[arg(long)]
    no_color: bool,

    /// Stop the run when a package fails its configuration rules.
    #[arg(long)]
    halt_on_rule_failure: bool,
}

impl Cli {
    /// Flags given on the command line, as the top settings layer.
    fn overrides(&self) -> SettingsOverrides {
        let verbosity = if self.quiet {
            Some(Verbosity::Silent.level())
        } else if self.verbose > 0 {
            let level = Verbosity::Normal.level().saturating_add(self.verbose);
            Some(level.min(Verbosity::MAX.level()))
        } else {
            None
        };

        SettingsOverrides {
            destination: self.dest.clone(),
            bundler: self.bundler.clone(),
            verbosity,
            halt_on_rule_failure: self.halt_on_rule_failure.then_some(true),
            log_file: self.log_file.clone(),
            color: self.no_color.then_some(false),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let settings = match pulley_config::load_and_validate_settings(&cli.overrides()) {
        Ok(settings) => settings,
        Err(errors) => {
            pulley_config::render_errors(&errors);
            return ExitCode::settings().into();
        }
    };

    init_tracing(settings.verbosity());

    let reporter = match build_reporter(&settings) {
        Ok(reporter) => reporter,
        Err(err) => {
            eprintln!("pulley: {err}");
            return ExitCode::settings().into();
        }
    };

    welcome::print(&reporter, settings.color);
    let code = run(&cli, &settings, &reporter).await;
    code.report(&reporter);
    code.into()
}

async fn run(cli: &Cli, settings: &Settings, reporter: &Reporter) -> ExitCode {
    let registry = match pulley_plugin::builtin_registry() {
        Ok(registry) => registry,
        Err(err) => return fail(&err, reporter),
    };
    debug!(
        sources = ?registry.source_names(),
        bundlers = ?registry.bundler_names(),
        "plugin registry ready"
    );

    let loader = FileLoader::new(cli.pulleyfile.clone());
    let pipeline = Pipeline::new(&registry, reporter, PipelineOptions::from(settings));

    match pipeline.run(&loader).await {
        Ok(summary) => {
            debug!(packages = summary.packages.len(), bundler = %summary.bundler, "run complete");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err, reporter),
    }
}

fn fail(err: &PulleyError, reporter: &Reporter) -> ExitCode {
    error!(error = %err, "run failed");
    reporter.error(err.to_string());

    if let PulleyError::SchemaValidation { violations } = err {
        if reporter.verbosity() == Verbosity::Debug {
            pulley_config::render_errors(&pulley_config::violations_to_config_errors(violations));
        }
    }

    ExitCode::for_error(err)
}

/// Build the reporting context for a run: console, optional log file, and
/// forwarding into `tracing` when `RUST_LOG` asks for it.
fn build_reporter(settings: &Settings) -> std::io::Result<Reporter> {
    let mut reporter = Reporter::new(settings.verbosity())
        .with_sink(ConsoleSink::detect(!settings.color));

    if let Some(path) = &settings.log_file {
        reporter.add_sink(Box::new(FileSink::open(path)?));
    }
    if std::env::var_os("RUST_LOG").is_some() {
        reporter.add_sink(Box::new(TracingSink));
    }

    Ok(reporter)
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins; otherwise the level follows the run verbosity.
fn init_tracing(verbosity: Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pulley={},warn", verbosity.tracing_directive()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
