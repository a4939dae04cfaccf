//! Beneficiary validation CLI.

use std::io::{self, IsTerminal};

use benef_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use benef_cli::commands::{run_inspect, run_validate};
use benef_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use tracing::debug;
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{print_inspect_report, print_validate_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(error) => {
                    eprintln!("error: failed to start async runtime: {error}");
                    std::process::exit(1);
                }
            };
            match runtime.block_on(run_validate(&args)) {
                Ok(outcome) => {
                    if args.summary_json {
                        match serde_json::to_string_pretty(&outcome.report().summary) {
                            Ok(json) => println!("{json}"),
                            Err(error) => eprintln!("error: {error}"),
                        }
                    } else {
                        print_validate_report(outcome.report());
                    }
                    if outcome.exit_code() == 2 {
                        eprintln!("Nenhum resultado para exibir");
                    }
                    outcome.exit_code()
                }
                Err(error) => report_error(&error),
            }
        }
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(report) => {
                print_inspect_report(&report);
                0
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    debug!("command failed: {error:#}");
    eprintln!("error: {error}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
