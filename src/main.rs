use clap::Parser;
use std::process::ExitCode;
use std::sync::Mutex;
use studentkit::cli::{Cli, Commands, report_command, walkthrough_command};
use studentkit::config::{ReportConfig, WalkthroughConfig};
use studentkit::logging;
use studentkit::util::prompt::StdinPrompt;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Cli::parse();

    let log_file = match args.log_file.as_deref().map(logging::create_log_file) {
        Some(Ok(file)) => Some(file),
        Some(Err(e)) => {
            eprintln!("Failed to create log file: {e}");
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(log_file.map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(EnvFilter::new("debug"))
        }))
        .init();

    run(args.cmd)
}

fn run(cmd: Commands) -> ExitCode {
    match cmd {
        Commands::Report {
            input,
            output,
            on_invalid,
            strict,
        } => {
            let config = ReportConfig::new(input, output).with_policy(on_invalid);
            match report_command(&config) {
                Ok(outcome) => {
                    info!("{} rows written", outcome.rows_written);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{}", e);
                    if strict {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::SUCCESS
                    }
                }
            }
        }
        Commands::Walkthrough { folder, name_count } => {
            let config = WalkthroughConfig::new(folder, name_count);
            match walkthrough_command(&config, StdinPrompt) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
