use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lectio_cli::cli::{Cli, Commands};
use lectio_cli::commands::{self, normalize::NormalizeArgs};

const LOG_TARGETS: &[&str] = &[
    "lectio",
    "lectio_cli",
    "lectio_config",
    "lectio_convert",
    "lectio_core",
    "lectio_pipeline",
];

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries summaries and exports
    let level = cli.level();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        EnvFilter::new(directives.join(","))
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let succeeded = match cli.command {
        Commands::Normalize {
            code,
            source,
            output_dir,
            strict,
            compact,
            format,
        } => {
            commands::normalize::execute(NormalizeArgs {
                config: cli.config,
                code,
                source,
                output_dir,
                strict,
                compact,
                format,
            })
            .await?
        }
        Commands::Validate {
            path,
            code,
            details,
            format,
        } => commands::validate::execute(&path, code, details, format).await?,
        Commands::Aliases { format, output } => {
            commands::aliases::execute(format, output.as_deref())?
        }
        Commands::Lookup { corpus, reference } => commands::lookup::execute(&corpus, &reference)?,
    };

    debug!("Command finished, success = {}", succeeded);
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
