mod cli;
mod login;
mod qr_login;
mod run;

use std::{path::Path, process::ExitCode, sync::Arc};

use bilidaily_api::{BiliClient, Session};
use bilidaily_config::{load_config, write_default_config, Config};
use bilidaily_models::errors::SendableError;
use bilidaily_utilities::{memory::LogBuffer, startup::startup};
use clap::Parser;
use log::{error, info, LevelFilter};

use crate::cli::{Cli, Commands};

const APP_NAME: &str = "BiliDaily";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let logs = LogBuffer::new();

    match dispatch(cli, logs).await {
        Ok(code) => code,
        Err(err) => {
            if log::max_level() == LevelFilter::Off {
                eprintln!("bilidaily: {}", err);
            } else {
                error!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli, logs: LogBuffer) -> Result<ExitCode, SendableError> {
    match cli.command {
        Commands::Init { force } => {
            startup(APP_NAME, console_level(cli.verbose), None, logs)?;
            let path = write_default_config(&cli.config, force)?;
            info!("Default configuration written to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run { dry_run } => {
            let config = prepare(&cli.config, cli.verbose, logs.clone())?;
            run::run(config, logs, dry_run).await
        }
        Commands::Login { qr } => {
            let config = prepare(&cli.config, cli.verbose, logs)?;
            login::login(&config, &cli.config, qr).await
        }
        Commands::QrLogin => {
            let config = prepare(&cli.config, cli.verbose, logs)?;
            let client = client(&config)?;
            let confirmed = qr_login::qr_login(&client, &cli.config).await?;
            Ok(exit_code(confirmed))
        }
    }
}

/// Loads the config, then starts logging with its level and file.
fn prepare(path: &Path, verbose: bool, logs: LogBuffer) -> Result<Config, SendableError> {
    match load_config(path) {
        Ok(config) => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                config.log.level.to_level_filter()
            };
            startup(APP_NAME, level, config.log.file.as_deref(), logs)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        Err(err) => {
            startup(APP_NAME, console_level(verbose), None, logs)?;
            Err(err.into())
        }
    }
}

fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub(crate) fn client(config: &Config) -> Result<Arc<BiliClient>, SendableError> {
    let session = Arc::new(Session::new(config.cookie.clone()));
    Ok(Arc::new(BiliClient::new(config, session)?))
}

pub(crate) fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
