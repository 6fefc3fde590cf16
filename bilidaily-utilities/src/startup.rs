use std::{env, path::Path};

use bilidaily_models::errors::SendableError;
use log::{debug, info, LevelFilter};

use crate::{logger, memory::LogBuffer};

pub fn startup(
    name: &str,
    level: LevelFilter,
    log_file: Option<&Path>,
    buffer: LogBuffer,
) -> Result<(), SendableError> {
    logger::setup_logger(level, log_file, buffer)?;
    log_panics::init();

    info!("--- {} ---", name);
    let cwd = env::current_dir()?;
    debug!("Current working directory: {}", cwd.display());

    Ok(())
}
