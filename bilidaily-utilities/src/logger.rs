use std::{path::Path, time::SystemTime};

use bilidaily_models::errors::SendableError;
use log::LevelFilter;

use crate::memory::LogBuffer;

/// Installs the global logger: formatted lines to stdout (and `file` when given),
/// plain messages to `buffer`. Records are filtered by `level` afterwards through
/// [`set_level`], so the effective level may change once configuration is loaded.
pub fn setup_logger(
    level: LevelFilter,
    file: Option<&Path>,
    buffer: LogBuffer,
) -> Result<(), SendableError> {
    let mut formatted = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stdout());
    if let Some(path) = file {
        formatted = formatted.chain(fern::log_file(path)?);
    }

    let memory = fern::Dispatch::new().chain(fern::Output::call(move |record| {
        buffer.push(record.args().to_string());
    }));

    fern::Dispatch::new()
        .level(LevelFilter::Trace)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .chain(formatted)
        .chain(memory)
        .apply()?;

    set_level(level);
    Ok(())
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
