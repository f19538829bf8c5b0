//! Console logging for the binary.

use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record};

/// Start logging to stderr at `level` unless `RUST_LOG` says otherwise.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup(level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)?
        .format(log_format)
        .start()?;

    log::debug!("Adjust the log level by setting RUST_LOG. By default RUST_LOG={level}");

    Ok(handle)
}

/// `LEVEL [time] [module:line] message`
pub fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}
