use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::{PROGRAM_LOG_LEVEL, PROGRAM_NAME};

pub struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_line(record));
        }
    }

    fn flush(&self) {}
}

fn format_line(record: &Record<'_>) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!(
        "{} {} {} [{}] {}",
        timestamp,
        PROGRAM_NAME,
        record.level(),
        record.target(),
        record.args()
    )
}

fn get_level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Raise `base` by `verbosity` steps (`-v`, `-vv`, ...), saturating at trace.
fn raise_level(base: Level, verbosity: u8) -> Level {
    let mut level = base;
    for _ in 0..verbosity {
        level = match level {
            Level::Error => Level::Warn,
            Level::Warn => Level::Info,
            Level::Info => Level::Debug,
            Level::Debug | Level::Trace => Level::Trace,
        };
    }
    level
}

/// Install the stderr logger using `VBATCH_LOG_LEVEL` (default `warn`).
pub fn init() -> Result<(), SetLoggerError> {
    init_with_verbosity(0)
}

/// Install the stderr logger, raising the environment level by `verbosity`.
pub fn init_with_verbosity(verbosity: u8) -> Result<(), SetLoggerError> {
    install(raise_level(get_level_from_env(), verbosity))
}

fn install(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first caller picks the level; later calls are no-ops so the
    // max level never disagrees with the installed logger.
    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
