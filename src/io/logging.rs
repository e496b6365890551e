//! Minimal stderr backend for the `log` facade

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Writes `LEVEL message` lines to stderr
#[derive(Debug)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    /// Logger passing records at or above `level`
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Most verbose level that is printed
    pub const fn level(&self) -> LevelFilter {
        self.level
    }

    /// Render a record the way it is printed
    pub fn format(record: &Record<'_>) -> String {
        format!("{:>5} {}", record.level(), record.args())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            // Nowhere to report a failed write
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        // Best effort
        let _ = std::io::stderr().flush();
    }
}

/// Level for the command-line verbosity flags
///
/// Warnings show by default, each `--verbose` adds one level and `--quiet`
/// keeps only errors.
pub const fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger as the global `log` backend
///
/// Returns `false` if another logger was installed first; the maximum
/// level is updated either way.
pub fn init(level: LevelFilter) -> bool {
    let logger = LOGGER.get_or_init(|| StderrLogger::new(level));
    let installed = log::set_logger(logger).is_ok();
    log::set_max_level(level);
    installed
}
