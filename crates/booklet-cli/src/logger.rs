use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes timestamped log lines to stderr, keeping stdout for results
#[derive(Clone)]
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Level for the `-v` / `-q` flags; quiet wins
    pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
        match (verbose, quiet) {
            (_, true) => LevelFilter::Warn,
            (true, false) => LevelFilter::Debug,
            (false, false) => LevelFilter::Info,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let line = match record.level() {
            Level::Info => format!("{} {}", timestamp, record.args()),
            level => format!(
                "{} {:<5} [{}] {}",
                timestamp,
                level,
                record.target(),
                record.args()
            ),
        };

        // Nowhere left to report a failed write to stderr
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
