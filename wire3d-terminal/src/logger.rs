/// Log sink that keeps the latest record for the status line
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Mutex;

/// Stdout belongs to the renderer while the alternate screen is active, so
/// records are held here and shown in the status line instead of printed.
pub struct HudLogger {
    last: Mutex<Option<String>>,
}

static LOGGER: HudLogger = HudLogger {
    last: Mutex::new(None),
};

impl HudLogger {
    fn peek(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl Log for HudLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut last) = self.last.lock() {
            *last = Some(format!("{}: {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

/// Install the status-line logger
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Most recent log message, if any
pub fn last_message() -> Option<String> {
    LOGGER.peek()
}
