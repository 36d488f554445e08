//! Console Logger
//!
//! `log` backend for WASM frontends. Lines are tagged with the app name and a
//! local timestamp, and routed to the matching console method.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;

struct ConsoleLogger {
    app_name: &'static str,
    level: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        let message = record.args().to_string();
        let line = format_line(self.app_name, &timestamp, record.level(), &message);
        let value = JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Fails if a logger is already set.
pub fn init_logger(app_name: &'static str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger: &'static ConsoleLogger = Box::leak(Box::new(ConsoleLogger { app_name, level }));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

pub fn format_line(app_name: &str, timestamp: &str, level: Level, message: &str) -> String {
    format!("[{}] {} {:<5} {}", timestamp, app_name, level, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line("MenuAdmin", "12:00:00.000", Level::Warn, "[Api] slow");
        assert_eq!(line, "[12:00:00.000] MenuAdmin WARN  [Api] slow");
    }
}
