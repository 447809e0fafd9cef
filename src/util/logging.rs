use std::sync::Once;

use crate::util::config;

/// Minimal stderr logger for hosts that do not install their own.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;
static INIT: Once = Once::new();

/// Install the stderr logger at the configured level. Safe to call more
/// than once; loses quietly if the host already installed a logger.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(config::core_config().log_level);
    });
}
