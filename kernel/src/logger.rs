/// `log` facade backend writing to COM1.
///
/// Lines look like `[DEBUG mmap] 12 records, stride 48`. The max level
/// comes from `config::LOG_LEVEL`; by default only warnings and errors are
/// printed, so boot output is just the banner and the records.
use core::fmt::{self, Write};

use log::Record;

pub struct SerialLogger;

/// Format one record as a single line.
pub fn format_record<W: Write>(out: &mut W, record: &Record<'_>) -> fmt::Result {
    writeln!(out, "[{} {}] {}", record.level(), record.target(), record.args())
}

#[cfg(target_arch = "x86_64")]
mod backend {
    use log::{Log, Metadata, Record, SetLoggerError};

    use super::{format_record, SerialLogger};
    use crate::arch::x86_64::serial::SERIAL;
    use crate::config;

    static LOGGER: SerialLogger = SerialLogger;

    impl Log for SerialLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                // Callers must not hold SERIAL while logging.
                let mut serial = SERIAL.lock();
                let _ = format_record(&mut *serial, record);
            }
        }

        fn flush(&self) {}
    }

    /// Install the logger. Call once, after the UART is initialized.
    pub fn init() -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(config::LOG_LEVEL);
        Ok(())
    }
}

#[cfg(target_arch = "x86_64")]
pub use backend::init;
