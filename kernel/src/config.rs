/// Compile-time configuration. There is no runtime configuration: the
/// port, line parameters and log level are fixed here or by Cargo feature.
use log::LevelFilter;

/// COM1 base I/O port.
pub const COM1: u16 = 0x3F8;

/// 115200 / 3 = 38400 baud.
pub const BAUD_DIVISOR: u16 = 3;

/// 8 data bits, no parity, 1 stop bit, divisor latch off.
pub const LINE_8N1: u8 = 0x03;

/// Enable FIFO, clear RX and TX, 14-byte trigger level.
pub const FIFO_CONTROL: u8 = 0xC7;

/// DTR + RTS + OUT2.
pub const MODEM_CONTROL: u8 = 0x0B;

/// First line printed once the serial port is up.
pub const BANNER: &str = "=== UEFI Memory Map ===";

/// Printed instead of records when the loader passed no usable map.
pub const EMPTY_MAP: &str = "empty";

/// Max level for the `log` facade. `verbose-log` turns on debug/trace.
pub const LOG_LEVEL: LevelFilter = if cfg!(feature = "verbose-log") {
    LevelFilter::Trace
} else {
    LevelFilter::Warn
};

/// Print the page-total line after the records.
pub const MMAP_SUMMARY: bool = cfg!(feature = "mmap-summary");
