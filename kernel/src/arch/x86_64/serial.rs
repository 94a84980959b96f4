/// COM1 console (0x3F8).
///
/// Output: boot text via serial_print! / serial_println!, and the `log`
/// backend in `crate::logger`.
use spin::Mutex;

use super::Pio;
use crate::config;
use crate::drivers::uart::Serial;

pub static SERIAL: Mutex<Serial<Pio>> = Mutex::new(Serial::new(Pio, config::COM1));

/// Print to serial console.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        {
            use core::fmt::Write;
            let mut serial = $crate::arch::x86_64::serial::SERIAL.lock();
            let _ = write!(serial, $($arg)*);
        }
    };
}

/// Print to serial console with a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => {
        $crate::serial_print!("{}\n", format_args!($($arg)*))
    };
}
