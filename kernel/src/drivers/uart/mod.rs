/// 16550-compatible UART driver, transmit side plus polled receive.
///
/// Register map relative to the base port:
/// ```text
///   +0  DATA / divisor low (DLAB=1)
///   +1  interrupt enable / divisor high (DLAB=1)
///   +2  FIFO control
///   +3  line control (bit 7 = DLAB)
///   +4  modem control
///   +5  line status
/// ```
/// Transmit busy-waits on THR-empty with no timeout; with no UART present
/// this blocks forever.
use core::fmt;

use bitflags::bitflags;

use crate::config;

mod hex;
pub mod port;

#[cfg(test)]
pub mod mock;

pub use hex::{Hex, HexDigits};
pub use port::PortIo;

/// Register offsets from the base port.
pub(crate) mod reg {
    pub const DATA: u16 = 0;
    pub const INT_ENABLE: u16 = 1;
    pub const DIVISOR_LOW: u16 = 0;
    pub const DIVISOR_HIGH: u16 = 1;
    pub const FIFO_CONTROL: u16 = 2;
    pub const LINE_CONTROL: u16 = 3;
    pub const MODEM_CONTROL: u16 = 4;
    pub const LINE_STATUS: u16 = 5;
}

/// Divisor latch access bit in the line control register.
pub(crate) const DLAB: u8 = 0x80;

bitflags! {
    /// Line status register (LSR).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        const DATA_READY = 1 << 0;
        const OVERRUN_ERROR = 1 << 1;
        const PARITY_ERROR = 1 << 2;
        const FRAMING_ERROR = 1 << 3;
        const BREAK_INTERRUPT = 1 << 4;
        /// Transmitter holding register empty.
        const THR_EMPTY = 1 << 5;
        const TRANSMITTER_EMPTY = 1 << 6;
        const FIFO_ERROR = 1 << 7;
    }
}

pub struct Serial<P: PortIo> {
    io: P,
    base: u16,
}

impl<P: PortIo> Serial<P> {
    pub const fn new(io: P, base: u16) -> Self {
        Self { io, base }
    }

    pub fn io(&self) -> &P {
        &self.io
    }

    /// Program the line: 8N1 at 115200 / BAUD_DIVISOR, FIFO on, DTR/RTS/OUT2.
    pub fn init(&mut self) {
        let [div_low, div_high] = config::BAUD_DIVISOR.to_le_bytes();
        self.io.write(self.base + reg::INT_ENABLE, 0x00); // Disable interrupts
        self.io.write(self.base + reg::LINE_CONTROL, DLAB); // Enable divisor latch
        self.io.write(self.base + reg::DIVISOR_LOW, div_low);
        self.io.write(self.base + reg::DIVISOR_HIGH, div_high);
        self.io.write(self.base + reg::LINE_CONTROL, config::LINE_8N1); // Latch off, 8N1
        self.io.write(self.base + reg::FIFO_CONTROL, config::FIFO_CONTROL);
        self.io.write(self.base + reg::MODEM_CONTROL, config::MODEM_CONTROL);
    }

    pub fn line_status(&mut self) -> LineStatus {
        LineStatus::from_bits_retain(self.io.read(self.base + reg::LINE_STATUS))
    }

    // ---- Output ----

    /// Write a single byte once the holding register is empty.
    pub fn write_byte(&mut self, byte: u8) {
        while !self.line_status().contains(LineStatus::THR_EMPTY) {
            core::hint::spin_loop();
        }
        self.io.write(self.base + reg::DATA, byte);
    }

    /// Write a string, turning each LF into CR LF.
    pub fn write_str_raw(&mut self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
    }

    /// Write `value` as fixed-width uppercase hex.
    pub fn write_hex<T: Hex>(&mut self, value: T) {
        for &digit in HexDigits::new(value).as_bytes() {
            self.write_byte(digit);
        }
    }

    // ---- Input ----

    pub fn has_data(&mut self) -> bool {
        self.line_status().contains(LineStatus::DATA_READY)
    }

    /// Returns None if nothing is waiting.
    pub fn try_read_byte(&mut self) -> Option<u8> {
        if self.has_data() {
            Some(self.io.read(self.base + reg::DATA))
        } else {
            None
        }
    }
}

impl<P: PortIo> fmt::Write for Serial<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_str_raw(s);
        Ok(())
    }
}
