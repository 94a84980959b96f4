/// Byte-wide port I/O, abstracted so the UART can be driven by a mock.
///
/// The x86 `in`/`out` instructions implement this for real hardware; host
/// tests use `mock::MockPort`.
pub trait PortIo {
    /// Write `value` to I/O port `port`.
    fn write(&mut self, port: u16, value: u8);

    /// Read one byte from I/O port `port`.
    fn read(&mut self, port: u16) -> u8;
}
