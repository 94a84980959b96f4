/// x86_64 architecture support.
///
/// This module provides:
/// - Port I/O (in/out instructions) and the `Pio` backend for the UART
/// - The COM1 console and `serial_print!` macros
/// - The terminal `hlt` loop
pub mod serial;

use crate::drivers::uart::PortIo;

/// Halt the CPU until the next interrupt.
#[inline(always)]
pub fn hlt() {
    unsafe { core::arch::asm!("hlt", options(nostack, nomem)); }
}

/// Disable interrupts.
#[inline(always)]
pub fn cli() {
    unsafe { core::arch::asm!("cli", options(nostack, nomem)); }
}

/// Idle forever. Interrupts are masked first so `hlt` is not woken into
/// handlers that were never installed.
pub fn halt_forever() -> ! {
    cli();
    loop {
        hlt();
    }
}

/// Write a byte to an I/O port.
#[inline(always)]
pub fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") val,
            options(nostack, preserves_flags),
        );
    }
}

/// Read a byte from an I/O port.
#[inline(always)]
pub fn inb(port: u16) -> u8 {
    let val: u8;
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") val,
            options(nostack, preserves_flags),
        );
    }
    val
}

/// Real port I/O through `in`/`out`.
pub struct Pio;

impl PortIo for Pio {
    #[inline(always)]
    fn write(&mut self, port: u16, value: u8) {
        outb(port, value);
    }

    #[inline(always)]
    fn read(&mut self, port: u16) -> u8 {
        inb(port)
    }
}
