#![no_std]

// Kernel side of the handoff: COM1 console, UEFI memory map walker and the
// `log` backend. Hardware access is behind `drivers::uart::PortIo`, so
// everything except the x86 port instructions runs in host unit tests.

#[cfg(test)]
extern crate alloc;

pub mod arch;
pub mod config;
pub mod drivers;
pub mod entry;
pub mod logger;
pub mod mmap;
