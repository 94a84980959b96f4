#![no_std]
// Firmware entry stage. Everything here is host-testable; the `efi_main`
// symbol itself lives in main.rs and is only built for the UEFI target.
//
// Flow:
// 1. Firmware calls efi_main(image, system_table) with the efiapi ABI
// 2. ConOut is read from the System Table at a fixed offset
// 3. OutputString is called once with the greeting
// 4. Spin forever

pub mod console;
pub mod halt;
pub mod status;
pub mod table;
pub mod wide;

#[cfg(test)]
mod fake;

pub use console::TextOutput;
pub use status::{Handle, Status};
pub use table::SystemTable;
pub use wide::WideStr;

/// The one message this stage prints, NUL-terminated UCS-2 in .rodata.
pub static GREETING: WideStr<'static> = wide!("hello from UEFI\r\n");

/// Print the greeting on the firmware console.
///
/// The status from OutputString is returned for the caller to discard;
/// there is no recovery path at this stage.
pub fn greet(system_table: &SystemTable<'_>) -> Status {
    system_table.con_out().output_string(GREETING)
}
