//! efimap firmware entry stage.
//!
//! Loaded directly by UEFI firmware. Prints one line on ConOut and spins.
#![cfg_attr(target_os = "uefi", no_std)]
#![cfg_attr(target_os = "uefi", no_main)]

#[cfg(target_os = "uefi")]
mod entry {
    use core::ffi::c_void;
    use core::panic::PanicInfo;

    use efimap_boot::halt::spin_forever;
    use efimap_boot::{greet, Handle, Status, SystemTable};

    /// Image entry point. Firmware calls this once with the efiapi ABI.
    ///
    /// Never returns; the Status return type is only there for ABI shape.
    #[no_mangle]
    pub extern "efiapi" fn efi_main(_image: Handle, system_table: *const c_void) -> Status {
        let table = unsafe { SystemTable::from_raw(system_table) };
        // Nothing to recover to if ConOut rejects the string.
        let _ = greet(&table);
        spin_forever()
    }

    #[panic_handler]
    fn panic(_info: &PanicInfo) -> ! {
        spin_forever()
    }
}

#[cfg(not(target_os = "uefi"))]
fn main() {
    eprintln!("efimap-boot is a UEFI application; build it for x86_64-unknown-uefi");
}
