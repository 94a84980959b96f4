//! efimap kernel: entered from the loader with the UEFI memory map.
//!
//! The loader calls `kernel_main(map, map_len, desc_size)` with the SysV
//! ABI after ExitBootServices. Output goes to COM1 only.
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel {
    use core::panic::PanicInfo;

    use efimap_kernel::arch::x86_64::{self as cpu, serial::SERIAL};
    use efimap_kernel::{entry, logger, serial_println};

    /// Kernel entry point. Never returns.
    ///
    /// # Safety
    /// If `map` is non-null and `map_len` non-zero, `map..map+map_len` must
    /// be readable and left untouched by anyone else.
    #[no_mangle]
    pub unsafe extern "sysv64" fn kernel_main(map: *const u8, map_len: usize, desc_size: usize) -> ! {
        // Output happens with SERIAL held, so log only once it is released.
        let outcome = {
            let mut serial = SERIAL.lock();
            entry::run(&mut *serial, map, map_len, desc_size)
        };

        let _ = logger::init();
        match outcome {
            Ok(walked) => {
                log::debug!(target: "mmap", "{} records, stride {}", walked.records, walked.stride);
                if walked.remainder != 0 {
                    log::debug!(target: "mmap", "{} trailing bytes ignored", walked.remainder);
                }
            }
            Err(e) => log::debug!(target: "mmap", "rejected: {}", e),
        }

        cpu::halt_forever()
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        // The panic may have happened with SERIAL held.
        unsafe { SERIAL.force_unlock() };
        serial_println!("!!! KERNEL PANIC !!!");
        serial_println!("{}", info);
        cpu::halt_forever()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("efimap-kernel runs bare-metal; build it for x86_64-unknown-none");
}
