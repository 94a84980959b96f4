/// Kernel entry sequence, independent of the real COM1 port.
///
/// `kernel_main` locks SERIAL, calls `run`, releases the lock, logs the
/// outcome and halts. Nothing here logs: the caller holds the serial lock
/// that the `log` backend would need.
use crate::config;
use crate::drivers::uart::{PortIo, Serial};
use crate::mmap::{self, MapError, MemoryMap};

/// What was printed for a map that passed the guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walked {
    pub records: usize,
    pub stride: usize,
    /// Trailing bytes dropped because they do not form a whole record.
    pub remainder: usize,
}

/// Init the UART, print the banner, then either the records or `empty`.
///
/// Returns once output is done; halting is the caller's job.
///
/// # Safety
/// If `map` is non-null and `len` non-zero, `map..map+len` must be
/// readable and unmodified for the duration of the call.
pub unsafe fn run<P: PortIo>(
    serial: &mut Serial<P>,
    map: *const u8,
    len: usize,
    stride: usize,
) -> Result<Walked, MapError> {
    // 1. Serial first, before any output
    serial.init();
    serial.write_str_raw(config::BANNER);
    serial.write_str_raw("\n");

    // 2. Validate the handoff
    let map = match MemoryMap::from_raw(map, len, stride) {
        Ok(map) => map,
        Err(e) => {
            serial.write_str_raw(config::EMPTY_MAP);
            serial.write_str_raw("\n");
            return Err(e);
        }
    };

    // 3. One line per descriptor
    mmap::walk(&map, serial);
    if config::MMAP_SUMMARY {
        mmap::write_summary(serial, &map.summary());
    }

    Ok(Walked {
        records: map.len(),
        stride: map.stride(),
        remainder: map.remainder(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::uart::mock::MockPort;
    use crate::mmap::offset;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::ptr;

    const BASE: u16 = config::COM1;
    const EMPTY_OUTPUT: &str = "=== UEFI Memory Map ===\r\nempty\r\n";

    fn serial() -> Serial<MockPort> {
        Serial::new(MockPort::new(BASE), BASE)
    }

    fn two_records() -> Vec<u8> {
        let mut buf = vec![0u8; 80];
        for (i, (ty, phys, pages, attr)) in
            [(7u32, 0x100000u64, 16u64, 0u64), (1, 0x200000, 32, 0xF)].into_iter().enumerate()
        {
            let rec = &mut buf[i * 40..(i + 1) * 40];
            rec[offset::TYPE..offset::TYPE + 4].copy_from_slice(&ty.to_le_bytes());
            rec[offset::PHYSICAL_START..offset::PHYSICAL_START + 8].copy_from_slice(&phys.to_le_bytes());
            rec[offset::NUMBER_OF_PAGES..offset::NUMBER_OF_PAGES + 8].copy_from_slice(&pages.to_le_bytes());
            rec[offset::ATTRIBUTE..offset::ATTRIBUTE + 8].copy_from_slice(&attr.to_le_bytes());
        }
        buf
    }

    #[test]
    fn null_pointer_prints_only_empty() {
        let mut s = serial();
        let result = unsafe { run(&mut s, ptr::null(), 80, 40) };

        assert_eq!(result, Err(MapError::NullPointer));
        assert_eq!(s.io().text(), EMPTY_OUTPUT);
    }

    #[test]
    fn zero_length_prints_only_empty() {
        let buf = two_records();
        let mut s = serial();
        let result = unsafe { run(&mut s, buf.as_ptr(), 0, 40) };

        assert_eq!(result, Err(MapError::ZeroLength));
        assert_eq!(s.io().text(), EMPTY_OUTPUT);
    }

    #[test]
    fn zero_stride_prints_only_empty() {
        let buf = two_records();
        let mut s = serial();
        let result = unsafe { run(&mut s, buf.as_ptr(), buf.len(), 0) };

        assert_eq!(result, Err(MapError::ZeroStride));
        assert_eq!(s.io().text(), EMPTY_OUTPUT);
    }

    #[test]
    fn short_stride_prints_only_empty() {
        let buf = [0u8; 96];
        let mut s = serial();
        let result = unsafe { run(&mut s, buf.as_ptr(), buf.len(), 24) };

        assert_eq!(result, Err(MapError::StrideTooSmall(24)));
        assert_eq!(s.io().text(), EMPTY_OUTPUT);
    }

    #[test]
    fn two_records_after_banner() {
        let buf = two_records();
        let mut s = serial();
        let result = unsafe { run(&mut s, buf.as_ptr(), buf.len(), 40) };

        assert_eq!(result, Ok(Walked { records: 2, stride: 40, remainder: 0 }));
        assert_eq!(
            s.io().text(),
            "=== UEFI Memory Map ===\r\n\
             Type=0000000000000007 PA=0000000000100000 Pages=0000000000000010 Attr=0000000000000000\r\n\
             Type=0000000000000001 PA=0000000000200000 Pages=0000000000000020 Attr=000000000000000F\r\n"
        );
    }

    #[test]
    fn partial_record_reported_not_printed() {
        let buf = two_records();
        let mut s = serial();
        let result = unsafe { run(&mut s, buf.as_ptr(), 60, 40) };

        assert_eq!(result, Ok(Walked { records: 1, stride: 40, remainder: 20 }));
        assert_eq!(s.io().text().lines().count(), 2);
    }

    #[test]
    fn init_precedes_output() {
        let mut s = serial();
        let _ = unsafe { run(&mut s, ptr::null(), 0, 0) };

        let writes = s.io().writes();
        assert_eq!(
            &writes[..7],
            &[
                (BASE + 1, 0x00),
                (BASE + 3, 0x80),
                (BASE, 0x03),
                (BASE + 1, 0x00),
                (BASE + 3, 0x03),
                (BASE + 2, 0xC7),
                (BASE + 4, 0x0B),
            ]
        );
        // Everything after init is wire data, starting with the banner.
        assert!(writes[7..].iter().all(|&(port, _)| port == BASE));
        assert_eq!(writes[7].1, b'=');
    }
}
