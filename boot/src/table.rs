/// EFI System Table access through fixed byte offsets.
///
/// The table's true size and layout past ConOut belong to firmware, so it
/// is never viewed as a Rust struct. Fields are read at offsets computed
/// from the UEFI layout for the current pointer width:
///
/// ```text
///   0   Hdr                  EFI_TABLE_HEADER (24 bytes)
///  24   FirmwareVendor       CHAR16*
///  +P   FirmwareRevision     UINT32 (padded to pointer alignment)
///       ConsoleInHandle      EFI_HANDLE
///       ConIn                EFI_SIMPLE_TEXT_INPUT_PROTOCOL*
///       ConsoleOutHandle     EFI_HANDLE
///       ConOut               EFI_SIMPLE_TEXT_OUTPUT_PROTOCOL*   <- used
///       ...                  not modelled
/// ```
use core::ffi::c_void;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr;

use static_assertions::const_assert_eq;

use crate::console::TextOutput;

const PTR: usize = size_of::<usize>();

const fn align_up(off: usize, align: usize) -> usize {
    (off + align - 1) & !(align - 1)
}

/// Byte offsets of System Table fields.
pub mod offset {
    use super::{align_up, PTR};

    pub const HDR: usize = 0;
    pub const FIRMWARE_VENDOR: usize = HDR + super::TABLE_HEADER_SIZE;
    pub const FIRMWARE_REVISION: usize = FIRMWARE_VENDOR + PTR;
    pub const CONSOLE_IN_HANDLE: usize = align_up(FIRMWARE_REVISION + 4, PTR);
    pub const CON_IN: usize = CONSOLE_IN_HANDLE + PTR;
    pub const CONSOLE_OUT_HANDLE: usize = CON_IN + PTR;
    pub const CON_OUT: usize = CONSOLE_OUT_HANDLE + PTR;
}

/// "IBI SYST" in little-endian.
pub const SYSTEM_TABLE_SIGNATURE: u64 = 0x5453_5953_2049_4249;

const TABLE_HEADER_SIZE: usize = 24;

/// EFI_TABLE_HEADER, common to all EFI tables.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TableHeader {
    pub signature: u64,
    pub revision: u32,
    pub header_size: u32,
    pub crc32: u32,
    pub reserved: u32,
}

const_assert_eq!(size_of::<TableHeader>(), TABLE_HEADER_SIZE);

#[cfg(target_pointer_width = "64")]
const_assert_eq!(offset::CON_OUT, 64);

impl TableHeader {
    /// Revision as (major, minor), e.g. (2, 70) for UEFI 2.7.
    pub fn revision_parts(&self) -> (u16, u16) {
        ((self.revision >> 16) as u16, self.revision as u16)
    }
}

/// Borrowed view of the firmware System Table, valid for `'fw`.
#[derive(Clone, Copy)]
pub struct SystemTable<'fw> {
    base: *const u8,
    _firmware: PhantomData<&'fw c_void>,
}

impl<'fw> SystemTable<'fw> {
    /// Wrap the pointer firmware passed to the entry point.
    ///
    /// # Safety
    /// `raw` must point to a System Table laid out as UEFI defines it for
    /// this architecture, readable and unmodified for `'fw`, whose ConOut
    /// field points to a live text output protocol.
    pub unsafe fn from_raw(raw: *const c_void) -> Self {
        Self {
            base: raw.cast(),
            _firmware: PhantomData,
        }
    }

    /// Copy of the table header.
    pub fn header(&self) -> TableHeader {
        unsafe { ptr::read_unaligned(self.base.add(offset::HDR).cast::<TableHeader>()) }
    }

    /// Header signature matches "IBI SYST".
    pub fn is_valid(&self) -> bool {
        self.header().signature == SYSTEM_TABLE_SIGNATURE
    }

    fn read_ptr(&self, off: usize) -> *mut c_void {
        unsafe { ptr::read_unaligned(self.base.add(off).cast::<*mut c_void>()) }
    }

    /// Raw ConOut pointer.
    pub fn con_out_ptr(&self) -> *mut c_void {
        self.read_ptr(offset::CON_OUT)
    }

    /// Bind ConOut's OutputString for use within this borrow.
    pub fn con_out(&self) -> TextOutput<'_> {
        unsafe { TextOutput::bind(self.con_out_ptr()) }
    }
}
