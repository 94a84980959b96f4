/// Host-side stand-ins for firmware structures.
///
/// Both are `#[repr(C)]` so their layout matches what firmware hands over
/// on this architecture; the fake protocol records how it was called.
use core::ffi::c_void;
use core::mem::size_of;
use core::ptr;

use crate::console::OutputStringFn;
use crate::status::Status;
use crate::table::{TableHeader, SYSTEM_TABLE_SIGNATURE};

type ResetFn = unsafe extern "efiapi" fn(this: *mut c_void, extended: bool) -> Status;

// The two slots are only ever read through the method table.
#[allow(dead_code)]
#[repr(C)]
pub struct FakeTextOutput {
    reset: ResetFn,
    output_string: OutputStringFn,
    pub calls: usize,
    pub resets: usize,
    pub last_this: *const c_void,
    pub last_string: *const u16,
    status: Status,
}

unsafe extern "efiapi" fn fake_reset(this: *mut c_void, _extended: bool) -> Status {
    let out = &mut *this.cast::<FakeTextOutput>();
    out.resets += 1;
    Status::SUCCESS
}

unsafe extern "efiapi" fn fake_output_string(this: *mut c_void, string: *const u16) -> Status {
    let out = &mut *this.cast::<FakeTextOutput>();
    out.calls += 1;
    out.last_this = this;
    out.last_string = string;
    out.status
}

impl FakeTextOutput {
    pub fn new() -> Self {
        Self::failing(Status::SUCCESS)
    }

    /// Every OutputString call returns `status`.
    pub fn failing(status: Status) -> Self {
        Self {
            reset: fake_reset,
            output_string: fake_output_string,
            calls: 0,
            resets: 0,
            last_this: ptr::null(),
            last_string: ptr::null(),
            status,
        }
    }
}

impl Default for FakeTextOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// System Table prefix followed by fields this crate never reads.
#[allow(dead_code)]
#[repr(C)]
pub struct FakeSystemTable {
    pub header: TableHeader,
    pub firmware_vendor: *const u16,
    pub firmware_revision: u32,
    pub console_in_handle: *mut c_void,
    pub con_in: *mut c_void,
    pub console_out_handle: *mut c_void,
    pub con_out: *mut FakeTextOutput,
    pub unmodelled: [usize; 8],
}

impl FakeSystemTable {
    pub fn new(con_out: *mut FakeTextOutput) -> Self {
        Self {
            header: TableHeader {
                signature: SYSTEM_TABLE_SIGNATURE,
                revision: (2 << 16) | 70,
                header_size: size_of::<FakeSystemTable>() as u32,
                crc32: 0,
                reserved: 0,
            },
            firmware_vendor: ptr::null(),
            firmware_revision: 0x0001_0000,
            console_in_handle: ptr::null_mut(),
            con_in: ptr::null_mut(),
            console_out_handle: ptr::null_mut(),
            con_out,
            // Poison so a wrong offset reads garbage rather than a null.
            unmodelled: [usize::MAX; 8],
        }
    }

    pub fn as_ptr(&self) -> *const c_void {
        (self as *const Self).cast()
    }
}
