/// EFI_SIMPLE_TEXT_OUTPUT_PROTOCOL binding.
///
/// The protocol is a method table. Slot 0 is Reset, slot 1 is
/// OutputString. Only OutputString is bound, together with the protocol
/// pointer it was read from, and the binding cannot outlive the System
/// Table borrow that produced it.
use core::ffi::c_void;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr;

use crate::status::Status;
use crate::wide::WideStr;

/// OutputString(This, String).
pub type OutputStringFn = unsafe extern "efiapi" fn(this: *mut c_void, string: *const u16) -> Status;

/// Method-table slots, in pointer-sized units.
pub mod slot {
    pub const RESET: usize = 0;
    pub const OUTPUT_STRING: usize = 1;
}

/// OutputString bound to its protocol instance.
pub struct TextOutput<'a> {
    this: *mut c_void,
    output_string: OutputStringFn,
    _table: PhantomData<&'a mut c_void>,
}

impl<'a> TextOutput<'a> {
    /// Read the OutputString slot from the protocol at `this`.
    ///
    /// # Safety
    /// `this` must point to a live text output protocol whose OutputString
    /// slot holds a valid efiapi function for the lifetime `'a`.
    pub unsafe fn bind(this: *mut c_void) -> Self {
        let slot = this
            .cast::<u8>()
            .add(slot::OUTPUT_STRING * size_of::<usize>())
            .cast::<OutputStringFn>();
        Self {
            this,
            output_string: ptr::read_unaligned(slot),
            _table: PhantomData,
        }
    }

    /// Write `text` to the console. Always passes the bound `This`.
    pub fn output_string(&self, text: WideStr<'_>) -> Status {
        unsafe { (self.output_string)(self.this, text.as_ptr()) }
    }
}
