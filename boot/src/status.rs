/// EFI_STATUS and EFI_HANDLE.
///
/// Status values are UINTN. Error codes have the high bit set; warnings
/// are small positive values without it.
use core::ffi::c_void;
use core::fmt;

const ERROR_BIT: usize = 1 << (usize::BITS - 1);

/// An EFI_STATUS value as returned across the efiapi boundary.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Status(pub usize);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const LOAD_ERROR: Status = Status(ERROR_BIT | 1);
    pub const INVALID_PARAMETER: Status = Status(ERROR_BIT | 2);
    pub const UNSUPPORTED: Status = Status(ERROR_BIT | 3);
    pub const DEVICE_ERROR: Status = Status(ERROR_BIT | 7);

    /// True for error codes (high bit set).
    pub const fn is_error(self) -> bool {
        self.0 & ERROR_BIT != 0
    }

    /// Warnings count as success.
    pub fn to_result(self) -> Result<(), Status> {
        if self.is_error() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({:#x})", self.0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::SUCCESS => write!(f, "success"),
            Status::LOAD_ERROR => write!(f, "load error"),
            Status::INVALID_PARAMETER => write!(f, "invalid parameter"),
            Status::UNSUPPORTED => write!(f, "unsupported"),
            Status::DEVICE_ERROR => write!(f, "device error"),
            Status(code) if self.is_error() => write!(f, "error {:#x}", code & !ERROR_BIT),
            Status(code) => write!(f, "warning {:#x}", code),
        }
    }
}

/// Opaque EFI_HANDLE. Never dereferenced here.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle(pub *mut c_void);
