/// Fixed-width uppercase hex rendering.
///
/// Width is always bits / 4 digits, no leading-zero suppression. Digits are
/// produced most-significant byte first by stepping the shift down 8 bits
/// at a time and splitting each byte into two nibbles.
use core::fmt;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Unsigned integers the renderer accepts.
pub trait Hex: Copy {
    /// Width in bytes; the rendering is twice this many digits.
    const BYTES: usize;

    fn widen(self) -> u64;
}

macro_rules! impl_hex {
    ($($t:ty),*) => {
        $(
            impl Hex for $t {
                const BYTES: usize = core::mem::size_of::<$t>();

                fn widen(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_hex!(u8, u16, u32, u64, usize);

/// Rendered digits of one value. At most 16 digits (u64).
#[derive(Clone, Copy)]
pub struct HexDigits {
    buf: [u8; 16],
    len: usize,
}

impl HexDigits {
    pub fn new<T: Hex>(value: T) -> Self {
        let v = value.widen();
        let mut out = Self { buf: [0u8; 16], len: 0 };
        let mut shift = (T::BYTES * 8) as u32;
        while shift > 0 {
            shift -= 8;
            let byte = (v >> shift) as u8;
            out.buf[out.len] = DIGITS[(byte >> 4) as usize];
            out.buf[out.len + 1] = DIGITS[(byte & 0x0F) as usize];
            out.len += 2;
        }
        out
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl fmt::Display for HexDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
