/// NUL-terminated UCS-2 strings for firmware text output.
///
/// Strings are built at compile time from ASCII literals with `wide!`, so
/// the buffer handed to OutputString is a static with a stable address.
use core::fmt;

/// Borrowed UCS-2 text whose last unit is the only NUL.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WideStr<'a> {
    units: &'a [u16],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WideStrError {
    /// Last unit is not 0.
    MissingNul,
    /// A 0 unit appears before the end.
    InteriorNul(usize),
}

impl fmt::Display for WideStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WideStrError::MissingNul => write!(f, "wide string is not NUL-terminated"),
            WideStrError::InteriorNul(at) => write!(f, "wide string has a NUL at unit {}", at),
        }
    }
}

impl<'a> WideStr<'a> {
    /// Wrap `units`, which must end in exactly one NUL.
    pub const fn new(units: &'a [u16]) -> Result<Self, WideStrError> {
        let len = units.len();
        if len == 0 || units[len - 1] != 0 {
            return Err(WideStrError::MissingNul);
        }
        let mut i = 0;
        while i < len - 1 {
            if units[i] == 0 {
                return Err(WideStrError::InteriorNul(i));
            }
            i += 1;
        }
        Ok(Self { units })
    }

    /// Pointer to the first unit, as passed to OutputString.
    pub const fn as_ptr(&self) -> *const u16 {
        self.units.as_ptr()
    }

    /// Number of characters, excluding the terminator.
    pub const fn len(&self) -> usize {
        self.units.len() - 1
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn units_with_nul(&self) -> &'a [u16] {
        self.units
    }
}

impl fmt::Debug for WideStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in char::decode_utf16(self.units[..self.len()].iter().copied()) {
            let c = c.unwrap_or(char::REPLACEMENT_CHARACTER);
            fmt::Display::fmt(&c.escape_debug(), f)?;
        }
        f.write_str("\"")
    }
}

/// Widen an ASCII literal into `N` UCS-2 units, the last being NUL.
///
/// Evaluated in const context by `wide!`; a non-ASCII byte or a wrong
/// `N` fails the build.
pub const fn encode_ascii<const N: usize>(s: &str) -> [u16; N] {
    let bytes = s.as_bytes();
    assert!(bytes.len() + 1 == N, "buffer must hold the text plus NUL");
    let mut out = [0u16; N];
    let mut i = 0;
    while i < bytes.len() {
        assert!(bytes[i].is_ascii(), "wide! only accepts ASCII");
        out[i] = bytes[i] as u16;
        i += 1;
    }
    out
}

/// Build a `WideStr<'static>` from an ASCII string literal at compile time.
#[macro_export]
macro_rules! wide {
    ($s:literal) => {{
        const UNITS: [u16; $s.len() + 1] = $crate::wide::encode_ascii($s);
        const TEXT: $crate::wide::WideStr<'static> = match $crate::wide::WideStr::new(&UNITS) {
            Ok(text) => text,
            Err(_) => panic!("wide! literal contains a NUL"),
        };
        TEXT
    }};
}
