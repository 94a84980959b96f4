/// UEFI memory map walker.
///
/// The loader hands over (base, length, stride). The buffer is an array of
/// EFI_MEMORY_DESCRIPTORs whose stride is chosen by firmware and may be
/// larger than the fields read here; the tail of each record is skipped.
///
/// Field layout (x86_64, descriptor version 1), all little-endian:
/// ```text
///   off  size  field
///    0    4    Type
///    8    8    PhysicalStart
///   16    8    VirtualStart
///   24    8    NumberOfPages
///   32    8    Attribute
/// ```
/// Offsets are fixed constants, never derived from the data. Record count
/// is `length / stride`; a partial trailing record is dropped silently.
use core::fmt;
use core::slice::{self, ChunksExact};

use static_assertions::const_assert;

use crate::drivers::uart::{PortIo, Serial};

mod attr;

pub use attr::MemoryAttribute;


/// Byte offsets of descriptor fields.
pub mod offset {
    pub const TYPE: usize = 0;
    pub const PHYSICAL_START: usize = 8;
    pub const VIRTUAL_START: usize = 16;
    pub const NUMBER_OF_PAGES: usize = 24;
    pub const ATTRIBUTE: usize = 32;
}

/// Smallest stride that holds every field read.
pub const MIN_STRIDE: usize = offset::ATTRIBUTE + 8;

const_assert!(offset::TYPE + 4 <= offset::PHYSICAL_START);
const_assert!(offset::PHYSICAL_START + 8 <= offset::VIRTUAL_START);
const_assert!(offset::VIRTUAL_START + 8 <= offset::NUMBER_OF_PAGES);
const_assert!(offset::NUMBER_OF_PAGES + 8 <= offset::ATTRIBUTE);

/// EfiConventionalMemory. Only used for the summary's usable total.
pub const CONVENTIONAL_MEMORY: u32 = 7;

/// Why a map was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    NullPointer,
    ZeroLength,
    ZeroStride,
    /// Stride too short to contain the Attribute field.
    StrideTooSmall(usize),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::NullPointer => write!(f, "memory map pointer is null"),
            MapError::ZeroLength => write!(f, "memory map length is zero"),
            MapError::ZeroStride => write!(f, "descriptor size is zero"),
            MapError::StrideTooSmall(s) => {
                write!(f, "descriptor size {} is below {}", s, MIN_STRIDE)
            }
        }
    }
}

/// A borrowed memory map buffer with its record stride.
#[derive(Clone, Copy)]
pub struct MemoryMap<'a> {
    bytes: &'a [u8],
    stride: usize,
}

impl<'a> MemoryMap<'a> {
    pub fn new(bytes: &'a [u8], stride: usize) -> Result<Self, MapError> {
        if bytes.is_empty() {
            return Err(MapError::ZeroLength);
        }
        if stride == 0 {
            return Err(MapError::ZeroStride);
        }
        if stride < MIN_STRIDE {
            return Err(MapError::StrideTooSmall(stride));
        }
        Ok(Self { bytes, stride })
    }

    /// Wrap the triple passed by the loader.
    ///
    /// # Safety
    /// If `ptr` is non-null and `len` non-zero, `ptr..ptr+len` must be
    /// readable and unmodified for `'a`.
    pub unsafe fn from_raw(ptr: *const u8, len: usize, stride: usize) -> Result<Self, MapError> {
        if ptr.is_null() {
            return Err(MapError::NullPointer);
        }
        if len == 0 {
            return Err(MapError::ZeroLength);
        }
        Self::new(slice::from_raw_parts(ptr, len), stride)
    }

    /// Number of whole records.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Trailing bytes that do not form a whole record.
    pub fn remainder(&self) -> usize {
        self.bytes.len() % self.stride
    }

    pub fn get(&self, index: usize) -> Option<MemoryDescriptor<'a>> {
        let start = index.checked_mul(self.stride)?;
        let end = start.checked_add(self.stride)?;
        self.bytes.get(start..end).map(|raw| MemoryDescriptor { raw })
    }

    /// Records in memory order.
    pub fn descriptors(&self) -> Descriptors<'a> {
        Descriptors(self.bytes.chunks_exact(self.stride))
    }

    pub fn summary(&self) -> MapSummary {
        let mut summary = MapSummary::default();
        for desc in self.descriptors() {
            let pages = desc.page_count();
            summary.records += 1;
            summary.total_pages = summary.total_pages.saturating_add(pages);
            if desc.ty() == CONVENTIONAL_MEMORY {
                summary.usable_pages = summary.usable_pages.saturating_add(pages);
            }
            if desc.attribute().contains(MemoryAttribute::RUNTIME) {
                summary.runtime_pages = summary.runtime_pages.saturating_add(pages);
            }
        }
        summary
    }
}

/// Iterator over whole records.
pub struct Descriptors<'a>(ChunksExact<'a, u8>);

impl<'a> Iterator for Descriptors<'a> {
    type Item = MemoryDescriptor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|raw| MemoryDescriptor { raw })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Descriptors<'_> {}

/// One record. `raw` is exactly one stride long, at least MIN_STRIDE.
#[derive(Clone, Copy)]
pub struct MemoryDescriptor<'a> {
    raw: &'a [u8],
}

impl<'a> MemoryDescriptor<'a> {
    fn read_u32(&self, off: usize) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.raw[off..off + 4]);
        u32::from_le_bytes(buf)
    }

    fn read_u64(&self, off: usize) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.raw[off..off + 8]);
        u64::from_le_bytes(buf)
    }

    /// Raw EFI_MEMORY_TYPE. Not checked against known types.
    pub fn ty(&self) -> u32 {
        self.read_u32(offset::TYPE)
    }

    pub fn physical_start(&self) -> u64 {
        self.read_u64(offset::PHYSICAL_START)
    }

    pub fn virtual_start(&self) -> u64 {
        self.read_u64(offset::VIRTUAL_START)
    }

    /// Count of 4 KiB pages.
    pub fn page_count(&self) -> u64 {
        self.read_u64(offset::NUMBER_OF_PAGES)
    }

    pub fn attribute(&self) -> MemoryAttribute {
        MemoryAttribute::from_bits_retain(self.read_u64(offset::ATTRIBUTE))
    }

    /// The whole record, including bytes past the fields read.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }
}

/// Page totals over a whole map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapSummary {
    pub records: usize,
    pub total_pages: u64,
    pub usable_pages: u64,
    pub runtime_pages: u64,
}

/// Print one line per record, in buffer order:
/// `Type=<hex> PA=<hex> Pages=<hex> Attr=<hex>`
///
/// Must not log: the kernel calls this with the SERIAL lock held, and the
/// `log` backend takes the same lock.
pub fn walk<P: PortIo>(map: &MemoryMap<'_>, serial: &mut Serial<P>) {
    for desc in map.descriptors() {
        write_descriptor(serial, &desc);
    }
}

pub fn write_descriptor<P: PortIo>(serial: &mut Serial<P>, desc: &MemoryDescriptor<'_>) {
    serial.write_str_raw("Type=");
    serial.write_hex(u64::from(desc.ty()));
    serial.write_str_raw(" PA=");
    serial.write_hex(desc.physical_start());
    serial.write_str_raw(" Pages=");
    serial.write_hex(desc.page_count());
    serial.write_str_raw(" Attr=");
    serial.write_hex(desc.attribute().bits());
    serial.write_str_raw("\n");
}

/// `Total=<hex> Usable=<hex> Runtime=<hex>`, all in pages.
pub fn write_summary<P: PortIo>(serial: &mut Serial<P>, summary: &MapSummary) {
    serial.write_str_raw("Total=");
    serial.write_hex(summary.total_pages);
    serial.write_str_raw(" Usable=");
    serial.write_hex(summary.usable_pages);
    serial.write_str_raw(" Runtime=");
    serial.write_hex(summary.runtime_pages);
    serial.write_str_raw("\n");
}
