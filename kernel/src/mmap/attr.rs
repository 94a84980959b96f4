use bitflags::bitflags;

bitflags! {
    /// EFI_MEMORY_* attribute bits. Unknown bits are kept as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemoryAttribute: u64 {
        const UC = 1 << 0;
        const WC = 1 << 1;
        const WT = 1 << 2;
        const WB = 1 << 3;
        const UCE = 1 << 4;
        const WP = 1 << 12;
        const RP = 1 << 13;
        const XP = 1 << 14;
        const NV = 1 << 15;
        const MORE_RELIABLE = 1 << 16;
        const RO = 1 << 17;
        const SP = 1 << 18;
        const CPU_CRYPTO = 1 << 19;
        const ISA_VALID = 1 << 62;
        /// Region must be mapped for runtime services after ExitBootServices.
        const RUNTIME = 1 << 63;
    }
}
