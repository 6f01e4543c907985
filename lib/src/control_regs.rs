//! Bit-packed views of the privileged control registers.
//!
//! Only the flag layouts live here — the instructions that move them in
//! and out of the register file are backend methods on
//! [`crate::hw::HwAccess`]. A snapshot is always transient: read, mutate
//! in memory, write back, never cached across the sequence.

use bitflags::bitflags;

bitflags! {
    /// Flags for the primary control register (CR0).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Cr0Flags: u64 {
        /// Protected Mode Enable.
        const PE = 1 << 0;
        /// Monitor Coprocessor.
        const MP = 1 << 1;
        /// Emulate Coprocessor (force x87 #NE).
        const EM = 1 << 2;
        /// Task Switched (set by hardware on task switch).
        const TS = 1 << 3;
        /// Extension Type (hardwired to 1 on modern CPUs).
        const ET = 1 << 4;
        /// Numeric Error (native x87 error reporting).
        const NE = 1 << 5;
        /// Write Protect (supervisor writes honor read-only pages).
        const WP = 1 << 16;
        /// Alignment Mask.
        const AM = 1 << 18;
        /// Not Write-through.
        const NW = 1 << 29;
        /// Cache Disable.
        const CD = 1 << 30;
        /// Paging Enable.
        const PG = 1 << 31;
    }
}

bitflags! {
    /// Flags for the secondary control register (CR4).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Cr4Flags: u64 {
        /// Virtual-8086 Mode Extensions.
        const VME = 1 << 0;
        /// Protected-Mode Virtual Interrupts.
        const PVI = 1 << 1;
        /// Time Stamp Disable (restrict RDTSC to ring 0).
        const TSD = 1 << 2;
        /// Debugging Extensions.
        const DE = 1 << 3;
        /// Page Size Extensions.
        const PSE = 1 << 4;
        /// Physical Address Extension.
        const PAE = 1 << 5;
        /// Machine Check Enable.
        const MCE = 1 << 6;
        /// Page Global Enable.
        const PGE = 1 << 7;
        /// Performance-Monitoring Counter Enable.
        const PCE = 1 << 8;
        /// OS support for FXSAVE/FXRSTOR.
        const OSFXSR = 1 << 9;
        /// OS support for unmasked SIMD floating-point exceptions.
        const OSXMMEXCPT = 1 << 10;
        /// User-Mode Instruction Prevention.
        const UMIP = 1 << 11;
        /// XSAVE and Processor Extended States Enable.
        const OSXSAVE = 1 << 18;
        /// Supervisor Mode Execution Prevention.
        const SMEP = 1 << 20;
        /// Supervisor Mode Access Prevention.
        const SMAP = 1 << 21;
    }
}

bitflags! {
    /// Feature-enable bits for the extended-state register (XCR0).
    ///
    /// XCR0 gates which state components the save/restore family manages.
    /// Writing it requires `Cr4Flags::OSXSAVE` to be set first, and bit 0
    /// must stay set — hardware enforces x87 state as always managed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Xcr0Flags: u64 {
        /// x87 FPU state (always set).
        const X87 = 1 << 0;
        /// SSE state: MXCSR + the XMM registers.
        const SSE = 1 << 1;
        /// AVX state: upper halves of the YMM registers.
        const AVX = 1 << 2;
        /// AVX-512 opmask registers (k0-k7).
        const OPMASK = 1 << 5;
        /// AVX-512 upper 256 bits of ZMM0-ZMM15.
        const ZMM_HI256 = 1 << 6;
        /// AVX-512 full ZMM16-ZMM31.
        const HI16_ZMM = 1 << 7;
    }
}

impl Xcr0Flags {
    /// Every component the AVX-512 tier needs enabled together.
    pub const AVX512_STATE: Xcr0Flags = Xcr0Flags::OPMASK
        .union(Xcr0Flags::ZMM_HI256)
        .union(Xcr0Flags::HI16_ZMM);
}
