//! CPU feature bitmask.
//!
//! One bit per named capability. Bit positions are stable constants within
//! a build — boot code may persist a mask across the firmware-to-kernel
//! handoff and replay it into `init` on every core.

use bitflags::bitflags;

bitflags! {
    /// Set of processor capabilities, packed one bit per feature.
    ///
    /// `CpuFeature::empty()` is the "none" value. A feature is present iff
    /// its bit is set; union/intersection are plain bitwise ops.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CpuFeature: u32 {
        /// Legacy x87 floating-point unit.
        const X87 = 1 << 0;
        /// MMX technology (64-bit packed integer SIMD).
        const MMX = 1 << 1;
        /// Streaming SIMD Extensions.
        const SSE = 1 << 2;
        const SSE2 = 1 << 3;
        const SSE3 = 1 << 4;
        /// Supplemental SSE3.
        const SSSE3 = 1 << 5;
        const SSE4_1 = 1 << 6;
        const SSE4_2 = 1 << 7;
        /// AMD SSE4a extensions.
        const SSE4A = 1 << 8;
        /// Advanced Vector Extensions (256-bit).
        const AVX = 1 << 9;
        const AVX2 = 1 << 10;
        /// AVX-512 Foundation (512-bit).
        const AVX512 = 1 << 11;
        /// Fused multiply-add, three-operand form.
        const FMA3 = 1 << 12;
        /// Fused multiply-add, four-operand form (AMD).
        const FMA4 = 1 << 13;
        /// XSAVE/XRSTOR extended state save/restore.
        const XSAVE = 1 << 14;
        /// OS has enabled XSAVE (CR4.OSXSAVE visible to userland).
        const OSXSAVE = 1 << 15;
        /// FXSAVE/FXRSTOR legacy save/restore pair.
        const FXSR = 1 << 16;
        /// No-execute page protection.
        const NX = 1 << 17;
        /// RDRAND hardware random number generator.
        const RDRND = 1 << 18;
        /// Timestamp counter (RDTSC).
        const RDTSC = 1 << 19;
        /// CMPXCHG8B (8-byte compare-exchange).
        const CX8 = 1 << 20;
        /// CMPXCHG16B (16-byte compare-exchange).
        const CX16 = 1 << 21;
        /// MONITOR/MWAIT instructions.
        const MONITOR = 1 << 22;
        /// POPCNT population-count instruction.
        const POPCNT = 1 << 23;
        /// ARM Advanced SIMD (NEON).
        const NEON = 1 << 24;
        /// RISC-V vector extension.
        const RVV = 1 << 25;
        /// RDSEED hardware entropy source.
        const RDSEED = 1 << 26;
    }
}

impl CpuFeature {
    /// Every single-bit value that has a display name, in bit order.
    pub const NAMED: &'static [CpuFeature] = &[
        CpuFeature::X87,
        CpuFeature::MMX,
        CpuFeature::SSE,
        CpuFeature::SSE2,
        CpuFeature::SSE3,
        CpuFeature::SSSE3,
        CpuFeature::SSE4_1,
        CpuFeature::SSE4_2,
        CpuFeature::SSE4A,
        CpuFeature::AVX,
        CpuFeature::AVX2,
        CpuFeature::AVX512,
        CpuFeature::FMA3,
        CpuFeature::FMA4,
        CpuFeature::XSAVE,
        CpuFeature::OSXSAVE,
        CpuFeature::FXSR,
        CpuFeature::NX,
        CpuFeature::RDRND,
        CpuFeature::RDTSC,
        CpuFeature::CX8,
        CpuFeature::CX16,
        CpuFeature::MONITOR,
        CpuFeature::POPCNT,
        CpuFeature::NEON,
        CpuFeature::RVV,
        CpuFeature::RDSEED,
    ];

    /// Display name for a single feature bit.
    ///
    /// Total: multi-bit masks and unassigned bits return `"Unknown"`.
    pub fn name(self) -> &'static str {
        match self.bits() {
            v if v == CpuFeature::X87.bits() => "x87",
            v if v == CpuFeature::MMX.bits() => "MMX",
            v if v == CpuFeature::SSE.bits() => "SSE",
            v if v == CpuFeature::SSE2.bits() => "SSE2",
            v if v == CpuFeature::SSE3.bits() => "SSE3",
            v if v == CpuFeature::SSSE3.bits() => "SSSE3",
            v if v == CpuFeature::SSE4_1.bits() => "SSE4.1",
            v if v == CpuFeature::SSE4_2.bits() => "SSE4.2",
            v if v == CpuFeature::SSE4A.bits() => "SSE4a",
            v if v == CpuFeature::AVX.bits() => "AVX",
            v if v == CpuFeature::AVX2.bits() => "AVX2",
            v if v == CpuFeature::AVX512.bits() => "AVX512F",
            v if v == CpuFeature::FMA3.bits() => "FMA3",
            v if v == CpuFeature::FMA4.bits() => "FMA4",
            v if v == CpuFeature::XSAVE.bits() => "XSAVE",
            v if v == CpuFeature::OSXSAVE.bits() => "OSXSAVE",
            v if v == CpuFeature::FXSR.bits() => "FXSR",
            v if v == CpuFeature::NX.bits() => "NX",
            v if v == CpuFeature::RDRND.bits() => "RDRND",
            v if v == CpuFeature::RDTSC.bits() => "RDTSC",
            v if v == CpuFeature::CX8.bits() => "CX8",
            v if v == CpuFeature::CX16.bits() => "CX16",
            v if v == CpuFeature::MONITOR.bits() => "MONITOR",
            v if v == CpuFeature::POPCNT.bits() => "POPCNT",
            v if v == CpuFeature::NEON.bits() => "NEON",
            v if v == CpuFeature::RVV.bits() => "RVV",
            v if v == CpuFeature::RDSEED.bits() => "RDSEED",
            _ => "Unknown",
        }
    }
}
