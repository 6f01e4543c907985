//! Feature detection and the per-architecture feature catalog.
//!
//! Detection is a pure read of the identification leaves — it reports what
//! the silicon is *capable* of, not what is enabled, and is safe to call
//! before initialization.

use cpuhal_abi::CpuFeature;

use crate::cpuid::{
    CPUID_EXT_FEAT_ECX_FMA4, CPUID_EXT_FEAT_ECX_SSE4A, CPUID_EXT_FEAT_EDX_NX,
    CPUID_FEAT_ECX_AVX, CPUID_FEAT_ECX_CX16, CPUID_FEAT_ECX_FMA, CPUID_FEAT_ECX_MONITOR,
    CPUID_FEAT_ECX_OSXSAVE, CPUID_FEAT_ECX_POPCNT, CPUID_FEAT_ECX_RDRND, CPUID_FEAT_ECX_SSE3,
    CPUID_FEAT_ECX_SSE41, CPUID_FEAT_ECX_SSE42, CPUID_FEAT_ECX_SSSE3, CPUID_FEAT_ECX_XSAVE,
    CPUID_FEAT_EDX_CX8, CPUID_FEAT_EDX_FPU, CPUID_FEAT_EDX_FXSR, CPUID_FEAT_EDX_MMX,
    CPUID_FEAT_EDX_SSE, CPUID_FEAT_EDX_SSE2, CPUID_FEAT_EDX_TSC, CPUID_LEAF_EXT_INFO,
    CPUID_LEAF_FEATURES, CPUID_LEAF_STRUCTURED_EXT, CPUID_SEXT_EBX_AVX2, CPUID_SEXT_EBX_AVX512F,
    CPUID_SEXT_EBX_RDSEED, max_basic_leaf, max_extended_leaf,
};
use crate::hw::HwAccess;

/// Leaf 1 EDX bit → catalog bit.
const LEAF1_EDX: &[(u32, CpuFeature)] = &[
    (CPUID_FEAT_EDX_FPU, CpuFeature::X87),
    (CPUID_FEAT_EDX_TSC, CpuFeature::RDTSC),
    (CPUID_FEAT_EDX_CX8, CpuFeature::CX8),
    (CPUID_FEAT_EDX_MMX, CpuFeature::MMX),
    (CPUID_FEAT_EDX_FXSR, CpuFeature::FXSR),
    (CPUID_FEAT_EDX_SSE, CpuFeature::SSE),
    (CPUID_FEAT_EDX_SSE2, CpuFeature::SSE2),
];

/// Leaf 1 ECX bit → catalog bit.
const LEAF1_ECX: &[(u32, CpuFeature)] = &[
    (CPUID_FEAT_ECX_SSE3, CpuFeature::SSE3),
    (CPUID_FEAT_ECX_MONITOR, CpuFeature::MONITOR),
    (CPUID_FEAT_ECX_SSSE3, CpuFeature::SSSE3),
    (CPUID_FEAT_ECX_FMA, CpuFeature::FMA3),
    (CPUID_FEAT_ECX_CX16, CpuFeature::CX16),
    (CPUID_FEAT_ECX_SSE41, CpuFeature::SSE4_1),
    (CPUID_FEAT_ECX_SSE42, CpuFeature::SSE4_2),
    (CPUID_FEAT_ECX_POPCNT, CpuFeature::POPCNT),
    (CPUID_FEAT_ECX_XSAVE, CpuFeature::XSAVE),
    (CPUID_FEAT_ECX_OSXSAVE, CpuFeature::OSXSAVE),
    (CPUID_FEAT_ECX_AVX, CpuFeature::AVX),
    (CPUID_FEAT_ECX_RDRND, CpuFeature::RDRND),
];

/// Leaf 7 subleaf 0 EBX bit → catalog bit.
const LEAF7_EBX: &[(u32, CpuFeature)] = &[
    (CPUID_SEXT_EBX_AVX2, CpuFeature::AVX2),
    (CPUID_SEXT_EBX_AVX512F, CpuFeature::AVX512),
    (CPUID_SEXT_EBX_RDSEED, CpuFeature::RDSEED),
];

/// Extended leaf 0x80000001 ECX bit → catalog bit (AMD extensions).
const EXT1_ECX: &[(u32, CpuFeature)] = &[
    (CPUID_EXT_FEAT_ECX_SSE4A, CpuFeature::SSE4A),
    (CPUID_EXT_FEAT_ECX_FMA4, CpuFeature::FMA4),
];

/// Extended leaf 0x80000001 EDX bit → catalog bit.
const EXT1_EDX: &[(u32, CpuFeature)] = &[(CPUID_EXT_FEAT_EDX_NX, CpuFeature::NX)];

fn collect(register: u32, table: &[(u32, CpuFeature)]) -> CpuFeature {
    let mut features = CpuFeature::empty();
    for (bit, feature) in table {
        if register & bit != 0 {
            features.insert(*feature);
        }
    }
    features
}

/// Everything the processor behind `hw` is capable of.
///
/// Backends without an identification instruction report the
/// architecture's baseline instead of guessing: NEON on aarch64 (mandatory
/// there), empty elsewhere.
pub fn detect<H: HwAccess>(hw: &H) -> CpuFeature {
    if hw.cpuid(crate::cpuid::CPUID_LEAF_BASE, 0).is_none() {
        return baseline();
    }

    let mut features = CpuFeature::empty();
    let max_leaf = max_basic_leaf(hw);

    if max_leaf >= CPUID_LEAF_FEATURES
        && let Some(regs) = hw.cpuid(CPUID_LEAF_FEATURES, 0)
    {
        features |= collect(regs.edx, LEAF1_EDX);
        features |= collect(regs.ecx, LEAF1_ECX);
    }

    if max_leaf >= CPUID_LEAF_STRUCTURED_EXT
        && let Some(regs) = hw.cpuid(CPUID_LEAF_STRUCTURED_EXT, 0)
    {
        features |= collect(regs.ebx, LEAF7_EBX);
    }

    if max_extended_leaf(hw) >= CPUID_LEAF_EXT_INFO
        && let Some(regs) = hw.cpuid(CPUID_LEAF_EXT_INFO, 0)
    {
        features |= collect(regs.ecx, EXT1_ECX);
        features |= collect(regs.edx, EXT1_EDX);
    }

    features
}

#[cfg(target_arch = "aarch64")]
fn baseline() -> CpuFeature {
    CpuFeature::NEON
}

#[cfg(not(target_arch = "aarch64"))]
fn baseline() -> CpuFeature {
    CpuFeature::empty()
}

/// The static list of features this build can detect, for iteration and
/// display: architecture tiers first, then the general-purpose group.
pub fn known_features() -> &'static [CpuFeature] {
    KNOWN_FEATURES
}

/// Number of entries in [`known_features`].
pub fn known_feature_count() -> usize {
    KNOWN_FEATURES.len()
}

#[cfg(target_arch = "x86_64")]
const KNOWN_FEATURES: &[CpuFeature] = &[
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
    CpuFeature::CX8,
    CpuFeature::CX16,
    CpuFeature::MONITOR,
    // General-purpose group, abstracted across architectures.
    CpuFeature::POPCNT,
    CpuFeature::NX,
    CpuFeature::RDRND,
    CpuFeature::RDSEED,
    CpuFeature::RDTSC,
];

#[cfg(target_arch = "aarch64")]
const KNOWN_FEATURES: &[CpuFeature] = &[
    CpuFeature::NEON,
    CpuFeature::POPCNT,
    CpuFeature::NX,
    CpuFeature::RDRND,
    CpuFeature::RDSEED,
    CpuFeature::RDTSC,
];

#[cfg(any(target_arch = "riscv64", target_arch = "riscv32"))]
const KNOWN_FEATURES: &[CpuFeature] = &[
    CpuFeature::RVV,
    CpuFeature::POPCNT,
    CpuFeature::NX,
    CpuFeature::RDRND,
    CpuFeature::RDSEED,
    CpuFeature::RDTSC,
];

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "riscv64",
    target_arch = "riscv32"
)))]
const KNOWN_FEATURES: &[CpuFeature] = &[
    CpuFeature::POPCNT,
    CpuFeature::NX,
    CpuFeature::RDRND,
    CpuFeature::RDSEED,
    CpuFeature::RDTSC,
];

/// Native general-purpose register width in bits.
pub fn gpr_width() -> usize {
    usize::BITS as usize
}

/// Widest vector register the detected mask implies, falling back to the
/// general-purpose width when no vector tier is present.
pub fn vr_width(features: CpuFeature) -> usize {
    if features.contains(CpuFeature::AVX512) {
        512
    } else if features.contains(CpuFeature::AVX) {
        256
    } else if features.contains(CpuFeature::SSE) || features.contains(CpuFeature::NEON) {
        128
    } else if features.contains(CpuFeature::MMX) {
        64
    } else {
        gpr_width()
    }
}
