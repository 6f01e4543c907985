//! CPUID leaf numbers and the feature-flag bit positions this layer reads.
//!
//! Only flags actually referenced by detection are defined here. Add new
//! constants as needed when extending the feature catalog.

use crate::hw::HwAccess;

// =============================================================================
// CPUID Leaf Numbers
// =============================================================================

/// Base leaf: highest supported basic leaf + the 12-byte vendor signature.
pub const CPUID_LEAF_BASE: u32 = 0x00;

/// Basic CPU information and feature flags.
pub const CPUID_LEAF_FEATURES: u32 = 0x01;

/// Structured extended feature flags (subleaf 0).
pub const CPUID_LEAF_STRUCTURED_EXT: u32 = 0x07;

/// Extended function range base: highest supported extended leaf.
pub const CPUID_LEAF_EXT_BASE: u32 = 0x8000_0000;

/// Extended function information (vendor-extension bits).
pub const CPUID_LEAF_EXT_INFO: u32 = 0x8000_0001;

// =============================================================================
// CPUID Leaf 1 - EDX Feature Flags
// =============================================================================

/// Floating Point Unit on-chip.
pub const CPUID_FEAT_EDX_FPU: u32 = 1 << 0;

/// Time Stamp Counter.
pub const CPUID_FEAT_EDX_TSC: u32 = 1 << 4;

/// CMPXCHG8B instruction.
pub const CPUID_FEAT_EDX_CX8: u32 = 1 << 8;

/// MMX technology.
pub const CPUID_FEAT_EDX_MMX: u32 = 1 << 23;

/// FXSAVE/FXRSTOR instructions.
pub const CPUID_FEAT_EDX_FXSR: u32 = 1 << 24;

/// SSE extensions.
pub const CPUID_FEAT_EDX_SSE: u32 = 1 << 25;

/// SSE2 extensions.
pub const CPUID_FEAT_EDX_SSE2: u32 = 1 << 26;

// =============================================================================
// CPUID Leaf 1 - ECX Feature Flags
// =============================================================================

/// SSE3 extensions.
pub const CPUID_FEAT_ECX_SSE3: u32 = 1 << 0;

/// MONITOR/MWAIT instructions.
pub const CPUID_FEAT_ECX_MONITOR: u32 = 1 << 3;

/// Supplemental SSE3 (SSSE3).
pub const CPUID_FEAT_ECX_SSSE3: u32 = 1 << 9;

/// Fused multiply-add (three-operand form).
pub const CPUID_FEAT_ECX_FMA: u32 = 1 << 12;

/// CMPXCHG16B instruction.
pub const CPUID_FEAT_ECX_CX16: u32 = 1 << 13;

/// SSE4.1 extensions.
pub const CPUID_FEAT_ECX_SSE41: u32 = 1 << 19;

/// SSE4.2 extensions.
pub const CPUID_FEAT_ECX_SSE42: u32 = 1 << 20;

/// POPCNT instruction.
pub const CPUID_FEAT_ECX_POPCNT: u32 = 1 << 23;

/// XSAVE/XRSTOR instructions.
pub const CPUID_FEAT_ECX_XSAVE: u32 = 1 << 26;

/// OS has enabled XSAVE via CR4.OSXSAVE.
pub const CPUID_FEAT_ECX_OSXSAVE: u32 = 1 << 27;

/// AVX extensions.
pub const CPUID_FEAT_ECX_AVX: u32 = 1 << 28;

/// RDRAND instruction.
pub const CPUID_FEAT_ECX_RDRND: u32 = 1 << 30;

// =============================================================================
// CPUID Leaf 7 (Subleaf 0) - EBX Structured Extended Feature Flags
// =============================================================================

/// AVX2 extensions.
pub const CPUID_SEXT_EBX_AVX2: u32 = 1 << 5;

/// AVX-512 Foundation.
pub const CPUID_SEXT_EBX_AVX512F: u32 = 1 << 16;

/// RDSEED instruction.
pub const CPUID_SEXT_EBX_RDSEED: u32 = 1 << 18;

// =============================================================================
// CPUID Extended Leaf 0x80000001 - ECX Flags
// =============================================================================

/// SSE4a extensions (AMD).
pub const CPUID_EXT_FEAT_ECX_SSE4A: u32 = 1 << 6;

/// Fused multiply-add, four-operand form (AMD).
pub const CPUID_EXT_FEAT_ECX_FMA4: u32 = 1 << 16;

// =============================================================================
// CPUID Extended Leaf 0x80000001 - EDX Flags
// =============================================================================

/// Execute Disable bit.
pub const CPUID_EXT_FEAT_EDX_NX: u32 = 1 << 20;

// =============================================================================
// Range queries
// =============================================================================

/// Highest supported basic leaf, 0 when there is no CPUID at all.
pub fn max_basic_leaf<H: HwAccess>(hw: &H) -> u32 {
    hw.cpuid(CPUID_LEAF_BASE, 0).map_or(0, |regs| regs.eax)
}

/// Highest supported extended leaf, 0 when the extended range is absent.
pub fn max_extended_leaf<H: HwAccess>(hw: &H) -> u32 {
    match hw.cpuid(CPUID_LEAF_EXT_BASE, 0) {
        Some(regs) if regs.eax >= CPUID_LEAF_EXT_BASE => regs.eax,
        _ => 0,
    }
}
