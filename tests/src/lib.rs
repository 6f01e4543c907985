//! Software model of the hardware access seam.
//!
//! [`SimHw`] implements [`HwAccess`] over a simulated register file and a
//! programmable CPUID table, so the detection and initialization state
//! machines can be exercised on any host, against any vendor signature or
//! feature mix, without touching privileged state. Every side-effecting
//! call is journalled for order assertions.

use std::cell::{Cell, RefCell};

use cpuhal::cpuid::{
    CPUID_EXT_FEAT_ECX_FMA4, CPUID_EXT_FEAT_ECX_SSE4A, CPUID_EXT_FEAT_EDX_NX,
    CPUID_FEAT_ECX_AVX, CPUID_FEAT_ECX_CX16, CPUID_FEAT_ECX_FMA, CPUID_FEAT_ECX_MONITOR,
    CPUID_FEAT_ECX_POPCNT, CPUID_FEAT_ECX_RDRND, CPUID_FEAT_ECX_SSE3, CPUID_FEAT_ECX_SSE41,
    CPUID_FEAT_ECX_SSE42, CPUID_FEAT_ECX_SSSE3, CPUID_FEAT_ECX_XSAVE, CPUID_FEAT_EDX_CX8,
    CPUID_FEAT_EDX_FPU, CPUID_FEAT_EDX_FXSR, CPUID_FEAT_EDX_MMX, CPUID_FEAT_EDX_SSE,
    CPUID_FEAT_EDX_SSE2, CPUID_FEAT_EDX_TSC, CPUID_LEAF_BASE, CPUID_LEAF_EXT_BASE,
    CPUID_LEAF_EXT_INFO, CPUID_LEAF_FEATURES, CPUID_LEAF_STRUCTURED_EXT, CPUID_SEXT_EBX_AVX2,
    CPUID_SEXT_EBX_AVX512F, CPUID_SEXT_EBX_RDSEED,
};
use cpuhal::hw::{CpuidRegs, HwAccess};

/// One journalled side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwEvent {
    Fninit,
    WriteCr0(u64),
    WriteCr4(u64),
    WriteXcr0(u64),
}

/// Simulated processor: register cells plus a fixed CPUID response table.
pub struct SimHw {
    cr0: Cell<u64>,
    cr4: Cell<u64>,
    xcr0: Cell<u64>,
    has_cpuid: bool,
    vendor: [u8; 12],
    max_leaf: u32,
    leaf1_ecx: u32,
    leaf1_edx: u32,
    leaf7_ebx: u32,
    max_ext_leaf: u32,
    ext1_ecx: u32,
    ext1_edx: u32,
    events: RefCell<Vec<HwEvent>>,
}

impl SimHw {
    /// Bare machine: CPUID present, vendor set, no feature bits.
    pub fn with_vendor(vendor: [u8; 12]) -> Self {
        Self {
            cr0: Cell::new(0),
            cr4: Cell::new(0),
            xcr0: Cell::new(0),
            has_cpuid: true,
            vendor,
            max_leaf: CPUID_LEAF_STRUCTURED_EXT,
            leaf1_ecx: 0,
            leaf1_edx: 0,
            leaf7_ebx: 0,
            max_ext_leaf: CPUID_LEAF_EXT_INFO,
            ext1_ecx: 0,
            ext1_edx: 0,
            events: RefCell::new(Vec::new()),
        }
    }

    /// A modern Intel-signature machine with the full vector stack
    /// through AVX-512.
    pub fn intel_avx512() -> Self {
        let mut sim = Self::with_vendor(*b"GenuineIntel");
        sim.leaf1_edx = CPUID_FEAT_EDX_FPU
            | CPUID_FEAT_EDX_TSC
            | CPUID_FEAT_EDX_CX8
            | CPUID_FEAT_EDX_MMX
            | CPUID_FEAT_EDX_FXSR
            | CPUID_FEAT_EDX_SSE
            | CPUID_FEAT_EDX_SSE2;
        sim.leaf1_ecx = CPUID_FEAT_ECX_SSE3
            | CPUID_FEAT_ECX_MONITOR
            | CPUID_FEAT_ECX_SSSE3
            | CPUID_FEAT_ECX_FMA
            | CPUID_FEAT_ECX_CX16
            | CPUID_FEAT_ECX_SSE41
            | CPUID_FEAT_ECX_SSE42
            | CPUID_FEAT_ECX_POPCNT
            | CPUID_FEAT_ECX_XSAVE
            | CPUID_FEAT_ECX_AVX
            | CPUID_FEAT_ECX_RDRND;
        sim.leaf7_ebx = CPUID_SEXT_EBX_AVX2 | CPUID_SEXT_EBX_AVX512F | CPUID_SEXT_EBX_RDSEED;
        sim.ext1_edx = CPUID_EXT_FEAT_EDX_NX;
        sim
    }

    /// An AMD machine carrying the vendor-extension bits (SSE4a, FMA4).
    pub fn amd_with_extensions() -> Self {
        let mut sim = Self::with_vendor(*b"AuthenticAMD");
        sim.leaf1_edx = CPUID_FEAT_EDX_FPU
            | CPUID_FEAT_EDX_TSC
            | CPUID_FEAT_EDX_MMX
            | CPUID_FEAT_EDX_FXSR
            | CPUID_FEAT_EDX_SSE
            | CPUID_FEAT_EDX_SSE2;
        sim.leaf1_ecx = CPUID_FEAT_ECX_SSE3 | CPUID_FEAT_ECX_POPCNT;
        sim.ext1_ecx = CPUID_EXT_FEAT_ECX_SSE4A | CPUID_EXT_FEAT_ECX_FMA4;
        sim.ext1_edx = CPUID_EXT_FEAT_EDX_NX;
        sim
    }

    /// A legacy processor that stops at leaf 1: no structured-extended or
    /// vendor-extension leaves.
    pub fn legacy_x87_only() -> Self {
        let mut sim = Self::with_vendor(*b"AMDisbetter!");
        sim.max_leaf = CPUID_LEAF_FEATURES;
        sim.max_ext_leaf = 0;
        sim.leaf1_edx = CPUID_FEAT_EDX_FPU | CPUID_FEAT_EDX_MMX;
        // Structured-extended bits that must stay invisible behind the
        // max-leaf guard.
        sim.leaf7_ebx = CPUID_SEXT_EBX_AVX2;
        sim
    }

    /// An architecture without an identification instruction.
    pub fn no_cpuid() -> Self {
        let mut sim = Self::with_vendor([0; 12]);
        sim.has_cpuid = false;
        sim
    }

    pub fn cr0(&self) -> u64 {
        self.cr0.get()
    }

    pub fn cr4(&self) -> u64 {
        self.cr4.get()
    }

    pub fn xcr0(&self) -> u64 {
        self.xcr0.get()
    }

    /// Journal of side-effecting calls, in issue order.
    pub fn events(&self) -> Vec<HwEvent> {
        self.events.borrow().clone()
    }

    pub fn fninit_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == HwEvent::Fninit)
            .count()
    }
}

impl HwAccess for SimHw {
    fn cpuid(&self, leaf: u32, subleaf: u32) -> Option<CpuidRegs> {
        if !self.has_cpuid {
            return None;
        }
        let regs = match (leaf, subleaf) {
            (CPUID_LEAF_BASE, _) => CpuidRegs {
                eax: self.max_leaf,
                ebx: u32::from_le_bytes(self.vendor[0..4].try_into().unwrap()),
                edx: u32::from_le_bytes(self.vendor[4..8].try_into().unwrap()),
                ecx: u32::from_le_bytes(self.vendor[8..12].try_into().unwrap()),
            },
            (CPUID_LEAF_FEATURES, _) => CpuidRegs {
                eax: 0,
                ebx: 0,
                ecx: self.leaf1_ecx,
                edx: self.leaf1_edx,
            },
            (CPUID_LEAF_STRUCTURED_EXT, 0) => CpuidRegs {
                eax: 0,
                ebx: self.leaf7_ebx,
                ecx: 0,
                edx: 0,
            },
            (CPUID_LEAF_EXT_BASE, _) => CpuidRegs {
                eax: self.max_ext_leaf,
                ebx: 0,
                ecx: 0,
                edx: 0,
            },
            (CPUID_LEAF_EXT_INFO, _) => CpuidRegs {
                eax: 0,
                ebx: 0,
                ecx: self.ext1_ecx,
                edx: self.ext1_edx,
            },
            _ => CpuidRegs::default(),
        };
        Some(regs)
    }

    fn read_cr0(&self) -> u64 {
        self.cr0.get()
    }

    fn write_cr0(&self, value: u64) {
        self.events.borrow_mut().push(HwEvent::WriteCr0(value));
        self.cr0.set(value);
    }

    fn read_cr4(&self) -> u64 {
        self.cr4.get()
    }

    fn write_cr4(&self, value: u64) {
        self.events.borrow_mut().push(HwEvent::WriteCr4(value));
        self.cr4.set(value);
    }

    fn read_xcr0(&self) -> u64 {
        self.xcr0.get()
    }

    fn write_xcr0(&self, value: u64) {
        self.events.borrow_mut().push(HwEvent::WriteXcr0(value));
        self.xcr0.set(value);
    }

    fn fninit(&self) {
        self.events.borrow_mut().push(HwEvent::Fninit);
    }

    fn popcnt(&self, value: u64) -> u32 {
        // The model's "accelerated" instruction is an exact bit count.
        value.count_ones()
    }

    fn pause(&self) {}
}
