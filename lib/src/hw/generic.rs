//! Generic fallback backend.
//!
//! For architectures this layer cannot drive (or does not know how to
//! yet): no identification instruction, no control registers. Queries
//! answer with safe defaults and writes are deliberate no-ops, so
//! initialization degrades to bookkeeping — a documented fallback, not a
//! defect.

use super::{CpuidRegs, HwAccess};
use crate::popcnt::kernighan;

#[derive(Clone, Copy, Debug, Default)]
pub struct GenericHw;

impl GenericHw {
    pub const fn new() -> Self {
        Self
    }
}

impl HwAccess for GenericHw {
    fn cpuid(&self, _leaf: u32, _subleaf: u32) -> Option<CpuidRegs> {
        None
    }

    fn read_cr0(&self) -> u64 {
        0
    }

    fn write_cr0(&self, _value: u64) {}

    fn read_cr4(&self) -> u64 {
        0
    }

    fn write_cr4(&self, _value: u64) {}

    fn read_xcr0(&self) -> u64 {
        0
    }

    fn write_xcr0(&self, _value: u64) {}

    fn fninit(&self) {}

    fn popcnt(&self, value: u64) -> u32 {
        // No accelerated instruction; the software count is the contract.
        kernighan(value)
    }

    fn pause(&self) {
        core::hint::spin_loop();
    }
}
