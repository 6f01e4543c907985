//! x86_64 backend: CPUID, control registers, XGETBV/XSETBV, FNINIT,
//! POPCNT, PAUSE/HLT.

use core::arch::asm;

use super::{CpuidRegs, HwAccess};
use crate::control_regs::Cr4Flags;

#[inline(always)]
fn read_cr0() -> u64 {
    let value: u64;
    unsafe {
        asm!("mov {}, cr0", out(reg) value, options(nomem, nostack, preserves_flags));
    }
    value
}

#[inline(always)]
fn write_cr0(value: u64) {
    unsafe {
        asm!("mov cr0, {}", in(reg) value, options(nostack, preserves_flags));
    }
}

#[inline(always)]
fn read_cr4() -> u64 {
    let value: u64;
    unsafe {
        asm!("mov {}, cr4", out(reg) value, options(nomem, nostack, preserves_flags));
    }
    value
}

#[inline(always)]
fn write_cr4(value: u64) {
    unsafe {
        asm!("mov cr4, {}", in(reg) value, options(nostack, preserves_flags));
    }
}

/// Read XCR0 via `XGETBV`. Caller must have checked CR4.OSXSAVE; the
/// instruction is #UD otherwise.
#[inline(always)]
fn xcr0_read() -> u64 {
    let lo: u32;
    let hi: u32;
    // ECX = 0 selects XCR0.
    unsafe {
        asm!(
            "xgetbv",
            in("ecx") 0u32,
            out("eax") lo,
            out("edx") hi,
            options(nomem, nostack, preserves_flags),
        );
    }
    ((hi as u64) << 32) | (lo as u64)
}

/// Write XCR0 via `XSETBV`. Same CR4.OSXSAVE precondition as [`xcr0_read`];
/// bit 0 (x87) must stay set and only CPUID-reported bits may be written.
#[inline(always)]
fn xcr0_write(value: u64) {
    let lo = value as u32;
    let hi = (value >> 32) as u32;
    // ECX = 0 selects XCR0.
    unsafe {
        asm!(
            "xsetbv",
            in("ecx") 0u32,
            in("eax") lo,
            in("edx") hi,
            options(nomem, nostack, preserves_flags),
        );
    }
}

#[inline(always)]
fn fninit() {
    unsafe {
        asm!("fninit", options(nomem, nostack));
    }
}

#[inline(always)]
fn popcnt(value: u64) -> u64 {
    let result: u64;
    // POPCNT writes ZF/CF; no preserves_flags.
    unsafe {
        asm!("popcnt {}, {}", out(reg) result, in(reg) value, options(nomem, nostack));
    }
    result
}

/// Execute the PAUSE instruction (spin-loop hint).
#[inline(always)]
fn pause() {
    unsafe {
        asm!("pause", options(nomem, nostack, preserves_flags));
    }
}

/// Execute the HLT instruction, halting the CPU until the next interrupt.
#[inline(always)]
fn hlt() {
    unsafe {
        asm!("hlt", options(nomem, nostack, preserves_flags));
    }
}

/// Production backend for x86_64.
///
/// A zero-sized handle; all state lives in the processor's register file.
#[derive(Clone, Copy, Debug, Default)]
pub struct X86Hw;

impl X86Hw {
    pub const fn new() -> Self {
        Self
    }
}

impl HwAccess for X86Hw {
    fn cpuid(&self, leaf: u32, subleaf: u32) -> Option<CpuidRegs> {
        let res = unsafe { core::arch::x86_64::__cpuid_count(leaf, subleaf) };
        Some(CpuidRegs {
            eax: res.eax,
            ebx: res.ebx,
            ecx: res.ecx,
            edx: res.edx,
        })
    }

    fn read_cr0(&self) -> u64 {
        read_cr0()
    }

    fn write_cr0(&self, value: u64) {
        write_cr0(value);
    }

    fn read_cr4(&self) -> u64 {
        read_cr4()
    }

    fn write_cr4(&self, value: u64) {
        write_cr4(value);
    }

    fn read_xcr0(&self) -> u64 {
        if read_cr4() & Cr4Flags::OSXSAVE.bits() == 0 {
            return 0;
        }
        xcr0_read()
    }

    fn write_xcr0(&self, value: u64) {
        if read_cr4() & Cr4Flags::OSXSAVE.bits() == 0 {
            return;
        }
        xcr0_write(value);
    }

    fn fninit(&self) {
        fninit();
    }

    fn popcnt(&self, value: u64) -> u32 {
        popcnt(value) as u32
    }

    fn pause(&self) {
        pause();
    }

    fn halt(&self) -> ! {
        loop {
            hlt();
        }
    }
}
