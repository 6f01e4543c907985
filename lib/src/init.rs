//! The ordered feature-activation sequence.
//!
//! Hardware prerequisites are encoded as a fixed table walked in order:
//! a step fires only when the *requested* mask contains every bit of its
//! pair. Requesting a higher tier without its prerequisite in the same
//! call skips that tier's setup — that is the documented caller contract,
//! not something this walk infers or repairs.
//!
//! Order matters: extended state saving is switched on before anything
//! touches the extended-state register, the legacy save/restore pair and
//! FPU come before the vector tiers, and the AVX tiers assume the SSE
//! steps already ran.

use cpuhal_abi::CpuFeature;

use crate::control_regs::{Cr0Flags, Cr4Flags, Xcr0Flags};
use crate::hw::HwAccess;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    EnableXsave,
    EnableFxsr,
    InitFpu,
    EnableSseState,
    EnableAvxState,
    EnableAvx512State,
}

struct InitStep {
    requires: CpuFeature,
    action: Action,
}

const fn step(requires: CpuFeature, action: Action) -> InitStep {
    InitStep { requires, action }
}

#[cfg(target_arch = "x86_64")]
const INIT_STEPS: &[InitStep] = &[
    step(CpuFeature::XSAVE, Action::EnableXsave),
    step(CpuFeature::FXSR, Action::EnableFxsr),
    step(CpuFeature::X87, Action::InitFpu),
    step(CpuFeature::X87.union(CpuFeature::MMX), Action::InitFpu),
    step(CpuFeature::MMX.union(CpuFeature::SSE), Action::EnableSseState),
    step(CpuFeature::SSE.union(CpuFeature::SSE2), Action::EnableSseState),
    step(CpuFeature::SSE2.union(CpuFeature::SSE3), Action::EnableSseState),
    step(CpuFeature::SSE3.union(CpuFeature::SSSE3), Action::EnableSseState),
    step(CpuFeature::SSSE3.union(CpuFeature::SSE4_1), Action::EnableSseState),
    step(CpuFeature::SSE4_1.union(CpuFeature::SSE4_2), Action::EnableSseState),
    step(CpuFeature::SSE4_2.union(CpuFeature::SSE4A), Action::EnableSseState),
    step(CpuFeature::SSE4_2.union(CpuFeature::AVX), Action::EnableAvxState),
    step(CpuFeature::AVX.union(CpuFeature::AVX2), Action::EnableAvxState),
    step(CpuFeature::AVX2.union(CpuFeature::AVX512), Action::EnableAvx512State),
];

// No control registers to drive: initialization degrades to recording the
// requested mask, a deliberate fallback on these targets.
#[cfg(not(target_arch = "x86_64"))]
const INIT_STEPS: &[InitStep] = &[];

/// Walk the activation table for `requested`. Idempotence and the
/// enabled-mask bookkeeping live in [`crate::Cpu::init`]; this is only
/// the hardware side.
pub(crate) fn run<H: HwAccess>(hw: &H, requested: CpuFeature) {
    for init_step in INIT_STEPS {
        if requested.contains(init_step.requires) {
            apply(hw, init_step.action);
        }
    }
}

fn apply<H: HwAccess>(hw: &H, action: Action) {
    match action {
        Action::EnableXsave => enable_xsave(hw),
        Action::EnableFxsr => enable_fxsr(hw),
        Action::InitFpu => init_fpu(hw),
        Action::EnableSseState => enable_sse_state(hw),
        Action::EnableAvxState => mark_xstate(hw, Xcr0Flags::AVX),
        Action::EnableAvx512State => mark_xstate(hw, Xcr0Flags::AVX512_STATE),
    }
}

/// Switch on extended state saving (CR4.OSXSAVE) if it is not already on.
fn enable_xsave<H: HwAccess>(hw: &H) {
    let cr4 = hw.read_cr4();
    if cr4 & Cr4Flags::OSXSAVE.bits() == 0 {
        hw.write_cr4(cr4 | Cr4Flags::OSXSAVE.bits());
    }
}

/// Enable the legacy FXSAVE/FXRSTOR pair if it is not already enabled.
fn enable_fxsr<H: HwAccess>(hw: &H) {
    let wanted = Cr4Flags::OSFXSR.bits() | Cr4Flags::OSXMMEXCPT.bits();
    let cr4 = hw.read_cr4();
    if cr4 & wanted != wanted {
        hw.write_cr4(cr4 | wanted);
    }
}

/// Reset the x87 unit, leave emulation, start monitoring the coprocessor.
fn init_fpu<H: HwAccess>(hw: &H) {
    hw.fninit();
    let mut cr0 = hw.read_cr0();
    cr0 &= !(Cr0Flags::EM.bits() | Cr0Flags::TS.bits());
    cr0 |= Cr0Flags::MP.bits();
    hw.write_cr0(cr0);
    mark_xstate(hw, Xcr0Flags::X87);
}

fn enable_sse_state<H: HwAccess>(hw: &H) {
    let mut cr0 = hw.read_cr0();
    cr0 &= !(Cr0Flags::EM.bits() | Cr0Flags::TS.bits());
    cr0 |= Cr0Flags::MP.bits();
    hw.write_cr0(cr0);

    enable_fxsr(hw);
    mark_xstate(hw, Xcr0Flags::SSE);
}

/// Mark components active in the extended-state register, preserving
/// whatever is already set. Skipped entirely while extended state saving
/// is off — the write would trap on real silicon.
fn mark_xstate<H: HwAccess>(hw: &H, components: Xcr0Flags) {
    if hw.read_cr4() & Cr4Flags::OSXSAVE.bits() == 0 {
        return;
    }
    let xcr0 = hw.read_xcr0();
    if xcr0 & components.bits() != components.bits() {
        hw.write_xcr0(xcr0 | components.bits());
    }
}
