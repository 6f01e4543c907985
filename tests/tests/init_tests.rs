//! End-to-end runs of the activation sequence against the simulated
//! register file. The sequence only drives hardware on x86-64.
#![cfg(target_arch = "x86_64")]

use cpuhal::Cpu;
use cpuhal::control_regs::{Cr0Flags, Cr4Flags, Xcr0Flags};
use cpuhal_abi::CpuFeature;
use cpuhal_tests::{HwEvent, SimHw};

#[test]
fn full_stack_end_state() {
    let cpu = Cpu::new(SimHw::intel_avx512());
    let features = cpu.features();
    cpu.init(features);

    let hw = cpu.hw();
    assert_ne!(hw.cr0() & Cr0Flags::MP.bits(), 0);
    assert_eq!(hw.cr0() & Cr0Flags::EM.bits(), 0);
    assert_eq!(hw.cr0() & Cr0Flags::TS.bits(), 0);

    let cr4_wanted =
        Cr4Flags::OSFXSR.bits() | Cr4Flags::OSXMMEXCPT.bits() | Cr4Flags::OSXSAVE.bits();
    assert_eq!(hw.cr4() & cr4_wanted, cr4_wanted);

    let xcr0_wanted = Xcr0Flags::X87.bits()
        | Xcr0Flags::SSE.bits()
        | Xcr0Flags::AVX.bits()
        | Xcr0Flags::AVX512_STATE.bits();
    assert_eq!(hw.xcr0(), xcr0_wanted);
}

#[test]
fn xsave_switches_on_before_any_extended_state_write() {
    let cpu = Cpu::new(SimHw::intel_avx512());
    let features = cpu.features();
    cpu.init(features);

    let events = cpu.hw().events();
    let osxsave_at = events
        .iter()
        .position(|e| matches!(e, HwEvent::WriteCr4(v) if v & Cr4Flags::OSXSAVE.bits() != 0))
        .expect("extended save never enabled");
    let first_xcr0_at = events
        .iter()
        .position(|e| matches!(e, HwEvent::WriteXcr0(_)))
        .expect("extended-state register never written");
    assert!(osxsave_at < first_xcr0_at);

    // FPU reset happens before the vector components come up.
    let fninit_at = events
        .iter()
        .position(|e| *e == HwEvent::Fninit)
        .expect("FPU never reset");
    assert!(fninit_at < first_xcr0_at);

    // The AVX-512 components are the last extended-state change.
    let last_xcr0 = events
        .iter()
        .rev()
        .find(|e| matches!(e, HwEvent::WriteXcr0(_)))
        .unwrap();
    let full = Xcr0Flags::X87.bits()
        | Xcr0Flags::SSE.bits()
        | Xcr0Flags::AVX.bits()
        | Xcr0Flags::AVX512_STATE.bits();
    assert_eq!(*last_xcr0, HwEvent::WriteXcr0(full));
}

#[test]
fn missing_prerequisite_skips_the_tier() {
    // SSE2 without SSE in the same mask: no SSE setup runs, so the
    // legacy save pair and the extended-state register stay untouched.
    let cpu = Cpu::new(SimHw::intel_avx512());
    cpu.init(CpuFeature::X87 | CpuFeature::SSE2);

    let hw = cpu.hw();
    assert_eq!(hw.cr4(), 0);
    assert_eq!(hw.xcr0(), 0);
    // The FPU tier still ran.
    assert_eq!(hw.fninit_count(), 1);
    assert_ne!(hw.cr0() & Cr0Flags::MP.bits(), 0);
}

#[test]
fn no_xsave_means_no_extended_state_writes() {
    let cpu = Cpu::new(SimHw::amd_with_extensions());
    let features = cpu.features();
    assert!(!features.contains(CpuFeature::XSAVE));
    cpu.init(features);

    let hw = cpu.hw();
    // Legacy save pair still comes up.
    let legacy = Cr4Flags::OSFXSR.bits() | Cr4Flags::OSXMMEXCPT.bits();
    assert_eq!(hw.cr4(), legacy);
    // Writing the extended-state register would trap, so it never happens.
    assert_eq!(hw.xcr0(), 0);
    assert!(
        !hw.events()
            .iter()
            .any(|e| matches!(e, HwEvent::WriteXcr0(_)))
    );
}

#[test]
fn second_init_is_a_no_op_until_reset() {
    let cpu = Cpu::new(SimHw::intel_avx512());
    let features = cpu.features();
    cpu.init(features);
    let events_after_first = cpu.hw().events().len();

    // A different mask is discarded while initialized.
    cpu.init(CpuFeature::X87);
    assert_eq!(cpu.enabled_features(), features);
    assert_eq!(cpu.hw().events().len(), events_after_first);

    // After a reset the sequence re-applies its side effects.
    cpu.reset_state();
    assert!(!cpu.is_initialized());
    cpu.init(features);
    assert!(cpu.hw().events().len() > events_after_first);
    assert_eq!(cpu.hw().fninit_count(), 4);
}

#[test]
fn bare_fpu_machine_initializes_fpu_only() {
    let cpu = Cpu::new(SimHw::legacy_x87_only());
    let features = cpu.features();
    cpu.init(features);

    let hw = cpu.hw();
    // X87 and X87|MMX rows both fire.
    assert_eq!(hw.fninit_count(), 2);
    assert_ne!(hw.cr0() & Cr0Flags::MP.bits(), 0);
    assert_eq!(hw.cr4(), 0);
    assert_eq!(hw.xcr0(), 0);
}
