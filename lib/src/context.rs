//! The per-process CPU context object.

use cpuhal_abi::{CpuFeature, ExceptionHandler, Vendor};
use spin::Once;

use crate::hw::{HwAccess, NativeHw};
use crate::state::CpuState;
use crate::{features, init, klog_debug, klog_info, popcnt, vendor};

/// A backend plus the process-wide bookkeeping, owned by the caller
/// (typically a boot sequencer) and passed by reference everywhere.
///
/// Each logical core must run [`Cpu::init`] itself — control registers are
/// per-core — and multi-core callers serialize `init`/`reset`/handler
/// updates externally.
pub struct Cpu<H: HwAccess> {
    hw: H,
    state: CpuState,
    /// Detection is deterministic per core, so the first query is cached.
    detected: Once<CpuFeature>,
}

/// The context over the compile-time selected backend.
pub type NativeCpu = Cpu<NativeHw>;

impl NativeCpu {
    /// Context for the processor this build actually targets.
    pub const fn native() -> Self {
        Cpu::new(NativeHw::new())
    }
}

impl<H: HwAccess> Cpu<H> {
    pub const fn new(hw: H) -> Self {
        Self {
            hw,
            state: CpuState::new(),
            detected: Once::new(),
        }
    }

    /// The backend this context drives.
    pub fn hw(&self) -> &H {
        &self.hw
    }

    /// Vendor of the running processor; `Unknown` when unrecognized.
    pub fn vendor(&self) -> Vendor {
        vendor::detect(&self.hw)
    }

    /// Everything the processor is capable of (not what is enabled).
    /// Pure read, safe before `init`.
    pub fn features(&self) -> CpuFeature {
        *self.detected.call_once(|| features::detect(&self.hw))
    }

    /// Mask stored by the first successful `init`; empty before that.
    pub fn enabled_features(&self) -> CpuFeature {
        self.state.enabled_features()
    }

    /// Static list of detectable features on this architecture.
    pub fn known_features(&self) -> &'static [CpuFeature] {
        features::known_features()
    }

    /// Length of [`Cpu::known_features`].
    pub fn known_feature_count(&self) -> usize {
        features::known_feature_count()
    }

    /// General-purpose register width in bits.
    pub fn gpr_width(&self) -> usize {
        features::gpr_width()
    }

    /// Widest vector register implied by the detected features, in bits.
    pub fn vr_width(&self) -> usize {
        features::vr_width(self.features())
    }

    /// Enable `requested` features by driving the control registers
    /// through the ordered activation sequence, then record the mask.
    ///
    /// Idempotent while initialized: the first caller wins and later
    /// masks are silently discarded until [`Cpu::reset_state`]. Enabling
    /// everything the hardware offers is `cpu.init(cpu.features())`.
    pub fn init(&self, requested: CpuFeature) {
        if self.state.is_initialized() {
            klog_debug!("cpu: init skipped, already initialized");
            return;
        }
        init::run(&self.hw, requested);
        self.state.finish_init(requested);
        klog_info!("cpu: initialized, enabled=0x{:08x}", requested.bits());
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Clear the initialized flag and enabled mask so a fresh `init` can
    /// re-apply hardware side effects (firmware-to-kernel handoff).
    pub fn reset_state(&self) {
        self.state.reset();
        klog_debug!("cpu: state reset");
    }

    /// Replace the exception-handler slot (last write wins). The platform
    /// trap dispatch invokes it, never this layer.
    pub fn set_exception_handler(&self, handler: ExceptionHandler) {
        self.state.set_exception_handler(handler);
    }

    pub fn exception_handler(&self) -> Option<ExceptionHandler> {
        self.state.exception_handler()
    }

    /// Record that privilege de-escalation happened. One-way latch.
    pub fn enter_userland(&self) {
        self.state.enter_userland();
    }

    pub fn is_userland(&self) -> bool {
        self.state.is_userland()
    }

    /// Spin-loop hint; keeps a busy wait from pinning the core.
    pub fn hint_spin(&self) {
        self.hw.pause();
    }

    /// Halt forever. Never returns.
    pub fn halt(&self) -> ! {
        self.hw.halt()
    }

    pub fn popcnt16(&self, value: u16) -> u32 {
        popcnt::popcnt16(&self.hw, self.features(), value)
    }

    pub fn popcnt32(&self, value: u32) -> u32 {
        popcnt::popcnt32(&self.hw, self.features(), value)
    }

    pub fn popcnt64(&self, value: u64) -> u32 {
        popcnt::popcnt64(&self.hw, self.features(), value)
    }
}
