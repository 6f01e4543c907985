//! Process-wide CPU bookkeeping.
//!
//! Plain shared state with no built-in locking beyond the individual
//! atomics: multi-core callers serialize `init`/`reset`/handler updates
//! themselves (run them on the boot core before the others start, or
//! guard with an external lock). Control-register effects are per-core;
//! this record is what the process agrees the cores were asked to enable.

use core::sync::atomic::{AtomicBool, AtomicPtr, AtomicU32, Ordering};

use cpuhal_abi::{CpuFeature, ExceptionHandler};

/// Enabled-features mask, initialized flag, userland latch and the
/// exception-handler slot. Zeroed at load; explicit lifecycle only.
pub struct CpuState {
    initialized: AtomicBool,
    enabled: AtomicU32,
    userland: AtomicBool,
    /// Stored as a raw pointer; null means "no handler registered".
    handler: AtomicPtr<()>,
}

impl CpuState {
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            enabled: AtomicU32::new(CpuFeature::empty().bits()),
            userland: AtomicBool::new(false),
            handler: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Record the outcome of an initialization run. The mask becomes
    /// visible before the initialized flag does.
    pub(crate) fn finish_init(&self, enabled: CpuFeature) {
        self.enabled.store(enabled.bits(), Ordering::Release);
        self.initialized.store(true, Ordering::Release);
    }

    /// Clear the initialized flag and the enabled mask, permitting a fresh
    /// `init`. Intended for the firmware-to-kernel handoff. The userland
    /// latch and handler slot are independent and survive a reset.
    pub fn reset(&self) {
        self.initialized.store(false, Ordering::Release);
        self.enabled
            .store(CpuFeature::empty().bits(), Ordering::Release);
    }

    /// Mask stored by the first successful `init`; `empty` before that.
    pub fn enabled_features(&self) -> CpuFeature {
        CpuFeature::from_bits_retain(self.enabled.load(Ordering::Acquire))
    }

    /// Replace the handler slot. Last write wins; no composition, no
    /// validation. The layer never invokes the callback itself — trap
    /// dispatch does.
    pub fn set_exception_handler(&self, handler: ExceptionHandler) {
        self.handler.store(handler as *mut (), Ordering::Release);
    }

    pub fn exception_handler(&self) -> Option<ExceptionHandler> {
        let ptr = self.handler.load(Ordering::Acquire);
        if ptr.is_null() {
            return None;
        }
        // SAFETY: the slot only ever holds values stored by
        // `set_exception_handler`, which are valid `ExceptionHandler` fn
        // pointers of the same size as `*mut ()` on all supported targets.
        Some(unsafe { core::mem::transmute::<*mut (), ExceptionHandler>(ptr) })
    }

    /// One-way latch: records that privilege de-escalation happened.
    /// There is no unset operation.
    pub fn enter_userland(&self) {
        self.userland.store(true, Ordering::Release);
    }

    pub fn is_userland(&self) -> bool {
        self.userland.load(Ordering::Acquire)
    }
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new()
    }
}
