//! Processor feature-detection and control layer.
//!
//! A linkable capability layer for bare-metal and early-boot code: identify
//! the CPU vendor, enumerate instruction-set support, enable requested
//! features by driving the privileged control registers in dependency
//! order, and provide a portable population count plus the page-fault
//! handler slot and userland-transition bookkeeping.
//!
//! All hardware access goes through the [`hw::HwAccess`] trait so the core
//! state machine runs unchanged against real silicon, the generic no-op
//! backend on architectures without an identification instruction, or a
//! software model in tests. The usual entry point is [`Cpu::native`].

#![no_std]

pub mod control_regs;
pub mod cpuid;
pub mod features;
pub mod hw;
pub mod init;
pub mod klog;
pub mod popcnt;
pub mod state;
pub mod vendor;

mod context;

pub use context::{Cpu, NativeCpu};
pub use cpuhal_abi::{CpuFeature, Exception, ExceptionHandler, Vendor};
pub use hw::{CpuidRegs, HwAccess, NativeHw};
pub use state::CpuState;
