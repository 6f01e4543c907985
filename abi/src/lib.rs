//! Architecture-neutral CPU capability types.
//!
//! This crate provides the canonical definitions for everything a consumer
//! of the CPU layer needs to talk about capabilities: the feature bitmask,
//! the vendor identity, and the exception/handler types. Having a single
//! source of truth keeps kernel and boot code agreeing on bit positions
//! without pulling in any hardware access code.
//!
//! Nothing in this crate touches hardware; it is pure data.

#![no_std]
#![forbid(unsafe_code)]

pub mod exception;
pub mod feature;
pub mod vendor;

pub use exception::{Exception, ExceptionHandler};
pub use feature::CpuFeature;
pub use vendor::Vendor;
