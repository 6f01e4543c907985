//! Exception kinds and the handler callback type.

/// Exception kind passed to a registered [`ExceptionHandler`].
///
/// Only page faults are distinguished today; the variant list grows as
/// trap dispatch learns to forward more vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exception {
    None = 0,
    PageFault,
}

/// Callback invoked from trap context by the platform's interrupt dispatch.
///
/// The CPU layer only stores this reference; it never calls it itself.
/// Registration is last-write-wins: there is exactly one process-wide slot
/// and no composition.
pub type ExceptionHandler = fn(Exception);
