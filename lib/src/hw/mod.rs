//! The hardware access seam.
//!
//! One trait method per privileged or identification instruction, no
//! policy. Production backends wrap target-specific instructions; the
//! generic backend degrades every query to a safe default so the layer
//! still links on architectures it cannot drive. Test code supplies its
//! own implementation with a simulated register file.

pub mod generic;
#[cfg(target_arch = "x86_64")]
pub mod x86_64;

pub use generic::GenericHw;

/// Backend selected for the build target.
#[cfg(target_arch = "x86_64")]
pub type NativeHw = x86_64::X86Hw;
/// Backend selected for the build target.
#[cfg(not(target_arch = "x86_64"))]
pub type NativeHw = GenericHw;

/// Raw register values returned by one identification query.
///
/// Individual bits are leaf-dependent; the constants in [`crate::cpuid`]
/// name the positions this layer reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuidRegs {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl CpuidRegs {
    /// The 12-byte vendor signature carried by the base leaf.
    ///
    /// Capture order is EBX, EDX, ECX — the identification protocol's
    /// register-to-string convention. `GenuineIntel` arrives as
    /// EBX=`Genu`, EDX=`ineI`, ECX=`ntel`.
    pub fn vendor_bytes(&self) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&self.ebx.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.edx.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.ecx.to_le_bytes());
        bytes
    }
}

/// Single privileged/identification instructions, one method each.
///
/// Every operation is a fixed, short instruction sequence that completes
/// unconditionally and must not be reordered by the compiler relative to
/// other calls — implementations use `asm!` or intrinsics, which the
/// compiler already treats as opaque, ordered and side-effecting.
///
/// Control-register reads and writes affect only the executing core.
pub trait HwAccess {
    /// Identification query at `(leaf, subleaf)`.
    ///
    /// `None` when the architecture has no identification instruction;
    /// callers must degrade to their "unknown"/empty defaults.
    fn cpuid(&self, leaf: u32, subleaf: u32) -> Option<CpuidRegs>;

    /// Read the primary control register (CR0).
    fn read_cr0(&self) -> u64;
    /// Write the primary control register (CR0).
    fn write_cr0(&self, value: u64);

    /// Read the secondary control register (CR4).
    fn read_cr4(&self) -> u64;
    /// Write the secondary control register (CR4).
    fn write_cr4(&self, value: u64);

    /// Read the extended-state register (XCR0).
    ///
    /// Reads as zero while extended state saving is not enabled in the
    /// secondary control register.
    fn read_xcr0(&self) -> u64;
    /// Write the extended-state register (XCR0).
    ///
    /// Must be a no-op while extended state saving is not enabled;
    /// issuing the raw instruction in that window is an invalid-opcode
    /// trap on real silicon.
    fn write_xcr0(&self, value: u64);

    /// Reset the legacy floating-point unit (FNINIT or equivalent).
    fn fninit(&self);

    /// Hardware-accelerated population count.
    ///
    /// Only called once detection has reported the population-count
    /// feature; backends without it may answer with the software count.
    fn popcnt(&self, value: u64) -> u32;

    /// Spin-loop hint (PAUSE/YIELD); a no-op where unsupported.
    fn pause(&self);

    /// Halt forever. Never returns.
    fn halt(&self) -> ! {
        loop {
            self.pause();
        }
    }
}
