//! CPU vendor identity.

/// Vendor of the physical or virtual processor.
///
/// Derived from the 12-byte signature returned by the base identification
/// leaf. Hardware vendors come first, hypervisor/software identities after;
/// anything unrecognized maps to [`Vendor::Unknown`], never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Vendor {
    Unknown = 0,
    Amd,
    Intel,
    Cyrix,
    Transmeta,
    Via,
    Sis,
    Umc,
    Rise,
    NexGen,
    Nsc,
    // Virtual CPU vendors (software ID)
    Kvm,
    Qemu,
    HyperV,
    Parallels,
    VmWare,
    XenHvm,
    Acrn,
    Qnx,
    Rosetta,
    Bhyve,
    Msxta,
}

impl Vendor {
    /// Display name. Total: every value, including `Unknown`, has one.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Amd => "Advanced Micro Devices",
            Self::Intel => "Intel",
            Self::Cyrix => "Cyrix",
            Self::Transmeta => "Transmeta",
            Self::Via => "VIA Technologies",
            Self::Sis => "Silicon Integrated Systems",
            Self::Umc => "United Microelectronics",
            Self::Rise => "Rise",
            Self::NexGen => "NexGen",
            Self::Nsc => "National Semiconductor",
            Self::Kvm => "KVM",
            Self::Qemu => "QEMU (TCG)",
            Self::HyperV => "Microsoft HyperV",
            Self::Parallels => "Parallels",
            Self::VmWare => "VMWare",
            Self::XenHvm => "XenHVM",
            Self::Acrn => "Project ACRN",
            Self::Qnx => "QNX",
            Self::Rosetta => "Rosetta",
            Self::Bhyve => "BHyve",
            Self::Msxta => "Microsoft x86-to-ARM",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this is a hypervisor/software identity rather than silicon.
    pub const fn is_virtual(self) -> bool {
        matches!(
            self,
            Self::Kvm
                | Self::Qemu
                | Self::HyperV
                | Self::Parallels
                | Self::VmWare
                | Self::XenHvm
                | Self::Acrn
                | Self::Qnx
                | Self::Rosetta
                | Self::Bhyve
                | Self::Msxta
        )
    }
}
