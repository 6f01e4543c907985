//! Vendor identification from the base CPUID leaf.

use cpuhal_abi::Vendor;

use crate::cpuid::CPUID_LEAF_BASE;
use crate::hw::HwAccess;

/// Known 12-byte signatures, matched in priority order: hardware vendors
/// first, hypervisor identities after. First exact match wins.
///
/// The byte strings are protocol constants — verified against real
/// hardware, not re-derived. Note the two KVM encodings (padded and
/// NUL-terminated) and the pre-`AuthenticAMD` engineering-sample string.
const SIGNATURES: &[(&[u8; 12], Vendor)] = &[
    (b"AMDisbetter!", Vendor::Amd), // very early AMD chips used this
    (b"AuthenticAMD", Vendor::Amd),
    (b"GenuineIntel", Vendor::Intel),
    (b"CyrixInstead", Vendor::Cyrix),
    (b"CentaurHauls", Vendor::Via),
    (b"VIA VIA VIA ", Vendor::Via),
    (b"GenuineTMx86", Vendor::Transmeta),
    (b"SiS SiS SiS ", Vendor::Sis),
    (b"UMC UMC UMC ", Vendor::Umc),
    (b"RiseRiseRise", Vendor::Rise),
    (b"NexGenDriven", Vendor::NexGen),
    (b"Geode by NSC", Vendor::Nsc),
    // Virtual CPUs
    (b"KVMKVMKVMKVM", Vendor::Kvm),
    (b"KVMKVMKVM\0\0\0", Vendor::Kvm),
    (b"TCGTCGTCGTCG", Vendor::Qemu),
    (b"Microsoft Hv", Vendor::HyperV),
    (b" lrpepyh  vr", Vendor::Parallels),
    (b"VMwareVMware", Vendor::VmWare),
    (b"XenVMMXenVMM", Vendor::XenHvm),
    (b"ACRNACRNACRN", Vendor::Acrn),
    (b" QNXQVMBSQG ", Vendor::Qnx),
    (b"VirtualApple", Vendor::Rosetta),
    (b"bhyve bhyve ", Vendor::Bhyve),
    (b"MicrosoftXTA", Vendor::Msxta),
];

/// Identify the vendor of the processor behind `hw`.
///
/// Unmatched signatures — and architectures without an identification
/// instruction — yield [`Vendor::Unknown`], never an error.
pub fn detect<H: HwAccess>(hw: &H) -> Vendor {
    let Some(regs) = hw.cpuid(CPUID_LEAF_BASE, 0) else {
        return Vendor::Unknown;
    };
    from_signature(&regs.vendor_bytes())
}

/// Match a raw 12-byte signature against the known-vendor table.
pub fn from_signature(signature: &[u8; 12]) -> Vendor {
    for (candidate, vendor) in SIGNATURES {
        if *candidate == signature {
            return *vendor;
        }
    }
    Vendor::Unknown
}
