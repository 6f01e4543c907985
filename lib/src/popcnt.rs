//! Population count over 16/32/64-bit values.
//!
//! Accelerated by the hardware instruction when detection reported it,
//! otherwise Kernighan's bit-clearing loop. Both paths return identical
//! results for every input; all widths funnel through the 64-bit form.

use cpuhal_abi::CpuFeature;

use crate::hw::HwAccess;

/// Kernighan's method: clear the lowest set bit until none remain.
pub(crate) fn kernighan(mut value: u64) -> u32 {
    let mut count = 0;
    while value != 0 {
        value &= value - 1;
        count += 1;
    }
    count
}

/// Count set bits in a 64-bit value.
pub fn popcnt64<H: HwAccess>(hw: &H, features: CpuFeature, value: u64) -> u32 {
    if features.contains(CpuFeature::POPCNT) {
        return hw.popcnt(value);
    }
    kernighan(value)
}

/// Count set bits in a 32-bit value.
pub fn popcnt32<H: HwAccess>(hw: &H, features: CpuFeature, value: u32) -> u32 {
    popcnt64(hw, features, value as u64)
}

/// Count set bits in a 16-bit value.
pub fn popcnt16<H: HwAccess>(hw: &H, features: CpuFeature, value: u16) -> u32 {
    popcnt64(hw, features, value as u64)
}
