//! Pull-down field encoders.
//!
//! Each function takes the current register byte, replaces one 2-bit field
//! and returns the new byte. Bits outside the field are left untouched.

use crate::pmic::{
    PmicError,
    registers::ldo56_pd,
    types::{BuckPullDown, LdoPullDown},
};

/// Index of the DDR reference inside `LDO56_VREF_PD_CR`.
pub const REFDDR_PD_INDEX: u8 = 7;

#[inline]
fn replace_field(org: u8, slot: u8, value: u8) -> u8 {
    let shift = slot << 1;
    (org & !(0x03 << shift)) | ((value & 0x03) << shift)
}

/// Sets the pull-down mode of buck `nth` (1..=4) in a `BUCKS_PD_CR` value.
pub fn encode_bucks_pd(org: u8, nth: u8, mode: BuckPullDown) -> Result<u8, PmicError> {
    if !(1..=4).contains(&nth) {
        return Err(PmicError::Range);
    }
    Ok(replace_field(org, nth - 1, mode as u8))
}

/// Sets the pull-down mode of LDO `nth` (1..=4) in a `LDO1234_PD_CR` value.
pub fn encode_ldo1234_pd(org: u8, nth: u8, mode: LdoPullDown) -> Result<u8, PmicError> {
    if !(1..=4).contains(&nth) {
        return Err(PmicError::Range);
    }
    Ok(replace_field(org, nth - 1, mode as u8))
}

/// Sets the pull-down mode of LDO5, LDO6 or the DDR reference
/// ([`REFDDR_PD_INDEX`]) in a `LDO56_VREF_PD_CR` value.
pub fn encode_ldo56_pd(org: u8, nth: u8, mode: LdoPullDown) -> Result<u8, PmicError> {
    if !(5..=REFDDR_PD_INDEX).contains(&nth) {
        return Err(PmicError::Range);
    }
    Ok(replace_field(org, nth - 5, mode as u8))
}

/// Sets or clears the boost pull-down bit of `LDO56_VREF_PD_CR`.
pub fn encode_ldo56_bst(org: u8, enable: bool) -> u8 {
    let org = org & !ldo56_pd::BST;
    if enable { org | ldo56_pd::BST } else { org }
}
