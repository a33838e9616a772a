//! Register space descriptor and ID validation.
//!
//! The descriptor lists the register bands that take part in a full cache
//! reload and in a batch flush. Its order is the order in which those
//! operations touch the bus.

use crate::pmic::{
    PmicError,
    registers::{
        BUCKS_MRST_CR, BUCKX_MAIN_CR, LDOS_MRST_CR, LDOX_MAIN_CR, MAIN_CR, MAX_REG,
        PKEY_TURNOFF_CR, TURN_ON_SR, VERSION_SR, WDG_TMR_CR,
    },
};

/// Half-open band of register IDs, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegRange {
    pub start: u8,
    pub end: u8,
}

impl RegRange {
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Number of registers in the band.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub const fn contains(&self, reg: u8) -> bool {
        reg >= self.start && reg < self.end
    }

    /// Iterates the band's IDs in ascending order.
    pub fn ids(&self) -> core::ops::Range<u8> {
        self.start..self.end
    }
}

/// Bands reloaded at bring-up and scanned by a batch flush.
pub const REGISTER_MAP: &[RegRange] = &[
    RegRange::new(TURN_ON_SR, VERSION_SR + 1),
    RegRange::new(MAIN_CR, PKEY_TURNOFF_CR + 1),
    RegRange::new(BUCKS_MRST_CR, BUCKS_MRST_CR + 1),
    RegRange::new(LDOS_MRST_CR, WDG_TMR_CR + 1),
    RegRange::new(BUCKX_MAIN_CR, BUCKX_MAIN_CR + 4),
    RegRange::new(LDOX_MAIN_CR, LDOX_MAIN_CR + 6),
];

/// Number of cache slots; IDs `0..CACHE_SIZE` are cacheable.
pub const CACHE_SIZE: usize = LDOX_MAIN_CR as usize + 6;

/// Validates a register ID against [`MAX_REG`].
///
/// # Errors
/// * [`PmicError::Invalid`] - if `reg` is above the register space
///
/// # Example
/// ```
/// use stpmic::pmic::{PmicError, map::check_reg};
///
/// assert_eq!(check_reg(0x10), Ok(0x10));
/// assert_eq!(check_reg(0xFF), Err(PmicError::Invalid));
/// ```
pub fn check_reg(reg: u8) -> Result<u8, PmicError> {
    if reg > MAX_REG {
        return Err(PmicError::Invalid);
    }
    Ok(reg)
}

/// Returns true if `reg` owns a cache slot.
#[inline]
pub fn is_cacheable(reg: u8) -> bool {
    (reg as usize) < CACHE_SIZE
}

/// Total number of registers covered by [`REGISTER_MAP`].
pub fn covered_count() -> usize {
    REGISTER_MAP.iter().map(RegRange::len).sum()
}
