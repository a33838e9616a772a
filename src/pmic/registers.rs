//! Register IDs and bit masks of the STPMIC1.
//!
//! Per-regulator control registers are aliased bands: `BUCKX_MAIN_CR + (n - 1)`
//! addresses buck `n`, and so on. Use [`buck_cr`] and [`ldo_cr`] rather than
//! doing the arithmetic by hand.

/// Default 7-bit bus address of the STPMIC1.
pub const DEFAULT_ADDRESS: u8 = 0x33;

/// Major hardware revision whose register semantics this driver implements.
pub const SUPPORTED_MAJOR_VERSION: u8 = 2;

// Status registers, read-only.
pub const TURN_ON_SR: u8 = 0x01;
pub const TURN_OFF_SR: u8 = 0x02;
pub const OCP_LDOS_SR: u8 = 0x03;
pub const OCP_BUCKS_BSW_SR: u8 = 0x04;
pub const RESTART_SR: u8 = 0x05;
/// Upper nibble: major version. Lower nibble: minor version.
pub const VERSION_SR: u8 = 0x06;

// Main control registers.
pub const MAIN_CR: u8 = 0x10;
pub const PADS_PULL_CR: u8 = 0x11;
pub const BUCKS_PD_CR: u8 = 0x12;
pub const LDO1234_PD_CR: u8 = 0x13;
pub const LDO56_VREF_PD_CR: u8 = 0x14;
pub const SW_VIN_CR: u8 = 0x15;
pub const PKEY_TURNOFF_CR: u8 = 0x16;
pub const BUCKS_MRST_CR: u8 = 0x18;
pub const LDOS_MRST_CR: u8 = 0x1A;
pub const WDG_CR: u8 = 0x1B;
pub const WDG_TMR_CR: u8 = 0x1C;

// Regulator control, main mode.
pub const BUCKX_MAIN_CR: u8 = 0x20;
pub const REFDDR_MAIN_CR: u8 = 0x24;
pub const LDOX_MAIN_CR: u8 = 0x25;

// Regulator control, alternate mode.
pub const BUCKX_ALT_CR: u8 = 0x30;
pub const REFDDR_ALT_CR: u8 = 0x34;
pub const LDOX_ALT_CR: u8 = 0x35;

pub const BST_SW_CR: u8 = 0x40;

// Interrupt groups, four consecutive registers each.
pub const INT_PENDING_R1: u8 = 0x50;
pub const INT_CLEAR_R1: u8 = 0x70;
pub const INT_MASK_R1: u8 = 0x80;
pub const INT_MASK_SET_R1: u8 = 0x90;
pub const INT_MASK_CLEAR_R1: u8 = 0xA0;
pub const INT_SRC_R1: u8 = 0xB0;
pub const INT_GROUP_LEN: u8 = 4;

pub const NVM_SR: u8 = 0xB8;
pub const NVM_CR: u8 = 0xB9;

/// Highest register ID the driver will put on the bus.
pub const MAX_REG: u8 = 0xBF;

/// Number of buck converters.
pub const BUCK_COUNT: u8 = 4;
/// Number of LDO regulators.
pub const LDO_COUNT: u8 = 6;

/// Register bank a regulator helper operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    /// Registers applied in MAIN operating mode.
    Main,
    /// Registers applied in ALTERNATE operating mode.
    Alternate,
}

/// Control register of buck `nth` (1..=4) in `bank`.
pub fn buck_cr(bank: Bank, nth: u8) -> Option<u8> {
    if !(1..=BUCK_COUNT).contains(&nth) {
        return None;
    }
    let base = match bank {
        Bank::Main => BUCKX_MAIN_CR,
        Bank::Alternate => BUCKX_ALT_CR,
    };
    Some(base + (nth - 1))
}

/// Control register of LDO `nth` (1..=6) in `bank`.
pub fn ldo_cr(bank: Bank, nth: u8) -> Option<u8> {
    if !(1..=LDO_COUNT).contains(&nth) {
        return None;
    }
    let base = match bank {
        Bank::Main => LDOX_MAIN_CR,
        Bank::Alternate => LDOX_ALT_CR,
    };
    Some(base + (nth - 1))
}

/// Control register of the DDR reference in `bank`.
pub fn refddr_cr(bank: Bank) -> u8 {
    match bank {
        Bank::Main => REFDDR_MAIN_CR,
        Bank::Alternate => REFDDR_ALT_CR,
    }
}

/// Bits of `TURN_ON_SR`.
pub mod turn_on {
    pub const AUTOPWR: u8 = 1 << 4;
    pub const SWOUT: u8 = 1 << 3;
    pub const VBUS: u8 = 1 << 2;
    pub const WKUP: u8 = 1 << 1;
    pub const PONKEY: u8 = 1 << 0;
}

/// Bits of `TURN_OFF_SR`.
pub mod turn_off {
    pub const PKEYLKP: u8 = 1 << 5;
    pub const WDG: u8 = 1 << 4;
    pub const OCP: u8 = 1 << 3;
    pub const THSD: u8 = 1 << 2;
    pub const VINOK_FA: u8 = 1 << 1;
    pub const SWOFF: u8 = 1 << 0;
}

/// Bits of `OCP_BUCKS_BSW_SR`. LDO `n` in `OCP_LDOS_SR` is bit `n - 1`.
pub mod ocp_bucks {
    pub const BOOST: u8 = 1 << 6;
    pub const SWOUT: u8 = 1 << 5;
    pub const VBUSOTG: u8 = 1 << 4;
    pub const BUCK4: u8 = 1 << 3;
    pub const BUCK3: u8 = 1 << 2;
    pub const BUCK2: u8 = 1 << 1;
    pub const BUCK1: u8 = 1 << 0;
}

/// Bits of `RESTART_SR`.
pub mod restart {
    /// 0: MAIN mode, 1: ALTERNATE mode.
    pub const OP_MODE: u8 = 1 << 7;
    pub const LDO4_SRC_MASK: u8 = 0b11 << 5;
    pub const LDO4_SRC_SHIFT: u8 = 5;
    pub const VINOK_FA: u8 = 1 << 4;
    pub const PKEYLKP: u8 = 1 << 3;
    pub const WDG: u8 = 1 << 2;
    pub const SWOFF: u8 = 1 << 1;
    pub const RSTN: u8 = 1 << 0;
}

/// Bits of `MAIN_CR`.
pub mod main_cr {
    pub const OCP_OFF_DBG: u8 = 1 << 4;
    pub const PWRCTRL_POL: u8 = 1 << 3;
    pub const PWRCTRL_EN: u8 = 1 << 2;
    pub const RREQ_EN: u8 = 1 << 1;
    pub const SWOFF: u8 = 1 << 0;
}

/// Bits of `SW_VIN_CR`.
pub mod sw_vin {
    pub const SWIN_DET_EN: u8 = 1 << 7;
    pub const SWOUT_DET_DIS: u8 = 1 << 6;
    /// VINLOW hysteresis, 100 mV per step from 100 mV.
    pub const HYST_MASK: u8 = 0b11 << 4;
    pub const HYST_SHIFT: u8 = 4;
    /// VINLOW threshold offset, 50 mV per step from 50 mV.
    pub const THRESH_MASK: u8 = 0b111 << 1;
    pub const THRESH_SHIFT: u8 = 1;
    pub const MON: u8 = 1 << 0;
}

/// Bits of `PKEY_TURNOFF_CR`.
pub mod pkey_turnoff {
    /// Turn off on a long PONKEYn press.
    pub const LKP_OFF: u8 = 1 << 7;
    /// A long press also clears the OCP lock flag.
    pub const CLR_OCP: u8 = 1 << 6;
    /// Long press duration, `16 - value` seconds.
    pub const TMR_MASK: u8 = 0x0F;
}

/// Bits of `PADS_PULL_CR`.
pub mod pads_pull {
    /// Reverse logic: set disables the WAKEUP detector.
    pub const WKUP_EN: u8 = 1 << 4;
    pub const PWRCTRL_PD: u8 = 1 << 3;
    pub const PWRCTRL_PU: u8 = 1 << 2;
    pub const PWRCTRL_SHIFT: u8 = 2;
    pub const WKUP_PD: u8 = 1 << 1;
    pub const WKUP_PU: u8 = 1 << 0;
    pub const WKUP_SHIFT: u8 = 0;
}

/// Bits of `LDO56_VREF_PD_CR` outside the 2-bit pull-down fields.
pub mod ldo56_pd {
    pub const BST: u8 = 1 << 6;
}

/// Bits of `WDG_CR`.
pub mod wdg {
    pub const RST: u8 = 1 << 1;
    pub const EN: u8 = 1 << 0;
}

/// Bits of the regulator control registers.
pub mod regulator {
    pub const EN: u8 = 1 << 0;
    /// Buck only: low-power regulation mode.
    pub const BUCK_LP: u8 = 1 << 1;
    pub const BUCK_VOUT_SHIFT: u8 = 2;
    pub const BUCK_VOUT_MAX: u8 = 0x3F;
    pub const LDO_VOUT_SHIFT: u8 = 2;
    pub const LDO_VOUT_MAX: u8 = 0x1F;
    pub const LDO_VOUT_MASK: u8 = LDO_VOUT_MAX << LDO_VOUT_SHIFT;
    /// LDO3 only.
    pub const LDO3_BYPASS: u8 = 1 << 7;
    /// LDO4 input source select bits.
    pub const LDO4_SRC_VIN: u8 = 1 << 2;
    pub const LDO4_SRC_BSTOUT: u8 = 1 << 3;
    pub const LDO4_SRC_VBUSOTG: u8 = 1 << 4;
    pub const LDO4_SRC_MASK: u8 = LDO4_SRC_VIN | LDO4_SRC_BSTOUT | LDO4_SRC_VBUSOTG;
}

/// Bits of the 16-bit MRST view (`BUCKS_MRST_CR` high byte, `LDOS_MRST_CR` low byte).
pub mod mrst {
    pub const BUCK4: u16 = 1 << 11;
    pub const BUCK3: u16 = 1 << 10;
    pub const BUCK2: u16 = 1 << 9;
    pub const BUCK1: u16 = 1 << 8;
    pub const REFDDR: u16 = 1 << 6;
    pub const LDO6: u16 = 1 << 5;
    pub const LDO5: u16 = 1 << 4;
    pub const LDO4: u16 = 1 << 3;
    pub const LDO3: u16 = 1 << 2;
    pub const LDO2: u16 = 1 << 1;
    pub const LDO1: u16 = 1 << 0;

    pub(crate) const BUCKS_MASK: u8 = 0x0F;
    pub(crate) const LDOS_MASK: u8 = 0x7F;
}

pub mod nvm {
    pub const BUSY: u8 = 1 << 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliased_bands_resolve() {
        assert_eq!(buck_cr(Bank::Main, 1), Some(0x20));
        assert_eq!(buck_cr(Bank::Main, 4), Some(0x23));
        assert_eq!(buck_cr(Bank::Alternate, 2), Some(0x31));
        assert_eq!(ldo_cr(Bank::Main, 3), Some(0x27));
        assert_eq!(ldo_cr(Bank::Main, 6), Some(0x2A));
        assert_eq!(ldo_cr(Bank::Alternate, 1), Some(0x35));
        assert_eq!(refddr_cr(Bank::Alternate), 0x34);
    }

    #[test]
    fn sw_vin_and_pkey_fields_tile_the_byte() {
        use sw_vin::*;
        let fields = [SWIN_DET_EN, SWOUT_DET_DIS, HYST_MASK, THRESH_MASK, MON];
        assert_eq!(fields.iter().fold(0, |acc, f| acc | f), 0xFF);
        assert_eq!(fields.iter().map(|f| f.count_ones()).sum::<u32>(), 8);
        assert_eq!((3 << HYST_SHIFT) & HYST_MASK, HYST_MASK);
        assert_eq!((7 << THRESH_SHIFT) & THRESH_MASK, THRESH_MASK);

        let pkey = pkey_turnoff::LKP_OFF | pkey_turnoff::CLR_OCP | pkey_turnoff::TMR_MASK;
        assert_eq!(pkey, 0b1100_1111);
    }

    #[test]
    fn aliased_bands_reject_bad_index() {
        assert_eq!(buck_cr(Bank::Main, 0), None);
        assert_eq!(buck_cr(Bank::Main, 5), None);
        assert_eq!(ldo_cr(Bank::Alternate, 0), None);
        assert_eq!(ldo_cr(Bank::Alternate, 7), None);
    }
}
