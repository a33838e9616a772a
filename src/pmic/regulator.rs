//! Buck, LDO and DDR reference control.
//!
//! Every regulator has a control register in the MAIN bank and one in the
//! ALTERNATE bank. The public methods come in pairs, `buck_enable` and
//! `buck_enable_alt` and so on, generated by `impl_regulator_bank!`.
//! Alternate-bank registers have no cache slot, so every `_alt` access reaches
//! the bus.

use crate::pmic::{
    PmicError, Stpmic,
    encode::{
        REFDDR_PD_INDEX, encode_bucks_pd, encode_ldo1234_pd, encode_ldo56_bst, encode_ldo56_pd,
    },
    registers::{
        BUCKS_PD_CR, Bank, LDO1234_PD_CR, LDO56_VREF_PD_CR, buck_cr, ldo_cr, refddr_cr, regulator,
    },
    transport::Transport,
    types::{BuckConfig, Ldo4Source, LdoConfig, LdoPullDown, RegulationMode},
};

/// Generates the public per-bank regulator methods.
macro_rules! impl_regulator_bank {
    ($bank:expr, $label:literal $(, $suffix:ident)?) => {
        paste::paste! {
            impl<T: Transport> Stpmic<T> {
                #[doc = "Configures buck `nth` (1..=4) in the " $label " bank."]
                #[doc = ""]
                #[doc = "Updates its pull-down field in `BUCKS_PD_CR`, then writes the whole control register."]
                pub fn [<buck_setup $($suffix)?>](&mut self, nth: u8, config: &BuckConfig) -> Result<(), PmicError> {
                    self.setup_buck($bank, nth, config)
                }

                #[doc = "Enables buck `nth` in the " $label " bank. `Already` if it is on."]
                pub fn [<buck_enable $($suffix)?>](&mut self, nth: u8) -> Result<(), PmicError> {
                    let reg = buck_cr($bank, nth).ok_or(PmicError::Range)?;
                    self.toggle_bit(reg, regulator::EN, true)
                }

                #[doc = "Disables buck `nth` in the " $label " bank. `Already` if it is off."]
                pub fn [<buck_disable $($suffix)?>](&mut self, nth: u8) -> Result<(), PmicError> {
                    let reg = buck_cr($bank, nth).ok_or(PmicError::Range)?;
                    self.toggle_bit(reg, regulator::EN, false)
                }

                #[doc = "Configures LDO `nth` (1..=6) in the " $label " bank."]
                #[doc = ""]
                #[doc = "Bits of the control register that `LdoConfig` does not describe are preserved."]
                pub fn [<ldo_setup $($suffix)?>](&mut self, nth: u8, config: &LdoConfig) -> Result<(), PmicError> {
                    self.setup_ldo($bank, nth, config)
                }

                #[doc = "Enables LDO `nth` in the " $label " bank. `Already` if it is on."]
                pub fn [<ldo_enable $($suffix)?>](&mut self, nth: u8) -> Result<(), PmicError> {
                    let reg = ldo_cr($bank, nth).ok_or(PmicError::Range)?;
                    self.toggle_bit(reg, regulator::EN, true)
                }

                #[doc = "Disables LDO `nth` in the " $label " bank. `Already` if it is off."]
                pub fn [<ldo_disable $($suffix)?>](&mut self, nth: u8) -> Result<(), PmicError> {
                    let reg = ldo_cr($bank, nth).ok_or(PmicError::Range)?;
                    self.toggle_bit(reg, regulator::EN, false)
                }

                #[doc = "Enables the DDR reference in the " $label " bank. `Already` if it is on."]
                pub fn [<refddr_enable $($suffix)?>](&mut self) -> Result<(), PmicError> {
                    self.toggle_bit(refddr_cr($bank), regulator::EN, true)
                }

                #[doc = "Disables the DDR reference in the " $label " bank. `Already` if it is off."]
                pub fn [<refddr_disable $($suffix)?>](&mut self) -> Result<(), PmicError> {
                    self.toggle_bit(refddr_cr($bank), regulator::EN, false)
                }
            }
        }
    };
}

impl_regulator_bank!(Bank::Main, "main");
impl_regulator_bank!(Bank::Alternate, "alternate", _alt);

impl<T: Transport> Stpmic<T> {
    fn setup_buck(&mut self, bank: Bank, nth: u8, config: &BuckConfig) -> Result<(), PmicError> {
        let reg = buck_cr(bank, nth).ok_or(PmicError::Range)?;
        if config.volts > regulator::BUCK_VOUT_MAX {
            return Err(PmicError::Invalid);
        }

        let pd = self.read(BUCKS_PD_CR)?;
        self.write(BUCKS_PD_CR, encode_bucks_pd(pd, nth, config.pull_down)?)?;

        let mut value = config.volts << regulator::BUCK_VOUT_SHIFT;
        if config.mode == RegulationMode::LowPower {
            value |= regulator::BUCK_LP;
        }
        if config.enable {
            value |= regulator::EN;
        }
        self.write(reg, value)
    }

    fn setup_ldo(&mut self, bank: Bank, nth: u8, config: &LdoConfig) -> Result<(), PmicError> {
        let reg = ldo_cr(bank, nth).ok_or(PmicError::Range)?;
        if nth != 4 && config.volts > regulator::LDO_VOUT_MAX {
            return Err(PmicError::Invalid);
        }

        if nth <= 4 {
            let pd = self.read(LDO1234_PD_CR)?;
            self.write(LDO1234_PD_CR, encode_ldo1234_pd(pd, nth, config.pull_down)?)?;
        } else {
            let pd = self.read(LDO56_VREF_PD_CR)?;
            self.write(LDO56_VREF_PD_CR, encode_ldo56_pd(pd, nth, config.pull_down)?)?;
        }

        let (mask, mut bits) = match nth {
            3 => {
                let bypass = if config.bypass { regulator::LDO3_BYPASS } else { 0 };
                (
                    regulator::LDO3_BYPASS | regulator::LDO_VOUT_MASK | regulator::EN,
                    bypass | (config.volts << regulator::LDO_VOUT_SHIFT),
                )
            }
            4 => {
                let src = match config.source {
                    Ldo4Source::Vin => regulator::LDO4_SRC_VIN,
                    Ldo4Source::BstOut => regulator::LDO4_SRC_BSTOUT,
                    Ldo4Source::VbusOtg => regulator::LDO4_SRC_VBUSOTG,
                    Ldo4Source::Off | Ldo4Source::Auto => 0,
                };
                (regulator::LDO4_SRC_MASK | regulator::EN, src)
            }
            _ => (
                regulator::LDO_VOUT_MASK | regulator::EN,
                config.volts << regulator::LDO_VOUT_SHIFT,
            ),
        };

        // LDO4 stays off with no input source
        if config.enable && !(nth == 4 && config.source == Ldo4Source::Off) {
            bits |= regulator::EN;
        }
        self.modify(reg, mask, bits)
    }

    /// Sets the discharge pull-down mode of the DDR reference.
    pub fn refddr_pull_down(&mut self, mode: LdoPullDown) -> Result<(), PmicError> {
        let pd = self.read(LDO56_VREF_PD_CR)?;
        self.write(LDO56_VREF_PD_CR, encode_ldo56_pd(pd, REFDDR_PD_INDEX, mode)?)
    }

    /// Sets the boost pull-down bit of `LDO56_VREF_PD_CR`. When set, the
    /// pull-down stays inactive while the boost is off.
    pub fn set_boost_pull_down_inactive(&mut self, inactive: bool) -> Result<(), PmicError> {
        let pd = self.read(LDO56_VREF_PD_CR)?;
        self.write(LDO56_VREF_PD_CR, encode_ldo56_bst(pd, inactive))
    }
}
