use crate::pmic::{
    PmicError, Stpmic,
    registers::{
        BUCKS_MRST_CR, LDOS_MRST_CR, MAIN_CR, NVM_SR, OCP_BUCKS_BSW_SR, OCP_LDOS_SR,
        PADS_PULL_CR, RESTART_SR, TURN_OFF_SR, TURN_ON_SR, WDG_CR, WDG_TMR_CR, main_cr, mrst, nvm,
        pads_pull, restart, wdg,
    },
    transport::Transport,
    types::{Ldo4Source, OpMode, Polarity, PwrCtrlConfig, WakeupConfig},
};

const PWRCTRL_PULL: u8 = pads_pull::PWRCTRL_PD | pads_pull::PWRCTRL_PU;
const WKUP_PULL: u8 = pads_pull::WKUP_PD | pads_pull::WKUP_PU;

impl<T: Transport> Stpmic<T> {
    // Status registers

    /// `TURN_ON_SR`, from the cache.
    pub fn turn_on_status(&mut self) -> Result<u8, PmicError> {
        self.read(TURN_ON_SR)
    }

    /// `TURN_OFF_SR`, from the cache.
    pub fn turn_off_status(&mut self) -> Result<u8, PmicError> {
        self.read(TURN_OFF_SR)
    }

    /// `RESTART_SR`, from the cache.
    pub fn restart_status(&mut self) -> Result<u8, PmicError> {
        self.read(RESTART_SR)
    }

    /// LDO over-current flags, read from the bus. LDO `n` is bit `n - 1`.
    pub fn ocp_ldos_status(&mut self) -> Result<u8, PmicError> {
        self.read_direct(OCP_LDOS_SR)
    }

    /// Buck, boost and switch over-current flags, read from the bus.
    pub fn ocp_bucks_status(&mut self) -> Result<u8, PmicError> {
        self.read_direct(OCP_BUCKS_BSW_SR)
    }

    pub fn op_mode(&mut self) -> Result<OpMode, PmicError> {
        let sr = self.restart_status()?;
        Ok(if (sr & restart::OP_MODE) != 0 {
            OpMode::Alternate
        } else {
            OpMode::Main
        })
    }

    /// Input source LDO4 is currently running from.
    pub fn ldo4_source(&mut self) -> Result<Ldo4Source, PmicError> {
        self.restart_status().map(Ldo4Source::from_restart_status)
    }

    /// Requests a software switch-off. The write always reaches the bus.
    pub fn request_switch_off(&mut self) -> Result<(), PmicError> {
        let cr = self.read(MAIN_CR)?;
        self.write_direct(MAIN_CR, cr | main_cr::SWOFF)
    }

    // PWRCTRL pin

    /// Configures the PWRCTRL pin pull, then its polarity and enable bit.
    pub fn pwrctrl_init(&mut self, config: &PwrCtrlConfig) -> Result<(), PmicError> {
        let mut mcr = self.read(MAIN_CR)?;
        let mut ppcr = self.read(PADS_PULL_CR)?;

        mcr &= !(main_cr::PWRCTRL_EN | main_cr::PWRCTRL_POL);
        if config.polarity == Polarity::ActiveHigh {
            mcr |= main_cr::PWRCTRL_POL;
        }
        if config.enable {
            mcr |= main_cr::PWRCTRL_EN;
        }

        ppcr &= !PWRCTRL_PULL;
        ppcr |= ((config.pull as u8) << pads_pull::PWRCTRL_SHIFT) & PWRCTRL_PULL;

        self.write(PADS_PULL_CR, ppcr)?;
        self.write(MAIN_CR, mcr)
    }

    pub fn pwrctrl_enable(&mut self) -> Result<(), PmicError> {
        self.toggle_bit(MAIN_CR, main_cr::PWRCTRL_EN, true)
    }

    pub fn pwrctrl_disable(&mut self) -> Result<(), PmicError> {
        self.toggle_bit(MAIN_CR, main_cr::PWRCTRL_EN, false)
    }

    /// Disables the PWRCTRL function and releases its pull. Polarity is kept.
    pub fn pwrctrl_deinit(&mut self) -> Result<(), PmicError> {
        let mcr = self.read(MAIN_CR)?;
        let ppcr = self.read(PADS_PULL_CR)?;
        self.write(PADS_PULL_CR, ppcr & !PWRCTRL_PULL)?;
        self.write(MAIN_CR, mcr & !main_cr::PWRCTRL_EN)
    }

    // WAKEUP pin

    /// Sets the WAKEUP pull and writes `config.enable` to `WKUP_EN` as is.
    /// See [`WakeupConfig::enable`] for the bit's reverse logic.
    pub fn wakeup_init(&mut self, config: &WakeupConfig) -> Result<(), PmicError> {
        let mut bits = ((config.pull as u8) << pads_pull::WKUP_SHIFT) & WKUP_PULL;
        if config.enable {
            bits |= pads_pull::WKUP_EN;
        }
        self.modify(PADS_PULL_CR, WKUP_PULL | pads_pull::WKUP_EN, bits)
    }

    pub fn wakeup_deinit(&mut self) -> Result<(), PmicError> {
        self.modify(PADS_PULL_CR, WKUP_PULL | pads_pull::WKUP_EN, 0)
    }

    // Mask reset

    /// Combined MRST mask: `BUCKS_MRST_CR` in the high byte, `LDOS_MRST_CR`
    /// in the low byte. See [`mrst`] for the bit names.
    pub fn mrst(&mut self) -> Result<u16, PmicError> {
        let bucks = self.read(BUCKS_MRST_CR)?;
        let ldos = self.read(LDOS_MRST_CR)?;
        Ok(u16::from_be_bytes([bucks, ldos]))
    }

    /// Writes the MRST bits of `mask`; reserved bits of both registers stay.
    pub fn set_mrst(&mut self, mask: u16) -> Result<(), PmicError> {
        let [hi, lo] = mask.to_be_bytes();
        let bucks = self.read(BUCKS_MRST_CR)?;
        let ldos = self.read(LDOS_MRST_CR)?;

        let bucks = (bucks & !mrst::BUCKS_MASK) | (hi & mrst::BUCKS_MASK);
        let ldos = (ldos & !mrst::LDOS_MASK) | (lo & mrst::LDOS_MASK);

        self.write(BUCKS_MRST_CR, bucks)?;
        self.write(LDOS_MRST_CR, ldos)
    }

    // Watchdog

    /// Arms the watchdog for `seconds` (1..=255). Zero disables it.
    pub fn watchdog_init(&mut self, seconds: u8) -> Result<(), PmicError> {
        if seconds == 0 {
            return self.watchdog_deinit();
        }
        // Timer counts 0..=255 for 1..=256 s
        self.write(WDG_TMR_CR, seconds - 1)?;
        self.write_direct(WDG_CR, wdg::RST | wdg::EN)
    }

    pub fn watchdog_deinit(&mut self) -> Result<(), PmicError> {
        self.write_direct(WDG_CR, wdg::RST)
    }

    /// Restarts the watchdog countdown.
    ///
    /// # Errors
    /// * [`PmicError::Disabled`] - the watchdog is not enabled
    pub fn watchdog_reset(&mut self) -> Result<(), PmicError> {
        let cr = self.read(WDG_CR)?;
        if (cr & wdg::EN) == 0 {
            return Err(PmicError::Disabled);
        }
        self.write_direct(WDG_CR, wdg::RST | wdg::EN)
    }

    /// True while the NVM controller is busy. Always read from the bus.
    pub fn nvm_is_busy(&mut self) -> Result<bool, PmicError> {
        Ok((self.read_direct(NVM_SR)? & nvm::BUSY) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmic::{
        registers::VERSION_SR,
        test_support::{ready_pmic, ready_pmic_with},
        types::Pull,
    };

    #[test]
    fn status_getters() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[TURN_ON_SR as usize] = 0x04;
            regs[RESTART_SR as usize] = restart::OP_MODE | (2 << restart::LDO4_SRC_SHIFT);
            regs[OCP_LDOS_SR as usize] = 0x20;
            regs[OCP_BUCKS_BSW_SR as usize] = 0x41;
        });
        assert_eq!(pmic.turn_on_status(), Ok(0x04));
        assert_eq!(pmic.turn_off_status(), Ok(0x00));
        assert_eq!(pmic.op_mode(), Ok(OpMode::Alternate));
        assert_eq!(pmic.ldo4_source(), Ok(Ldo4Source::VbusOtg));
        assert_eq!(pmic.transport().transactions, 0);

        // Over-current flags always come from the bus
        assert_eq!(pmic.ocp_ldos_status(), Ok(0x20));
        assert_eq!(pmic.ocp_bucks_status(), Ok(0x41));
        assert_eq!(pmic.transport().reads, 2);
    }

    #[test]
    fn switch_off_always_hits_the_bus() {
        let mut pmic = ready_pmic_with(|regs| regs[MAIN_CR as usize] = main_cr::SWOFF);
        pmic.request_switch_off().unwrap();
        assert_eq!(pmic.transport().writes.as_slice(), &[(MAIN_CR, main_cr::SWOFF)]);
    }

    #[test]
    fn pwrctrl_init_writes_pads_then_main() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[MAIN_CR as usize] = main_cr::RREQ_EN;
            regs[PADS_PULL_CR as usize] = pads_pull::WKUP_PU | pads_pull::PWRCTRL_PU;
        });
        let config = PwrCtrlConfig {
            polarity: Polarity::ActiveHigh,
            pull: Pull::Down,
            enable: true,
        };
        pmic.pwrctrl_init(&config).unwrap();
        assert_eq!(
            pmic.transport().writes.as_slice(),
            &[
                (PADS_PULL_CR, pads_pull::WKUP_PU | pads_pull::PWRCTRL_PD),
                (
                    MAIN_CR,
                    main_cr::RREQ_EN | main_cr::PWRCTRL_POL | main_cr::PWRCTRL_EN
                ),
            ]
        );

        assert_eq!(pmic.pwrctrl_enable(), Err(PmicError::Already));
        pmic.pwrctrl_disable().unwrap();
        assert_eq!(pmic.pwrctrl_disable(), Err(PmicError::Already));
    }

    #[test]
    fn pwrctrl_deinit_keeps_polarity() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[MAIN_CR as usize] = main_cr::PWRCTRL_POL | main_cr::PWRCTRL_EN;
            regs[PADS_PULL_CR as usize] = pads_pull::PWRCTRL_PD;
        });
        pmic.pwrctrl_deinit().unwrap();
        assert_eq!(pmic.read(MAIN_CR), Ok(main_cr::PWRCTRL_POL));
        assert_eq!(pmic.read(PADS_PULL_CR), Ok(0));
    }

    #[test]
    fn wakeup_init_and_deinit() {
        let mut pmic = ready_pmic_with(|regs| regs[PADS_PULL_CR as usize] = pads_pull::PWRCTRL_PU);
        pmic.wakeup_init(&WakeupConfig {
            pull: Pull::Up,
            enable: true,
        })
        .unwrap();
        assert_eq!(
            pmic.read(PADS_PULL_CR),
            Ok(pads_pull::PWRCTRL_PU | pads_pull::WKUP_EN | pads_pull::WKUP_PU)
        );

        pmic.wakeup_deinit().unwrap();
        assert_eq!(pmic.read(PADS_PULL_CR), Ok(pads_pull::PWRCTRL_PU));
    }

    #[test]
    fn wakeup_enable_is_the_raw_detector_disable_bit() {
        let mut pmic = ready_pmic_with(|regs| regs[PADS_PULL_CR as usize] = pads_pull::WKUP_EN);

        // Clearing WKUP_EN turns the detector on
        pmic.wakeup_init(&WakeupConfig {
            pull: Pull::Down,
            enable: false,
        })
        .unwrap();
        assert_eq!(pmic.read(PADS_PULL_CR), Ok(pads_pull::WKUP_PD));

        pmic.wakeup_init(&WakeupConfig {
            pull: Pull::Down,
            enable: true,
        })
        .unwrap();
        assert_eq!(
            pmic.transport().writes.last(),
            Some(&(PADS_PULL_CR, pads_pull::WKUP_EN | pads_pull::WKUP_PD))
        );
    }

    #[test]
    fn mrst_byte_order() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[BUCKS_MRST_CR as usize] = 0x05;
            regs[LDOS_MRST_CR as usize] = 0x41;
        });
        assert_eq!(pmic.mrst(), Ok(0x0541));
        assert_eq!(pmic.mrst(), Ok(mrst::BUCK1 | mrst::BUCK3 | mrst::REFDDR | mrst::LDO1));
    }

    #[test]
    fn set_mrst_preserves_reserved_bits() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[BUCKS_MRST_CR as usize] = 0xF0;
            regs[LDOS_MRST_CR as usize] = 0x80;
        });
        pmic.set_mrst(0xFFFF).unwrap();
        assert_eq!(
            pmic.transport().writes.as_slice(),
            &[(BUCKS_MRST_CR, 0xFF), (LDOS_MRST_CR, 0xFF)]
        );

        pmic.set_mrst(mrst::BUCK2 | mrst::LDO6).unwrap();
        assert_eq!(pmic.mrst(), Ok(0xF2A0));
    }

    #[test]
    fn watchdog_init_arms_timer() {
        let mut pmic = ready_pmic();
        pmic.watchdog_init(30).unwrap();
        assert_eq!(
            pmic.transport().writes.as_slice(),
            &[(WDG_TMR_CR, 29), (WDG_CR, wdg::RST | wdg::EN)]
        );
        pmic.watchdog_reset().unwrap();
        assert_eq!(pmic.transport().writes.last(), Some(&(WDG_CR, wdg::RST | wdg::EN)));
    }

    #[test]
    fn watchdog_zero_seconds_disables() {
        let mut pmic = ready_pmic();
        pmic.watchdog_init(0).unwrap();
        assert_eq!(pmic.transport().writes.as_slice(), &[(WDG_CR, wdg::RST)]);
        assert_eq!(pmic.watchdog_reset(), Err(PmicError::Disabled));
    }

    #[test]
    fn watchdog_reset_when_disabled() {
        let mut pmic = ready_pmic();
        assert_eq!(pmic.watchdog_reset(), Err(PmicError::Disabled));
        assert!(pmic.transport().writes.is_empty());
    }

    #[test]
    fn nvm_busy_flag() {
        let mut pmic = ready_pmic();
        assert_eq!(pmic.nvm_is_busy(), Ok(false));
        pmic.transport_mut().regs[NVM_SR as usize] = nvm::BUSY;
        assert_eq!(pmic.nvm_is_busy(), Ok(true));
        assert_eq!(pmic.transport().reads, 2);
    }

    #[test]
    fn helpers_stop_at_first_failure() {
        let mut pmic = ready_pmic();
        pmic.transport_mut().fail.set(BUCKS_MRST_CR as usize, true);
        assert_eq!(pmic.set_mrst(0x0101), Err(PmicError::Timeout));
        // LDOS_MRST_CR was never written
        assert!(pmic.transport().writes.is_empty());
        assert_eq!(pmic.read(VERSION_SR), Ok(0x21));
    }
}
