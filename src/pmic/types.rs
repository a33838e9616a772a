use crate::pmic::registers::restart;

/// Initial read/write timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 100;

/// Driver bring-up state. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeviceState {
    NotInitialized,
    /// Bus address accepted, chip version not yet confirmed.
    Attached,
    /// Version checked and the cache fully loaded.
    Ready,
}

/// Trust level of a cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Value mirrors the hardware register.
    Valid,
    /// Value must not be used; the next access goes to the bus.
    Invalid,
}

/// One cached register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSlot {
    pub value: u8,
    pub state: SlotState,
}

impl CacheSlot {
    pub const EMPTY: Self = Self {
        value: 0,
        state: SlotState::Invalid,
    };
}

/// Per-transaction bus timeouts, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub write: u32,
    pub read: u32,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            write: DEFAULT_TIMEOUT_MS,
            read: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Chip revision decoded from `VERSION_SR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub fn from_register(raw: u8) -> Self {
        Self {
            major: (raw >> 4) & 0x0F,
            minor: raw & 0x0F,
        }
    }
}

/// Pin pull configuration. The two bits map onto a PD/PU pair in `PADS_PULL_CR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Pull {
    Off = 0,
    Up = 1,
    Down = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

/// Buck discharge pull-down mode, 2 bits per buck in `BUCKS_PD_CR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BuckPullDown {
    /// Light pull-down active while the buck is disabled.
    AutoLight = 0,
    /// High pull-down active while the buck is disabled.
    AutoHigh = 1,
    ForcedInactive = 2,
    /// Light pull-down always active.
    ForcedActive = 3,
}

/// LDO / REFDDR discharge pull-down mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LdoPullDown {
    /// Active while the LDO is disabled.
    Active = 0,
    ForcedInactive = 1,
    ForcedInactiveAlt = 2,
    ForcedActive = 3,
}

/// Buck regulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulationMode {
    HighPower,
    LowPower,
}

/// Buck converter setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuckConfig {
    pub pull_down: BuckPullDown,
    pub mode: RegulationMode,
    /// Raw VOUT selection code, 0..=63.
    pub volts: u8,
    pub enable: bool,
}

/// LDO4 input supply selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ldo4Source {
    Off,
    Vin,
    VbusOtg,
    BstOut,
    /// No source forced; the chip selects automatically.
    Auto,
}

impl Ldo4Source {
    /// Decodes the 2-bit LDO4 source field of `RESTART_SR`.
    pub fn from_restart_status(raw: u8) -> Self {
        match (raw & restart::LDO4_SRC_MASK) >> restart::LDO4_SRC_SHIFT {
            0 => Ldo4Source::Off,
            1 => Ldo4Source::Vin,
            2 => Ldo4Source::VbusOtg,
            _ => Ldo4Source::BstOut,
        }
    }
}

/// LDO setup. Fields that do not apply to the selected LDO are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LdoConfig {
    pub pull_down: LdoPullDown,
    pub enable: bool,
    /// Raw VOUT selection code, 0..=31. Not used by LDO4.
    pub volts: u8,
    /// LDO3 only.
    pub bypass: bool,
    /// LDO4 only. `Off` keeps the LDO disabled regardless of `enable`.
    pub source: Ldo4Source,
}

impl Default for LdoConfig {
    fn default() -> Self {
        Self {
            pull_down: LdoPullDown::Active,
            enable: false,
            volts: 0,
            bypass: false,
            source: Ldo4Source::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Main,
    Alternate,
}

/// PWRCTRL pin setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwrCtrlConfig {
    pub polarity: Polarity,
    pub pull: Pull,
    pub enable: bool,
}

/// WAKEUP pin setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeupConfig {
    pub pull: Pull,
    /// Raw value of `PADS_PULL_CR.WKUP_EN`. The bit has reverse logic:
    /// `true` disables the WAKEUP detector, `false` leaves it active.
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_splits_nibbles() {
        assert_eq!(Version::from_register(0x21), Version { major: 2, minor: 1 });
        assert_eq!(Version::from_register(0x1F), Version { major: 1, minor: 15 });
    }

    #[test]
    fn ldo4_source_decodes_restart_field() {
        assert_eq!(Ldo4Source::from_restart_status(0b1000_0000), Ldo4Source::Off);
        assert_eq!(Ldo4Source::from_restart_status(0b0010_0000), Ldo4Source::Vin);
        assert_eq!(Ldo4Source::from_restart_status(0b0100_0000), Ldo4Source::VbusOtg);
        assert_eq!(Ldo4Source::from_restart_status(0b0110_0011), Ldo4Source::BstOut);
    }

    #[test]
    fn states_are_ordered() {
        assert!(DeviceState::NotInitialized < DeviceState::Attached);
        assert!(DeviceState::Attached < DeviceState::Ready);
    }
}
