/// Errors that can occur while driving the PMIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmicError {
    /// Argument outside its contract (bad address, unknown register, bad field value).
    Invalid,
    /// Transport capability missing, or the chip reports an unsupported major version.
    NotSupported,
    /// Operation attempted before the device reached the attached state.
    NoDevice,
    /// Bus transaction transferred fewer bytes than requested.
    Timeout,
    /// Requested state already holds, or the driver is already initialized.
    Already,
    /// Regulator index outside its valid band.
    Range,
    /// Operation needs a feature that is currently turned off.
    Disabled,
    /// Internal consistency failure, e.g. the initial cache load did not complete.
    Unknown,
}

impl core::fmt::Display for PmicError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PmicError::Invalid => write!(f, "argument out of range or malformed"),
            PmicError::NotSupported => write!(f, "capability or chip version not supported"),
            PmicError::NoDevice => write!(f, "device not attached"),
            PmicError::Timeout => write!(f, "bus transaction timed out"),
            PmicError::Already => write!(f, "requested state already holds"),
            PmicError::Range => write!(f, "regulator index out of range"),
            PmicError::Disabled => write!(f, "feature is disabled"),
            PmicError::Unknown => write!(f, "internal consistency failure"),
        }
    }
}
