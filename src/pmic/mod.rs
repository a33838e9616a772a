mod batch;
mod control;
pub mod driver;
pub mod encode;
pub mod error;
mod interrupt;
pub mod map;
pub mod registers;
mod regulator;
pub mod shared;
pub(crate) mod table;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use driver::Stpmic;
pub use error::PmicError;
pub use map::{CACHE_SIZE, REGISTER_MAP, RegRange};
pub use registers::Bank;
pub use shared::SharedPmic;
pub use transport::{ChannelTransport, FnTransport, HalTransport, Transport};
pub use types::{
    BuckConfig, BuckPullDown, DeviceState, Ldo4Source, LdoConfig, LdoPullDown, OpMode, Polarity,
    Pull, PwrCtrlConfig, RegulationMode, Timeouts, Version, WakeupConfig,
};

pub mod prelude {
    pub use super::{
        BuckConfig, BuckPullDown, ChannelTransport, DeviceState, FnTransport, HalTransport,
        Ldo4Source, LdoConfig, LdoPullDown, OpMode, PmicError, Polarity, Pull, PwrCtrlConfig,
        RegulationMode, SharedPmic, Stpmic, Timeouts, Transport, Version, WakeupConfig,
    };
}
