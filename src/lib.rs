//! A `no_std`, no-alloc driver for the STPMIC1 power-management IC.
//!
//! The driver keeps a shadow copy of the chip's control and status registers
//! so that repeated "make sure this is configured" calls cost no bus traffic,
//! and lets a caller stage several register changes and commit them in one
//! pass.
//!
//! # Features
//!
//! - **Write-through register cache** - reads of valid slots and writes of
//!   unchanged values never reach the bus
//! - **Batched writes** - stage changes with `batch_write`, send them with
//!   `batch_flush`
//! - **Pluggable transport** - any `embedded-hal` I2C bus, a pair of
//!   closures, or a context plus function pointers
//! - **Regulator helpers** - bucks, LDOs, DDR reference, PWRCTRL/WAKEUP pins,
//!   watchdog, mask reset and interrupt groups
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   read / write    ┌──────────────────┐
//! │ Regulator helpers │──────────────────▶│   Cached layer   │
//! └───────────────────┘                   │ (elides no-ops)  │
//!          │ batch_write                  └────────┬─────────┘
//!          ▼                                       │ miss / change
//! ┌───────────────────┐   batch_flush     ┌────────▼─────────┐
//! │  Staged slots     │──────────────────▶│   Direct layer   │──▶ Transport
//! └───────────────────┘                   │ (one bus access) │
//!                                         └──────────────────┘
//! ```
//!
//! - A **direct** access always reaches the bus and refreshes the cache slot
//! - A **cached** read of a valid slot, or a cached write of the value already
//!   held, costs nothing
//! - A **staged** write only touches the cache; the flush walks the register
//!   map and writes every mapped register from the cache, once each
//!
//! # Example
//!
//! ```rust,no_run
//! use stpmic::prelude::*;
//! # fn demo<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<(), PmicError> {
//!
//! let mut pmic = Stpmic::new(HalTransport::new(i2c));
//! pmic.init(None)?; // default address 0x33
//!
//! let version = pmic.version()?;
//! assert_eq!(version.major, 2);
//!
//! // Configure buck 2 and LDO 3 at boot
//! pmic.buck_setup(2, &BuckConfig {
//!     pull_down: BuckPullDown::AutoLight,
//!     mode: RegulationMode::HighPower,
//!     volts: 0x1E,
//!     enable: true,
//! })?;
//! match pmic.ldo_enable(3) {
//!     Ok(()) | Err(PmicError::Already) => {}
//!     Err(e) => return Err(e),
//! }
//!
//! // Stage several changes, then send them together
//! pmic.batch_write(0x20, 0x79)?;
//! pmic.batch_write(0x25, 0x7D)?;
//! pmic.batch_flush()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod pmic;

pub mod prelude {
    pub use crate::pmic::prelude::*;
}
