use crate::pmic::{
    PmicError,
    map::{CACHE_SIZE, check_reg, is_cacheable},
    registers::{DEFAULT_ADDRESS, SUPPORTED_MAJOR_VERSION, VERSION_SR},
    table::RegisterCache,
    transport::{BUS_READ, BUS_WRITE, Transport, addr_byte},
    types::{DeviceState, Timeouts, Version},
};

/// STPMIC1 driver handle.
///
/// Owns the transport, the device state and the register cache. Every
/// operation is blocking and must be serialized by the caller; wrap the
/// handle in [`SharedPmic`](crate::pmic::SharedPmic) to share it between
/// execution contexts.
pub struct Stpmic<T> {
    transport: T,
    address: u8,
    state: DeviceState,
    timeouts: Timeouts,
    pub(crate) cache: RegisterCache<CACHE_SIZE>,
}

impl<T: Transport> Stpmic<T> {
    /// Creates a driver in the `NotInitialized` state. No bus traffic.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            address: DEFAULT_ADDRESS,
            state: DeviceState::NotInitialized,
            timeouts: Timeouts::default(),
            cache: RegisterCache::new(),
        }
    }

    /// Brings the device up: checks the chip version, then loads the cache.
    ///
    /// `None` selects the default address `0x33`. On any failure the driver
    /// returns to `NotInitialized` so `init` can be retried.
    ///
    /// # Errors
    /// * [`PmicError::Invalid`] - `address` does not fit in 7 bits
    /// * [`PmicError::Already`] - the driver is not `NotInitialized`
    /// * [`PmicError::NotSupported`] - the transport is incomplete, or the
    ///   chip's major version is not supported
    /// * [`PmicError::Timeout`] - the version register could not be read
    /// * [`PmicError::Unknown`] - the cache reload did not fully succeed
    pub fn init(&mut self, address: Option<u8>) -> Result<(), PmicError> {
        if matches!(address, Some(addr) if addr > 0x7F) {
            return Err(PmicError::Invalid);
        }
        if self.state != DeviceState::NotInitialized {
            return Err(PmicError::Already);
        }
        if !self.transport.is_available() {
            return Err(PmicError::NotSupported);
        }

        self.address = address.unwrap_or(DEFAULT_ADDRESS);
        self.cache = RegisterCache::new();
        self.state = DeviceState::Attached;

        let version = match self.read_direct(VERSION_SR) {
            Ok(raw) => Version::from_register(raw),
            Err(e) => {
                self.state = DeviceState::NotInitialized;
                return Err(e);
            }
        };
        if version.major != SUPPORTED_MAJOR_VERSION {
            self.state = DeviceState::NotInitialized;
            return Err(PmicError::NotSupported);
        }

        if self.reload_cache().is_err() {
            self.state = DeviceState::NotInitialized;
            return Err(PmicError::Unknown);
        }

        self.state = DeviceState::Ready;
        Ok(())
    }

    pub(crate) fn ensure_attached(&self) -> Result<(), PmicError> {
        if self.state < DeviceState::Attached {
            return Err(PmicError::NoDevice);
        }
        Ok(())
    }

    /// Reads a register from the bus, bypassing the cache.
    ///
    /// The cache slot, if any, is refreshed with the value read.
    pub fn read_direct(&mut self, reg: u8) -> Result<u8, PmicError> {
        self.ensure_attached()?;
        let reg = check_reg(reg)?;

        let select = [reg];
        let sent = self.transport.write(
            addr_byte(self.address, BUS_WRITE),
            &select,
            self.timeouts.read,
        );
        if sent != select.len() {
            return Err(PmicError::Timeout);
        }

        let mut buf = [0u8; 1];
        let got = self
            .transport
            .read(addr_byte(self.address, BUS_READ), &mut buf, self.timeouts.read);
        if got != buf.len() {
            return Err(PmicError::Timeout);
        }

        self.cache.store(reg, buf[0]);
        Ok(buf[0])
    }

    /// Writes a register on the bus, bypassing the cache.
    ///
    /// The cache slot, if any, takes the written value and becomes valid.
    pub fn write_direct(&mut self, reg: u8, value: u8) -> Result<(), PmicError> {
        self.ensure_attached()?;
        let reg = check_reg(reg)?;

        let packet = [reg, value];
        let sent = self.transport.write(
            addr_byte(self.address, BUS_WRITE),
            &packet,
            self.timeouts.write,
        );
        if sent != packet.len() {
            return Err(PmicError::Timeout);
        }

        self.cache.store(reg, value);
        Ok(())
    }

    /// Reads a register, serving it from the cache when the slot is valid.
    pub fn read(&mut self, reg: u8) -> Result<u8, PmicError> {
        self.ensure_attached()?;
        let reg = check_reg(reg)?;

        match self.cache.valid_value(reg) {
            Some(value) => Ok(value),
            None => self.read_direct(reg),
        }
    }

    /// Writes a register unless the valid cached value already equals `value`.
    pub fn write(&mut self, reg: u8, value: u8) -> Result<(), PmicError> {
        self.ensure_attached()?;
        let reg = check_reg(reg)?;

        if self.cache.valid_value(reg) == Some(value) {
            return Ok(());
        }
        self.write_direct(reg, value)
    }

    /// Marks a register's cache slot invalid so the next access hits the bus.
    ///
    /// Registers without a slot are validated and otherwise ignored.
    pub fn clear_cache(&mut self, reg: u8) -> Result<(), PmicError> {
        self.ensure_attached()?;
        let reg = check_reg(reg)?;
        self.cache.invalidate(reg);
        Ok(())
    }

    /// Read-modify-write of the bits in `mask` through the cached layer.
    pub(crate) fn modify(&mut self, reg: u8, mask: u8, bits: u8) -> Result<(), PmicError> {
        let old = self.read(reg)?;
        self.write(reg, (old & !mask) | (bits & mask))
    }

    /// Sets (`on`) or clears `bit`, failing `Already` when it already holds.
    pub(crate) fn toggle_bit(&mut self, reg: u8, bit: u8, on: bool) -> Result<(), PmicError> {
        let old = self.read(reg)?;
        if ((old & bit) != 0) == on {
            return Err(PmicError::Already);
        }
        let new = if on { old | bit } else { old & !bit };
        self.write(reg, new)
    }

    /// Chip revision, from the cached `VERSION_SR`.
    pub fn version(&mut self) -> Result<Version, PmicError> {
        self.read(VERSION_SR).map(Version::from_register)
    }

    pub fn set_timeouts(&mut self, timeouts: Timeouts) {
        self.timeouts = timeouts;
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// 7-bit bus address in use (the default until `init` resolves one).
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns true if `reg` has a valid cache slot.
    pub fn is_cached(&self, reg: u8) -> bool {
        is_cacheable(reg) && self.cache.valid_value(reg).is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the driver and hands the transport back.
    pub fn release(self) -> T {
        self.transport
    }
}
