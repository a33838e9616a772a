//! Bus transport capability.
//!
//! The driver only needs an addressed write and an addressed read with a
//! timeout. Each call returns the number of bytes actually transferred; the
//! driver treats anything short of the requested length as a timeout.

use embedded_hal::i2c::I2c;

/// Read/write bit appended to the 7-bit address.
pub const BUS_WRITE: u8 = 0;
pub const BUS_READ: u8 = 1;

/// Forms the bus-level address byte, `(address << 1) | rw`.
#[inline]
pub const fn addr_byte(address: u8, rw: u8) -> u8 {
    (address << 1) | (rw & 1)
}

pub trait Transport {
    /// Writes `bytes` to the device behind `addr_byte`. Returns bytes written.
    fn write(&mut self, addr_byte: u8, bytes: &[u8], timeout_ms: u32) -> usize;

    /// Fills `buf` from the device behind `addr_byte`. Returns bytes read.
    fn read(&mut self, addr_byte: u8, buf: &mut [u8], timeout_ms: u32) -> usize;

    /// Whether the transport can carry traffic at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Transport over any blocking `embedded-hal` I2C bus.
///
/// `embedded-hal` has no per-call timeout; the timeout argument is ignored
/// and bus timeouts stay a property of the HAL peripheral.
pub struct HalTransport<I> {
    i2c: I,
}

impl<I: I2c> HalTransport<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> Transport for HalTransport<I> {
    fn write(&mut self, addr_byte: u8, bytes: &[u8], _timeout_ms: u32) -> usize {
        match self.i2c.write(addr_byte >> 1, bytes) {
            Ok(()) => bytes.len(),
            Err(_) => 0,
        }
    }

    fn read(&mut self, addr_byte: u8, buf: &mut [u8], _timeout_ms: u32) -> usize {
        match self.i2c.read(addr_byte >> 1, buf) {
            Ok(()) => buf.len(),
            Err(_) => 0,
        }
    }
}

/// Transport built from a read closure and a write closure.
pub struct FnTransport<R, W> {
    read: R,
    write: W,
}

impl<R, W> FnTransport<R, W>
where
    R: FnMut(u8, &mut [u8], u32) -> usize,
    W: FnMut(u8, &[u8], u32) -> usize,
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> Transport for FnTransport<R, W>
where
    R: FnMut(u8, &mut [u8], u32) -> usize,
    W: FnMut(u8, &[u8], u32) -> usize,
{
    fn write(&mut self, addr_byte: u8, bytes: &[u8], timeout_ms: u32) -> usize {
        (self.write)(addr_byte, bytes, timeout_ms)
    }

    fn read(&mut self, addr_byte: u8, buf: &mut [u8], timeout_ms: u32) -> usize {
        (self.read)(addr_byte, buf, timeout_ms)
    }
}

pub type ChannelReadFn<C> = fn(&mut C, u8, &mut [u8], u32) -> usize;
pub type ChannelWriteFn<C> = fn(&mut C, u8, &[u8], u32) -> usize;

/// Transport described by a context and a pair of optional function pointers.
///
/// A channel missing either function is unavailable; `Stpmic::init` refuses it.
pub struct ChannelTransport<C> {
    pub context: C,
    pub read: Option<ChannelReadFn<C>>,
    pub write: Option<ChannelWriteFn<C>>,
}

impl<C> ChannelTransport<C> {
    pub fn new(context: C, read: ChannelReadFn<C>, write: ChannelWriteFn<C>) -> Self {
        Self {
            context,
            read: Some(read),
            write: Some(write),
        }
    }
}

impl<C> Transport for ChannelTransport<C> {
    fn write(&mut self, addr_byte: u8, bytes: &[u8], timeout_ms: u32) -> usize {
        match self.write {
            Some(f) => f(&mut self.context, addr_byte, bytes, timeout_ms),
            None => 0,
        }
    }

    fn read(&mut self, addr_byte: u8, buf: &mut [u8], timeout_ms: u32) -> usize {
        match self.read {
            Some(f) => f(&mut self.context, addr_byte, buf, timeout_ms),
            None => 0,
        }
    }

    fn is_available(&self) -> bool {
        self.read.is_some() && self.write.is_some()
    }
}
