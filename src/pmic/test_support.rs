//! Test support utilities - only compiled in test builds.

use bitmaps::Bitmap;
use heapless::Vec;

use crate::pmic::{Stpmic, registers::VERSION_SR, transport::Transport};

/// Fake STPMIC1 on the bus: a flat 256-byte register file.
///
/// A one-byte write selects a register, a two-byte write stores a value, a
/// read returns the selected register. Registers flagged in `fail` NAK both.
pub struct MockBus {
    pub regs: [u8; 256],
    /// Every call into the transport, successful or not.
    pub transactions: usize,
    /// Completed data reads.
    pub reads: usize,
    /// Completed register writes, in order.
    pub writes: Vec<(u8, u8), 64>,
    pub fail: Bitmap<256>,
    pub last_addr: Option<u8>,
    pub last_timeout: Option<u32>,
    selected: u8,
}

impl MockBus {
    /// Register file of zeros with `version` in `VERSION_SR`.
    pub fn new(version: u8) -> Self {
        let mut regs = [0u8; 256];
        regs[VERSION_SR as usize] = version;
        Self {
            regs,
            transactions: 0,
            reads: 0,
            writes: Vec::new(),
            fail: Bitmap::new(),
            last_addr: None,
            last_timeout: None,
            selected: 0,
        }
    }

    pub fn reset_counters(&mut self) {
        self.transactions = 0;
        self.reads = 0;
        self.writes.clear();
    }

    /// Register IDs written so far, in order.
    pub fn written_regs(&self) -> Vec<u8, 64> {
        self.writes.iter().map(|&(reg, _)| reg).collect()
    }
}

impl Transport for MockBus {
    fn write(&mut self, addr_byte: u8, bytes: &[u8], timeout_ms: u32) -> usize {
        self.transactions += 1;
        self.last_addr = Some(addr_byte);
        self.last_timeout = Some(timeout_ms);

        let Some(&reg) = bytes.first() else {
            return 0;
        };
        if self.fail.get(reg as usize) {
            return 0;
        }
        match bytes {
            [_] => self.selected = reg,
            [_, value] => {
                self.regs[reg as usize] = *value;
                let _ = self.writes.push((reg, *value));
            }
            _ => return 0,
        }
        bytes.len()
    }

    fn read(&mut self, addr_byte: u8, buf: &mut [u8], timeout_ms: u32) -> usize {
        self.transactions += 1;
        self.last_addr = Some(addr_byte);
        self.last_timeout = Some(timeout_ms);

        if self.fail.get(self.selected as usize) {
            return 0;
        }
        buf.fill(self.regs[self.selected as usize]);
        self.reads += 1;
        buf.len()
    }
}

/// Driver over a version 2.1 chip, past `init`, with counters cleared.
pub fn ready_pmic() -> Stpmic<MockBus> {
    ready_pmic_with(|_| {})
}

/// Like [`ready_pmic`], seeding the register file before `init`.
pub fn ready_pmic_with<F>(seed: F) -> Stpmic<MockBus>
where
    F: FnOnce(&mut [u8; 256]),
{
    let mut bus = MockBus::new(0x21);
    seed(&mut bus.regs);
    let mut pmic = Stpmic::new(bus);
    pmic.init(None).unwrap();
    pmic.transport_mut().reset_counters();
    pmic
}
