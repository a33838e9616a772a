//! Staged writes, batch flush and full cache reload.
//!
//! Both the flush and the reload walk [`REGISTER_MAP`] band by band. A
//! failure stops the current band but the walk resumes with the next one; the
//! operation succeeds only if every attempted register succeeded and otherwise
//! reports the last error seen.

use heapless::Vec;

use crate::pmic::{
    PmicError, Stpmic,
    map::{CACHE_SIZE, REGISTER_MAP, check_reg},
    transport::Transport,
};

impl<T: Transport> Stpmic<T> {
    /// Stages `value` for `reg` without touching the bus.
    ///
    /// The slot holds the value but stays invalid until flushed. Staging the
    /// same register twice keeps only the latest value.
    ///
    /// # Errors
    /// * [`PmicError::NoDevice`] - driver not attached
    /// * [`PmicError::Invalid`] - `reg` is out of range or has no cache slot
    pub fn batch_write(&mut self, reg: u8, value: u8) -> Result<(), PmicError> {
        self.ensure_attached()?;
        let reg = check_reg(reg)?;
        if !self.cache.stage(reg, value) {
            return Err(PmicError::Invalid);
        }
        Ok(())
    }

    /// Writes the cached value of every register covered by [`REGISTER_MAP`],
    /// in map order, one direct write each.
    ///
    /// Staged and unstaged registers alike are sent, so the bus ends up
    /// matching the cache for the whole map.
    pub fn batch_flush(&mut self) -> Result<(), PmicError> {
        self.ensure_attached()?;
        self.walk_map(|pmic, reg| {
            let value = pmic.cache.raw_value(reg)?;
            Some(pmic.write_direct(reg, value))
        })
    }

    /// Re-reads every register covered by [`REGISTER_MAP`] into the cache.
    pub fn reload_cache(&mut self) -> Result<(), PmicError> {
        self.ensure_attached()?;
        self.walk_map(|pmic, reg| Some(pmic.read_direct(reg).map(|_| ())))
    }

    /// Staged registers still waiting for a flush, ascending.
    pub fn staged_registers(&self) -> Vec<u8, CACHE_SIZE> {
        let mut out = Vec::new();
        self.cache.iter_staged(|reg| {
            // Capacity equals the slot count, so this cannot overflow.
            let _ = out.push(reg);
        });
        out
    }

    pub fn has_staged(&self) -> bool {
        self.cache.any_staged()
    }

    pub fn is_staged(&self, reg: u8) -> bool {
        self.cache.is_staged(reg)
    }

    /// Drops every staged write. The affected slots stay invalid, so the next
    /// access re-reads hardware.
    pub fn discard_batch(&mut self) {
        self.cache.clear_staged();
    }

    /// Calls `op` for each mapped register. `None` means "no slot" and is not
    /// counted as an attempt.
    fn walk_map<F>(&mut self, mut op: F) -> Result<(), PmicError>
    where
        F: FnMut(&mut Self, u8) -> Option<Result<(), PmicError>>,
    {
        let mut total = 0usize;
        let mut success = 0usize;
        let mut last_err = None;

        for range in REGISTER_MAP {
            for reg in range.ids() {
                let Some(result) = op(self, reg) else {
                    continue;
                };
                total += 1;
                if let Err(e) = result {
                    last_err = Some(e);
                    break;
                }
                success += 1;
            }
        }

        if success >= total {
            return Ok(());
        }
        Err(last_err.unwrap_or(PmicError::Unknown))
    }
}
