use bitmaps::{Bits, BitsImpl, Bitmap};

use crate::pmic::types::{CacheSlot, SlotState};

/// Register cache: one slot per cacheable ID plus a staged-write bitmap.
///
/// Staged slots are always `Invalid`; the staged bit only records that the
/// slot value is waiting for a flush. IDs `>= N` have no slot and every
/// method treats them as absent.
pub(crate) struct RegisterCache<const N: usize>
where
    BitsImpl<N>: Bits,
{
    slots: [CacheSlot; N],
    staged: Bitmap<N>,
}

impl<const N: usize> RegisterCache<N>
where
    BitsImpl<N>: Bits,
{
    pub(crate) fn new() -> Self {
        Self {
            slots: [CacheSlot::EMPTY; N],
            staged: Bitmap::new(),
        }
    }

    pub(crate) fn slot(&self, reg: u8) -> Option<&CacheSlot> {
        self.slots.get(reg as usize)
    }

    /// Cached value, if the slot exists and can be trusted.
    pub(crate) fn valid_value(&self, reg: u8) -> Option<u8> {
        self.slot(reg)
            .filter(|slot| slot.state == SlotState::Valid)
            .map(|slot| slot.value)
    }

    /// Raw slot value regardless of trust.
    pub(crate) fn raw_value(&self, reg: u8) -> Option<u8> {
        self.slot(reg).map(|slot| slot.value)
    }

    /// Records a value observed on (or written to) the bus.
    pub(crate) fn store(&mut self, reg: u8, value: u8) {
        if let Some(slot) = self.slots.get_mut(reg as usize) {
            *slot = CacheSlot {
                value,
                state: SlotState::Valid,
            };
            self.staged.set(reg as usize, false);
        }
    }

    pub(crate) fn invalidate(&mut self, reg: u8) {
        if let Some(slot) = self.slots.get_mut(reg as usize) {
            slot.state = SlotState::Invalid;
        }
    }

    /// Stores `value` as a pending write. Returns false if `reg` has no slot.
    pub(crate) fn stage(&mut self, reg: u8, value: u8) -> bool {
        match self.slots.get_mut(reg as usize) {
            Some(slot) => {
                *slot = CacheSlot {
                    value,
                    state: SlotState::Invalid,
                };
                self.staged.set(reg as usize, true);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_staged(&self, reg: u8) -> bool {
        (reg as usize) < N && self.staged.get(reg as usize)
    }

    pub(crate) fn any_staged(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Calls `f` for every staged ID in ascending order.
    pub(crate) fn iter_staged<F>(&self, mut f: F)
    where
        F: FnMut(u8),
    {
        let mut idx = self.staged.first_index();
        while let Some(reg) = idx {
            f(reg as u8);
            idx = self.staged.next_index(reg);
        }
    }

    /// Drops every staged bit. Slot values stay `Invalid`.
    pub(crate) fn clear_staged(&mut self) {
        self.staged = Bitmap::new();
    }
}
