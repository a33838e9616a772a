use core::cell::RefCell;

use critical_section::Mutex;

use crate::pmic::{Stpmic, transport::Transport};

/// A driver that can live in a `static` and be reached from several
/// execution contexts, one at a time.
///
/// Every call runs inside a critical section, so a register read-modify-write
/// is never interleaved with another caller's.
pub struct SharedPmic<T> {
    inner: Mutex<RefCell<Stpmic<T>>>,
}

impl<T> core::fmt::Debug for SharedPmic<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedPmic").finish_non_exhaustive()
    }
}

impl<T: Transport> SharedPmic<T> {
    pub const fn new(pmic: Stpmic<T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(pmic)),
        }
    }

    /// Runs `f` with exclusive access to the driver.
    pub fn with<R>(&self, f: impl FnOnce(&mut Stpmic<T>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    pub fn into_inner(self) -> Stpmic<T> {
        self.inner.into_inner().into_inner()
    }
}
