#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

/// Reader-writer lock guarding a global hook registry.
///
/// A poisoned std lock is recovered rather than propagated: hooks never run
/// while the lock is held, so a panic cannot leave the registry half-updated.
#[repr(transparent)]
pub(crate) struct HookLock<T: 'static + Send + Sync>(impl_::RwLock<T>);

impl<T: 'static + Send + Sync> HookLock<T> {
    #[must_use]
    pub(crate) const fn new(value: T) -> Self {
        Self(impl_::RwLock::new(value))
    }

    #[inline]
    pub(crate) fn with_read<R>(&'static self, f: impl FnOnce(&T) -> R) -> R {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(std::sync::PoisonError::into_inner);

        f(&guard)
    }

    #[inline]
    pub(crate) fn with_write<R>(&'static self, f: impl FnOnce(&mut T) -> R) -> R {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self
            .0
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        f(&mut guard)
    }
}
