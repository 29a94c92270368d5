//! Capture hooks for observing failures.
//!
//! The crate itself never logs: a captured failure is stored in the
//! [`Try`](crate::Try) and surfaces only when the caller extracts it. When you
//! do want to see failures as they are captured, for logging or metrics,
//! register a [`CaptureHook`]. Hooks run every time a capturing boundary
//! ([`Try::of`](crate::Try::of), [`Try::map`](crate::Try::map),
//! [`Try::filter`](crate::Try::filter) and friends) turns caller code's failure
//! into a [`Try::Failure`](crate::Try::Failure).
//!
//! Constructing a failure directly with
//! [`Try::failure`](crate::Try::failure) is not a capture and does not run
//! hooks. A failure that is raised again (with
//! [`Try::get_or_raise`](crate::Try::get_or_raise) or
//! [`Error::raise`](crate::Error::raise)) and recovered by an enclosing
//! boundary is captured a second time, so hooks see the same handle once per
//! boundary. Use [`Error::ptr_eq`](crate::Error::ptr_eq) to tell repeats
//! apart.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use attempt::{Try, hooks::register_capture_hook};
//!
//! static CAPTURED: AtomicUsize = AtomicUsize::new(0);
//!
//! register_capture_hook(|error: &attempt::Error| {
//!     if error.is::<std::num::ParseIntError>() {
//!         CAPTURED.fetch_add(1, Ordering::Relaxed);
//!     }
//! });
//!
//! let _ = Try::of(|| "nope".parse::<i32>());
//! assert_eq!(CAPTURED.load(Ordering::Relaxed), 1);
//! ```
//!
//! The `attempt-tracing` crate provides a hook that emits `tracing` events.

mod hook_lock;

use alloc::vec::Vec;

use triomphe::Arc;
use unsize::CoerceUnsize;

use self::hook_lock::HookLock;
use crate::Error;

type Hook = Arc<dyn CaptureHook>;

static HOOKS: HookLock<Vec<Hook>> = HookLock::new(Vec::new());

/// A hook that is called whenever a failure is captured.
///
/// Any `Fn(&Error) + Send + Sync + 'static` closure is a `CaptureHook`.
///
/// Hooks may themselves use [`Try`](crate::Try): the registry is not locked
/// while hooks run. A hook that captures failures will, however, be called
/// again for those failures, so it should not do so unconditionally.
///
/// Hooks run after the capturing boundary has closed. A hook that panics
/// unwinds out of the operation that captured the failure.
///
/// # Examples
///
/// ```rust
/// use attempt::{Error, hooks::{CaptureHook, register_capture_hook}};
///
/// struct StderrHook;
///
/// impl CaptureHook for StderrHook {
///     fn on_capture(&self, error: &Error) {
///         eprintln!("captured at {}: {error:#}", error.location());
///     }
/// }
///
/// register_capture_hook(StderrHook);
/// ```
pub trait CaptureHook: 'static + Send + Sync {
    /// Called with the failure that was just captured.
    fn on_capture(&self, error: &Error);
}

impl<F> CaptureHook for F
where
    F: Fn(&Error) + Send + Sync + 'static,
{
    fn on_capture(&self, error: &Error) {
        self(error);
    }
}

/// Registers a new capture hook.
///
/// Hooks are called in registration order and stay registered for the
/// lifetime of the program, or until [`clear_capture_hooks`] is called.
pub fn register_capture_hook(hook: impl CaptureHook) {
    let hook: Hook = Arc::new(hook).unsize(unsize::Coercion!(to dyn CaptureHook));
    HOOKS.with_write(|hooks| hooks.push(hook));
}

/// Removes every registered capture hook, returning how many were removed.
pub fn clear_capture_hooks() -> usize {
    HOOKS.with_write(|hooks| core::mem::take(hooks).len())
}

/// Returns the number of registered capture hooks.
#[must_use]
pub fn capture_hook_count() -> usize {
    HOOKS.with_read(Vec::len)
}

#[inline(never)]
pub(crate) fn run_capture_hooks(error: &Error) {
    let hooks = HOOKS.with_read(|hooks| {
        if hooks.is_empty() {
            None
        } else {
            Some(hooks.clone())
        }
    });

    for hook in hooks.iter().flatten() {
        hook.on_capture(error);
    }
}
