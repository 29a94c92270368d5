//! Adapters that let fallible closures stand in for infallible ones.
//!
//! Many APIs take a plain closure: iterator adapters, sort keys, callbacks
//! from other crates. A closure that can fail does not fit there, because it
//! has nowhere to put its error. The adapters in this module wrap a closure
//! returning `Result<R, E>` into one returning `R`, and raise the error with
//! [`Error::raise`] instead. Run the whole thing inside [`Try::of`] and the
//! raised error comes back out as the failure, unchanged:
//!
//! ```
//! use attempt::{Error, Try, raising::raising};
//!
//! fn parse_all(inputs: &[&str]) -> Try<Vec<u32>> {
//!     Try::of(|| {
//!         Ok::<_, Error>(inputs.iter().copied().map(raising(str::parse::<u32>)).collect())
//!     })
//! }
//!
//! assert_eq!(parse_all(&["1", "2"]).get().unwrap(), [1, 2]);
//! assert!(
//!     parse_all(&["1", "two"])
//!         .error()
//!         .unwrap()
//!         .is::<std::num::ParseIntError>()
//! );
//! ```
//!
//! Closures of several arguments take a tuple.
//!
//! Outside a capturing boundary a raised error unwinds like any other panic,
//! without running the panic hook (see [`Error::raise`]).
//!
//! Errors raised by [`raising`] and [`raising_supplier`] are attributed to the
//! location where the adapter was created. [`raising_once`] attributes them to
//! its own call site.
//!
//! [`Try::of`]: crate::Try::of

use core::panic::Location;

use crate::Error;

/// Wraps a fallible one-argument closure into an infallible one that raises
/// its errors.
///
/// # Examples
///
/// ```
/// use attempt::{Error, Try, raising::raising};
///
/// let lengths = Try::of(|| {
///     let mut total = 0;
///     ["a.txt", "b.txt"].into_iter().for_each(raising(|name: &str| {
///         total += name.len();
///         Ok::<_, Error>(())
///     }));
///     Ok::<_, Error>(total)
/// });
/// assert_eq!(lengths.get().unwrap(), 10);
/// ```
#[track_caller]
pub fn raising<A, R, E, F>(mut f: F) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> Result<R, E>,
    E: Into<Error>,
{
    let location = Location::caller();
    move |argument| match f(argument) {
        Ok(value) => value,
        Err(error) => raise_at(error, location),
    }
}

/// Wraps a fallible zero-argument closure into an infallible one that raises
/// its errors.
///
/// # Examples
///
/// ```
/// use std::iter;
///
/// use attempt::{Error, Try, raising::raising_supplier};
///
/// let mut remaining = 3;
/// let outcome = Try::of(|| {
///     let ticks: Vec<u32> = iter::repeat_with(raising_supplier(|| {
///         remaining -= 1;
///         if remaining == 0 {
///             Err(Error::msg("exhausted"))
///         } else {
///             Ok(remaining)
///         }
///     }))
///     .take(5)
///     .collect();
///     Ok::<_, Error>(ticks)
/// });
/// assert_eq!(outcome.error().unwrap().to_string(), "exhausted");
/// ```
#[track_caller]
pub fn raising_supplier<R, E, F>(mut f: F) -> impl FnMut() -> R
where
    F: FnMut() -> Result<R, E>,
    E: Into<Error>,
{
    let location = Location::caller();
    move || match f() {
        Ok(value) => value,
        Err(error) => raise_at(error, location),
    }
}

/// Calls a fallible closure once, returning its value or raising its error.
///
/// # Examples
///
/// ```
/// use attempt::{Error, Try, raising::raising_once};
///
/// let outcome = Try::of(|| {
///     let port: u16 = raising_once(|| "eighty".parse::<u16>());
///     Ok::<_, Error>(port)
/// });
/// assert!(outcome.is_failure());
/// ```
#[track_caller]
pub fn raising_once<R, E, F>(f: F) -> R
where
    F: FnOnce() -> Result<R, E>,
    E: Into<Error>,
{
    match f() {
        Ok(value) => value,
        Err(error) => raise_at(error, Location::caller()),
    }
}

fn raise_at<E: Into<Error>>(error: E, location: &'static Location<'static>) -> ! {
    Error::from_into_at(error, location).raise()
}
