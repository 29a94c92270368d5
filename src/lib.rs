#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A `Try` container for fallible computations.
//!
//! ## Overview
//!
//! [`Try<T>`] reifies the outcome of a computation that may fail: it is either
//! a [`Success`](Try::Success) holding the produced value or a
//! [`Failure`](Try::Failure) holding the [`Error`] the computation raised.
//! Unlike a bare `Result`, a `Try` is produced *at a capturing boundary*: the
//! closure handed to [`Try::of`] may return an error of any type, and with the
//! `std` feature it may even panic, and either way the outcome ends up as a
//! value you can compose.
//!
//! ```
//! use attempt::prelude::*;
//!
//! let port = Try::of(|| "8080".parse::<u16>())
//!     .filter(|port| *port >= 1024)
//!     .map(|port| port + 1)
//!     .or_else(3000);
//! assert_eq!(port, 8081);
//! ```
//!
//! ## Core Concepts
//!
//! - **[`Error`]** is the universal error domain. It can hold any
//!   `core::error::Error + Send + Sync + 'static`, it is cheap to clone, and
//!   extracting it from a failure hands back the very same handle that was
//!   captured. Nothing is wrapped on the way out.
//! - **Capture**: combinators that return a `Try` ([`Try::of`],
//!   [`Try::map`], [`Try::try_map`], [`Try::filter`], [`Try::flat_map`],
//!   [`Try::or_else_try`]) run caller code inside a capturing boundary and turn
//!   its failures into a `Failure`.
//! - **Propagation**: the side-effecting methods ([`Try::if_success`],
//!   [`Try::if_failure`], [`Try::if_success_or_else`]) and the lazy fallback of
//!   [`Try::or_else_get`] do not capture; whatever their closures return or
//!   raise goes straight back to the caller.
//! - **Raising**: [`Try::get`] hands the captured error back through `Result`.
//!   With the `std` feature, [`Try::get_or_raise`] and the
//!   [`raising`](crate::raising) adapters re-raise it by unwinding instead, and
//!   an enclosing [`Try::of`] recovers the identical [`Error`].
//!
//! ```
//! # #[cfg(feature = "std")] {
//! use attempt::{prelude::*, raising::raising};
//!
//! // A fallible parser used where an infallible closure is expected.
//! let parsed = Try::of(|| {
//!     let numbers: Vec<u8> = ["1", "2", "x"]
//!         .into_iter()
//!         .map(raising(str::parse::<u8>))
//!         .collect();
//!     Ok::<_, Error>(numbers)
//! });
//! assert!(parsed.error().unwrap().is::<std::num::ParseIntError>());
//! # }
//! ```
//!
//! ## Features
//!
//! - `std` (default): captures panics at every capturing boundary, enables
//!   [`Error::raise`], [`Try::get_or_raise`] and the [`raising`](crate::raising)
//!   module. Without it the crate is `no_std` + `alloc` and only `Err` results
//!   are captured.
//!
//! ## Observability
//!
//! The crate never logs on its own. Register a [capture hook](crate::hooks) to
//! be notified whenever a failure is captured; the `attempt-tracing` crate
//! ships one that emits `tracing` events.

extern crate alloc;

#[cfg(all(feature = "std", not(doc)))]
extern crate std;

#[macro_use]
mod macros;

pub mod conditions;
pub mod hooks;
pub mod iterator_ext;
pub mod option_ext;
pub mod prelude;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod raising;
pub mod result_ext;

mod capture;
mod error;
mod try_;

pub use self::{
    error::{Chain, Error},
    try_::Try,
};

/// A [`Result`](core::result::Result) type alias where the error defaults to
/// [`Error`].
///
/// # Examples
///
/// ```
/// fn parse(input: &str) -> attempt::Result<u32> {
///     Ok(input.parse()?)
/// }
///
/// assert_eq!(parse("7").unwrap(), 7);
/// assert!(parse("seven").is_err());
/// ```
pub type Result<T, E = Error> = core::result::Result<T, E>;

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use alloc::fmt;
    #[doc(hidden)]
    pub use core::{format_args, result::Result::Err, stringify};

    use crate::Error;

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    #[track_caller]
    pub fn format_error(args: fmt::Arguments<'_>) -> Error {
        if let Some(message) = args.as_str() {
            Error::msg(message)
        } else {
            Error::msg(fmt::format(args))
        }
    }
}
