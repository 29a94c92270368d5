//! Commonly used items for convenient importing.
//!
//! ```rust
//! use attempt::prelude::*;
//!
//! fn ratio(numerator: u32, denominator: u32) -> Try<u32> {
//!     Try::of(|| -> Result<u32, Error> {
//!         ensure!(denominator != 0, "empty denominator");
//!         Ok(numerator / denominator)
//!     })
//! }
//!
//! assert_eq!(ratio(10, 2).or_else(0), 5);
//! assert_eq!(ratio(10, 0).or_else(0), 0);
//! ```
//!
//! This includes [`Try`], [`Error`], the extension traits for `Option`,
//! `Result` and iterators of `Try`s, and the [`error!`], [`bail!`] and
//! [`ensure!`] macros. With the `std` feature it also includes the
//! [`raising`](crate::raising::raising) adapters.

#[cfg(feature = "std")]
pub use crate::raising::{raising, raising_once, raising_supplier};
pub use crate::{
    Error, Try, bail, ensure, error, iterator_ext::IteratorExt, option_ext::OptionExt,
    result_ext::ResultExt,
};
