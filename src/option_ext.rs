//! Extension trait bridging `Option` into [`Try`] and [`Error`].
//!
//! ```
//! use attempt::{conditions::NoSuchElement, option_ext::OptionExt};
//!
//! let first = Vec::<u8>::new().first().copied().into_try();
//! assert!(first.error().unwrap().is::<NoSuchElement>());
//! ```
//!
//! An empty `Option` always becomes a [`NoSuchElement`] condition, recording
//! the type name of the value that was expected.

use crate::{Error, Try, conditions::NoSuchElement};

/// Extension methods for `Option`.
pub trait OptionExt<T> {
    /// Converts `Some` into a success and `None` into a failure holding a
    /// [`NoSuchElement`] condition. Same as [`Try::from_optional`].
    #[track_caller]
    fn into_try(self) -> Try<T>;

    /// Converts `None` into an [`Error`] holding a [`NoSuchElement`]
    /// condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, option_ext::OptionExt};
    ///
    /// fn first_word(line: &str) -> Result<&str, Error> {
    ///     line.split_whitespace().next().ok_or_error()
    /// }
    ///
    /// assert_eq!(first_word("hello world").unwrap(), "hello");
    /// assert!(first_word("   ").is_err());
    /// ```
    #[track_caller]
    fn ok_or_error(self) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    fn into_try(self) -> Try<T> {
        Try::from_optional(self)
    }

    #[track_caller]
    fn ok_or_error(self) -> Result<T, Error> {
        match self {
            Some(value) => Ok(value),
            None => Err(Error::new(NoSuchElement::new::<T>())),
        }
    }
}
