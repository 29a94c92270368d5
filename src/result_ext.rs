//! Extension trait bridging `Result` into [`Try`].

use crate::{Error, Try};

/// Extension methods for `Result`s whose error converts into [`Error`].
pub trait ResultExt<T, E> {
    /// Converts `Ok` into a success and `Err` into a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::result_ext::ResultExt;
    ///
    /// let retries = "3".parse::<u8>().into_try().map(|n| n * 2);
    /// assert_eq!(retries.get().unwrap(), 6);
    /// ```
    #[track_caller]
    fn into_try(self) -> Try<T>;

    /// Returns the `Ok` value, or raises the error with [`Error::raise`].
    ///
    /// This is the `Result` counterpart of
    /// [`Try::get_or_raise`](crate::Try::get_or_raise).
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, Try, result_ext::ResultExt};
    ///
    /// let outcome = Try::of(|| {
    ///     let width: u32 = "12".parse::<u32>().or_raise();
    ///     let height: u32 = "tall".parse::<u32>().or_raise();
    ///     Ok::<_, Error>(width * height)
    /// });
    /// assert!(outcome.error().unwrap().is::<std::num::ParseIntError>());
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[track_caller]
    fn or_raise(self) -> T;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: Into<Error>,
{
    #[track_caller]
    fn into_try(self) -> Try<T> {
        Try::from(self)
    }

    #[cfg(feature = "std")]
    #[track_caller]
    fn or_raise(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                let error: Error = error.into();
                error.raise()
            }
        }
    }
}
