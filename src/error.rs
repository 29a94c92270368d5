use alloc::boxed::Box;
use core::{fmt, iter::FusedIterator, panic::Location};

use triomphe::{Arc, UniqueArc};

#[cfg(feature = "std")]
use crate::conditions::Panicked;

type DynError = dyn core::error::Error + Send + Sync + 'static;

struct ErrorData {
    error: Box<DynError>,
    location: &'static Location<'static>,
}

/// The universal error type carried by [`Try::Failure`](crate::Try::Failure).
///
/// An `Error` can hold any `core::error::Error + Send + Sync + 'static`. The
/// stored error is never wrapped or rewritten: downcasting gives back the
/// original value, and every clone of an `Error` refers to the same stored
/// error (see [`Error::ptr_eq`]).
///
/// Any compatible error converts into an `Error` with `?` or [`From`]:
///
/// ```
/// use attempt::Error;
///
/// fn parse(input: &str) -> Result<i64, Error> {
///     Ok(input.trim().parse::<i64>()?)
/// }
///
/// let error = parse("forty-two").unwrap_err();
/// assert!(error.is::<std::num::ParseIntError>());
/// ```
///
/// `Error` intentionally does not implement [`core::error::Error`] itself, so
/// that the blanket [`From`] conversion above is possible. Use
/// [`Error::as_dyn`] when you need a `&dyn Error`.
#[derive(Clone)]
pub struct Error {
    data: Arc<ErrorData>,
}

impl Error {
    /// Creates a new `Error` holding `error`.
    ///
    /// The location of the caller is recorded and can be retrieved with
    /// [`Error::location`].
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, conditions::NoSuchElement};
    ///
    /// let error = Error::new(NoSuchElement::new::<u32>());
    /// assert!(error.is::<NoSuchElement>());
    /// ```
    #[must_use]
    #[track_caller]
    pub fn new<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Creates a new `Error` from an already boxed error.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Error;
    ///
    /// let boxed: Box<dyn std::error::Error + Send + Sync> = "not a number".into();
    /// let error = Error::from_boxed(boxed);
    /// assert_eq!(error.to_string(), "not a number");
    /// ```
    #[must_use]
    #[track_caller]
    pub fn from_boxed(error: Box<DynError>) -> Self {
        Self::new_at(error, Location::caller())
    }

    /// Creates a new `Error` from a printable message.
    ///
    /// The [`error!`](crate::error!) macro is a formatting shorthand for this.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Error;
    ///
    /// let error = Error::msg("disk full");
    /// assert_eq!(format!("{error}"), "disk full");
    /// ```
    #[must_use]
    #[track_caller]
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::new(Message(message))
    }

    pub(crate) fn new_at(error: Box<DynError>, location: &'static Location<'static>) -> Self {
        Self {
            data: Arc::new(ErrorData { error, location }),
        }
    }

    /// Converts `error`, attributing a newly created handle to `location`.
    ///
    /// An `error` that already is an [`Error`] keeps its location and identity.
    pub(crate) fn from_into_at<E: Into<Error>>(
        error: E,
        location: &'static Location<'static>,
    ) -> Self {
        #[track_caller]
        fn convert<E: Into<Error>>(error: E) -> (Error, &'static Location<'static>) {
            (error.into(), Location::caller())
        }

        let (error, conversion_site) = convert(error);
        if error.location() != conversion_site {
            return error;
        }
        match Arc::try_unique(error.data) {
            Ok(mut unique) => {
                unique.location = location;
                Self {
                    data: unique.shareable(),
                }
            }
            Err(data) => Self { data },
        }
    }

    /// Returns the source location where this error was created.
    ///
    /// For errors converted with `?` this is the location of the `?`.
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.data.location
    }

    /// Returns the stored error as a trait object.
    #[must_use]
    pub fn as_dyn(&self) -> &(dyn core::error::Error + Send + Sync + 'static) {
        &*self.data.error
    }

    /// Returns `true` if the stored error is of type `E`.
    #[must_use]
    pub fn is<E>(&self) -> bool
    where
        E: core::error::Error + 'static,
    {
        self.data.error.is::<E>()
    }

    /// Returns a reference to the stored error if it is of type `E`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, conditions::MissingArgument};
    ///
    /// let error = Error::new(MissingArgument::new::<String>("name"));
    /// let missing = error.downcast_ref::<MissingArgument>().unwrap();
    /// assert_eq!(missing.argument(), "name");
    /// ```
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: core::error::Error + 'static,
    {
        self.data.error.downcast_ref::<E>()
    }

    /// Takes the stored error out if it is of type `E`.
    ///
    /// This only succeeds when `self` is the last handle to the stored error;
    /// while clones are alive the error is shared and `self` is returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, conditions::NoSuchElement};
    ///
    /// let error = Error::new(NoSuchElement::new::<u8>());
    /// let shared = error.clone();
    /// let error = error.downcast::<NoSuchElement>().unwrap_err();
    /// drop(shared);
    /// assert_eq!(
    ///     error.downcast::<NoSuchElement>().unwrap(),
    ///     NoSuchElement::new::<u8>()
    /// );
    /// ```
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: core::error::Error + 'static,
    {
        if !self.is::<E>() {
            return Err(self);
        }

        match Arc::try_unique(self.data) {
            Ok(unique) => {
                let ErrorData { error, location } = UniqueArc::into_inner(unique);
                match error.downcast::<E>() {
                    Ok(error) => Ok(*error),
                    Err(error) => Err(Self::new_at(error, location)),
                }
            }
            Err(data) => Err(Self { data }),
        }
    }

    /// Returns `true` if both handles refer to the same stored error.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Error;
    ///
    /// let error = Error::msg("boom");
    /// assert!(Error::ptr_eq(&error, &error.clone()));
    /// assert!(!Error::ptr_eq(&error, &Error::msg("boom")));
    /// ```
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.data, &other.data)
    }

    /// Iterates over the stored error followed by its chain of
    /// [`source`](core::error::Error::source)s.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self.as_dyn()),
        }
    }

    /// Returns the innermost source of the stored error, or the stored error
    /// itself when it has no source.
    #[must_use]
    pub fn root_cause(&self) -> &(dyn core::error::Error + 'static) {
        let mut current: &(dyn core::error::Error + 'static) = self.as_dyn();
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }

    /// Re-raises this error by unwinding.
    ///
    /// This is the transparent counterpart of capturing: a captured panic is
    /// resumed with its original payload (when this is the last handle to it),
    /// and any other error is raised with the `Error` itself as the panic
    /// payload. A [`Try::of`](crate::Try::of) further up the stack turns the
    /// unwind back into a failure, holding the very same `Error` handle in the
    /// second case.
    ///
    /// The unwind starts with [`resume_unwind`](std::panic::resume_unwind), so
    /// the panic hook does not run. A raise that nothing captures ends the
    /// thread without printing a panic message.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, Try};
    ///
    /// let original = Error::msg("connection reset");
    /// let raised = original.clone();
    /// let outcome = Try::<()>::of(move || -> Result<(), Error> { raised.raise() });
    /// assert!(Error::ptr_eq(outcome.error().unwrap(), &original));
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn raise(self) -> ! {
        match self.downcast::<Panicked>() {
            Ok(panicked) => std::panic::resume_unwind(panicked.into_payload()),
            Err(error) => std::panic::resume_unwind(Box::new(error)),
        }
    }
}

impl<E> From<E> for Error
where
    E: core::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl AsRef<DynError> for Error {
    fn as_ref(&self) -> &DynError {
        self.as_dyn()
    }
}

impl fmt::Display for Error {
    /// Displays the stored error. The alternate form (`{:#}`) also displays
    /// the chain of sources, separated by `": "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.error)?;
        if f.alternate() {
            for source in self.chain().skip(1) {
                write!(f, ": {source}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("error", &self.data.error)
            .field("location", &self.data.location)
            .finish()
    }
}

/// Iterator over an [`Error`] and its sources, created by [`Error::chain`].
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn core::error::Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn core::error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

impl fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

struct Message<M>(M);

impl<M: fmt::Display> fmt::Display for Message<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<M: fmt::Debug> fmt::Debug for Message<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<M: fmt::Display + fmt::Debug> core::error::Error for Message<M> {}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryError {
        #[source]
        source: TimeoutError,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("timed out after {0}ms")]
    struct TimeoutError(u32);

    #[test]
    fn test_error_send_sync() {
        static_assertions::assert_impl_all!(Error: Send, Sync, Unpin, Clone);
        static_assertions::assert_not_impl_any!(Error: Copy, core::error::Error);
    }

    #[test]
    fn test_clone_shares_stored_error() {
        let error = Error::msg("boom");
        let clone = error.clone();
        assert!(Error::ptr_eq(&error, &clone));
        assert!(!Error::ptr_eq(&error, &Error::msg("boom")));
    }

    #[test]
    fn test_downcast_ref_and_is() {
        let error = Error::new(TimeoutError(30));
        assert!(error.is::<TimeoutError>());
        assert!(!error.is::<QueryError>());
        assert_eq!(error.downcast_ref::<TimeoutError>().unwrap().0, 30);
        assert!(error.downcast_ref::<QueryError>().is_none());
    }

    #[test]
    fn test_downcast_requires_unique_handle() {
        let error = Error::new(TimeoutError(5));
        let shared = error.clone();

        let error = error.downcast::<TimeoutError>().unwrap_err();
        assert!(Error::ptr_eq(&error, &shared));

        drop(shared);
        let error = error.downcast::<QueryError>().unwrap_err();
        assert_eq!(error.downcast::<TimeoutError>().unwrap().0, 5);
    }

    #[test]
    fn test_chain_and_root_cause() {
        let error = Error::new(QueryError {
            source: TimeoutError(250),
        });

        let messages: alloc::vec::Vec<_> = error.chain().map(|e| e.to_string()).collect();
        assert_eq!(messages, ["query failed", "timed out after 250ms"]);
        assert_eq!(error.root_cause().to_string(), "timed out after 250ms");

        let leaf = Error::new(TimeoutError(1));
        assert_eq!(leaf.chain().count(), 1);
        assert_eq!(leaf.root_cause().to_string(), "timed out after 1ms");
    }

    #[test]
    fn test_display_alternate_includes_sources() {
        let error = Error::new(QueryError {
            source: TimeoutError(250),
        });
        assert_eq!(format!("{error}"), "query failed");
        assert_eq!(format!("{error:#}"), "query failed: timed out after 250ms");
    }

    #[test]
    fn test_location_points_at_caller() {
        let line = line!() + 1;
        let error = Error::msg("here");
        assert_eq!(error.location().line(), line);
        assert_eq!(error.location().file(), file!());

        let line = line!() + 1;
        let converted = Error::from(TimeoutError(2));
        assert_eq!(converted.location().line(), line);
    }

    #[test]
    fn test_from_into_at_relocates_only_new_handles() {
        let elsewhere = Location::caller();

        let converted = Error::from_into_at(TimeoutError(3), elsewhere);
        assert_eq!(converted.location(), elsewhere);
        assert!(converted.is::<TimeoutError>());

        let existing = Error::msg("kept");
        let kept = Error::from_into_at(existing.clone(), elsewhere);
        assert!(Error::ptr_eq(&kept, &existing));
        assert_ne!(kept.location(), elsewhere);
    }

    #[test]
    fn test_debug_mentions_error_and_location() {
        let debug = format!("{:?}", Error::msg("broken pipe"));
        assert!(debug.starts_with("Error { error: \"broken pipe\""));
        assert!(debug.contains("location"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_raise_uses_error_as_payload() {
        let error = Error::new(TimeoutError(9));
        let raised = error.clone();
        let payload = std::panic::catch_unwind(core::panic::AssertUnwindSafe(move || {
            raised.raise();
        }))
        .unwrap_err();
        let recovered = payload.downcast::<Error>().unwrap();
        assert!(Error::ptr_eq(&recovered, &error));
    }
}
