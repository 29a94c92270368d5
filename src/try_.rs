use alloc::boxed::Box;
use core::{convert::Infallible, panic::Location};

use crate::{
    Error,
    capture::{capture, settle},
    conditions::{MissingArgument, NoSuchElement},
};

/// The outcome of a fallible computation: a value or the error it raised.
///
/// A `Try` is an immutable value. Every combinator consumes the receiver and
/// returns a new `Try`; nothing is mutated in place. Pattern matching on the
/// two variants is the most direct way to branch on the outcome:
///
/// ```
/// use attempt::Try;
///
/// match Try::of(|| "12".parse::<u8>()) {
///     Try::Success(value) => assert_eq!(value, 12),
///     Try::Failure(error) => panic!("unexpected failure: {error}"),
/// }
/// ```
///
/// # Capturing and propagating
///
/// Operations that *return a `Try`* run the supplied closure inside a
/// capturing boundary. An `Err` returned by the closure (and, with the `std`
/// feature, a panic) becomes a [`Failure`](Try::Failure):
/// [`of`](Try::of), [`of_nullable`](Try::of_nullable), [`map`](Try::map),
/// [`try_map`](Try::try_map), [`filter`](Try::filter),
/// [`try_filter`](Try::try_filter), [`flat_map`](Try::flat_map) and
/// [`or_else_try`](Try::or_else_try).
///
/// Operations that exist for their side effects or return a bare value do
/// not capture: [`if_success`](Try::if_success),
/// [`if_failure`](Try::if_failure),
/// [`if_success_or_else`](Try::if_success_or_else) hand the consumer's error
/// back to the caller, and [`or_else_get`](Try::or_else_get) lets its
/// supplier's panics unwind.
///
/// On a failure, combinators never invoke the supplied closure and return a
/// failure carrying the very same [`Error`].
#[must_use = "a `Try` may hold a captured failure, which should be handled"]
#[derive(Clone, Debug)]
pub enum Try<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation failed with an error.
    Failure(Error),
}

impl<T> Try<T> {
    /// Runs `callable` inside a capturing boundary.
    ///
    /// Returns a success holding the produced value, or a failure holding the
    /// error `callable` returned. With the `std` feature a panic inside
    /// `callable` is captured as well, as a
    /// [`Panicked`](crate::conditions::Panicked) condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// let parsed = Try::of(|| "42".parse::<i32>());
    /// assert_eq!(parsed.get().unwrap(), 42);
    ///
    /// let parsed = Try::of(|| "forty-two".parse::<i32>());
    /// assert!(parsed.is_failure());
    /// ```
    #[track_caller]
    pub fn of<F, E>(callable: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        capture(callable)
    }

    /// Runs `callable` inside a capturing boundary, treating a `None` result
    /// as a failure.
    ///
    /// This is for computations where "no value" means something went wrong.
    /// A `None` becomes a failure holding a
    /// [`MissingArgument`](crate::conditions::MissingArgument) condition for
    /// the argument `value`. If absence is a legitimate outcome, use
    /// [`Try::of`] and keep the `Option` in the success instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use attempt::{Error, Try, conditions::MissingArgument};
    ///
    /// let settings = HashMap::from([("retries", 3)]);
    ///
    /// let retries = Try::of_nullable(|| Ok::<_, Error>(settings.get("retries").copied()));
    /// assert_eq!(retries.get().unwrap(), 3);
    ///
    /// let timeout = Try::of_nullable(|| Ok::<_, Error>(settings.get("timeout").copied()));
    /// assert!(timeout.error().unwrap().is::<MissingArgument>());
    /// ```
    #[track_caller]
    pub fn of_nullable<F, E>(callable: F) -> Self
    where
        F: FnOnce() -> Result<Option<T>, E>,
        E: Into<Error>,
    {
        let location = Location::caller();
        match capture(callable) {
            Try::Success(Some(value)) => Self::Success(value),
            Try::Success(None) => settle(Err(missing_value::<T>(location))),
            Try::Failure(error) => Self::Failure(error),
        }
    }

    /// Converts an `Option` into a `Try`.
    ///
    /// `None` becomes a failure holding a
    /// [`NoSuchElement`](crate::conditions::NoSuchElement) condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Try, conditions::NoSuchElement};
    ///
    /// assert_eq!(Try::from_optional(Some('a')).get().unwrap(), 'a');
    ///
    /// let empty = Try::<char>::from_optional(None);
    /// assert!(empty.error().unwrap().is::<NoSuchElement>());
    /// ```
    #[track_caller]
    pub fn from_optional(optional: Option<T>) -> Self {
        match optional {
            Some(value) => Self::Success(value),
            None => Self::Failure(Error::new(NoSuchElement::new::<T>())),
        }
    }

    /// Creates a success from a value that must be present.
    ///
    /// `None` becomes a failure holding a
    /// [`MissingArgument`](crate::conditions::MissingArgument) condition naming
    /// `argument`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Try, conditions::MissingArgument};
    ///
    /// let home = Try::require(None::<String>, "home");
    /// let missing = home.error().unwrap().downcast_ref::<MissingArgument>().unwrap();
    /// assert_eq!(missing.argument(), "home");
    /// ```
    #[track_caller]
    pub fn require(value: Option<T>, argument: &'static str) -> Self {
        match value {
            Some(value) => Self::Success(value),
            None => Self::Failure(Error::new(MissingArgument::new::<T>(argument))),
        }
    }

    /// Creates a success holding `value`.
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failure holding `error`.
    ///
    /// Passing an existing [`Error`] keeps that exact handle. This is not a
    /// capture, so [capture hooks](crate::hooks) are not run.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, Try};
    ///
    /// let error = Error::msg("quota exceeded");
    /// let failure = Try::<u32>::failure(error.clone());
    /// assert!(Error::ptr_eq(&failure.get().unwrap_err(), &error));
    /// ```
    #[track_caller]
    pub fn failure(error: impl Into<Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Extracts the value, or returns the captured error.
    ///
    /// The returned error is the very handle that was captured; nothing is
    /// wrapped, so `?` propagates the original failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, Try};
    ///
    /// fn port(input: &str) -> Result<u16, Error> {
    ///     Try::of(|| input.parse::<u16>()).get()
    /// }
    ///
    /// assert_eq!(port("443").unwrap(), 443);
    /// assert!(port("https").unwrap_err().is::<std::num::ParseIntError>());
    /// ```
    pub fn get(self) -> Result<T, Error> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }

    /// Converts into a `Result`. Same as [`Try::get`].
    pub fn into_result(self) -> Result<T, Error> {
        self.get()
    }

    /// Extracts the value, or re-raises the captured error by unwinding.
    ///
    /// See [`Error::raise`] for how the error is raised. An enclosing
    /// [`Try::of`] recovers it.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, Try};
    ///
    /// let inner = Try::<u8>::failure(Error::msg("bad checksum"));
    /// let outer = Try::of(|| Ok::<_, Error>(inner.get_or_raise() + 1));
    /// assert_eq!(outer.error().unwrap().to_string(), "bad checksum");
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn get_or_raise(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => error.raise(),
        }
    }

    /// Returns `true` for a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns a reference to the value of a success.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns a reference to the error of a failure.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Borrows the value, cloning the error handle of a failure.
    pub fn as_ref(&self) -> Try<&T> {
        match self {
            Self::Success(value) => Try::Success(value),
            Self::Failure(error) => Try::Failure(error.clone()),
        }
    }

    /// Calls `consumer` with the value of a success.
    ///
    /// Does nothing for a failure. An error returned by `consumer` is handed
    /// back to the caller unchanged; it is not captured.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Error, Try};
    ///
    /// let mut seen = Vec::new();
    /// Try::success(7).if_success(|n| {
    ///     seen.push(*n);
    ///     Ok::<_, Error>(())
    /// })?;
    /// assert_eq!(seen, [7]);
    /// # Ok::<_, Error>(())
    /// ```
    pub fn if_success<F, E>(&self, consumer: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<(), E>,
    {
        match self {
            Self::Success(value) => consumer(value),
            Self::Failure(_) => Ok(()),
        }
    }

    /// Calls `consumer` with the error of a failure.
    ///
    /// Does nothing for a success. An error returned by `consumer` is handed
    /// back to the caller unchanged.
    pub fn if_failure<F, E>(&self, consumer: F) -> Result<(), E>
    where
        F: FnOnce(&Error) -> Result<(), E>,
    {
        match self {
            Self::Success(_) => Ok(()),
            Self::Failure(error) => consumer(error),
        }
    }

    /// Calls exactly one of the consumers, depending on the variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::{cell::RefCell, convert::Infallible};
    ///
    /// use attempt::Try;
    ///
    /// let log = RefCell::new(Vec::new());
    /// Try::of(|| "x".parse::<u8>())
    ///     .if_success_or_else(
    ///         |value| {
    ///             log.borrow_mut().push(format!("parsed {value}"));
    ///             Ok::<_, Infallible>(())
    ///         },
    ///         |error| {
    ///             log.borrow_mut().push(format!("failed: {error}"));
    ///             Ok(())
    ///         },
    ///     )
    ///     .unwrap();
    /// assert_eq!(log.into_inner(), ["failed: invalid digit found in string"]);
    /// ```
    pub fn if_success_or_else<F, G, E>(&self, on_success: F, on_failure: G) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<(), E>,
        G: FnOnce(&Error) -> Result<(), E>,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Keeps a success only if `predicate` accepts its value.
    ///
    /// A rejected value becomes a failure holding a
    /// [`NoSuchElement`](crate::conditions::NoSuchElement) condition. A
    /// failure is returned unchanged and `predicate` is not called.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Try, conditions::NoSuchElement};
    ///
    /// assert!(Try::success(8).filter(|n| n % 2 == 0).is_success());
    ///
    /// let odd = Try::success(7).filter(|n| n % 2 == 0);
    /// assert!(odd.error().unwrap().is::<NoSuchElement>());
    /// ```
    #[track_caller]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.try_filter(|value| Ok::<_, Infallible>(predicate(value)))
    }

    /// Like [`Try::filter`], with a predicate that may fail.
    ///
    /// An error returned by `predicate` is captured into the returned failure.
    #[track_caller]
    pub fn try_filter<P, E>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> Result<bool, E>,
        E: Into<Error>,
    {
        let location = Location::caller();
        match self {
            Self::Success(value) => match capture(|| predicate(&value)) {
                Try::Success(true) => Self::Success(value),
                Try::Success(false) => settle(Err(Error::new_at(
                    Box::new(NoSuchElement::new::<T>()),
                    location,
                ))),
                Try::Failure(error) => Self::Failure(error),
            },
            Self::Failure(error) => Self::Failure(error),
        }
    }

    /// Transforms the value of a success.
    ///
    /// With the `std` feature, a panic inside `mapper` is captured into the
    /// returned failure. A failure is passed through and `mapper` is not
    /// called.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// let doubled = Try::of(|| "21".parse::<u32>()).map(|n| n * 2);
    /// assert_eq!(doubled.get().unwrap(), 42);
    /// ```
    #[track_caller]
    pub fn map<U, F>(self, mapper: F) -> Try<U>
    where
        F: FnOnce(T) -> U,
    {
        self.try_map(|value| Ok::<_, Infallible>(mapper(value)))
    }

    /// Transforms the value of a success with a mapper that may fail.
    ///
    /// This is `Try::of(|| mapper(value))`: an error returned by `mapper` is
    /// captured into the returned failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// let port = Try::success("8443").try_map(str::parse::<u16>);
    /// assert_eq!(port.get().unwrap(), 8443);
    ///
    /// let port = Try::success("http").try_map(str::parse::<u16>);
    /// assert!(port.is_failure());
    /// ```
    #[track_caller]
    pub fn try_map<U, F, E>(self, mapper: F) -> Try<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Into<Error>,
    {
        match self {
            Self::Success(value) => Try::of(move || mapper(value)),
            Self::Failure(error) => Try::Failure(error),
        }
    }

    /// Transforms the value of a success into another `Try`.
    ///
    /// The `Try` returned by `mapper` is returned as is. With the `std`
    /// feature, a panic inside `mapper` is captured into a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// fn reciprocal(n: f64) -> Try<f64> {
    ///     Try::success(n).filter(|n| *n != 0.0).map(|n| 1.0 / n)
    /// }
    ///
    /// assert_eq!(Try::success(4.0).flat_map(reciprocal).get().unwrap(), 0.25);
    /// assert!(Try::success(0.0).flat_map(reciprocal).is_failure());
    /// ```
    #[track_caller]
    pub fn flat_map<U, F>(self, mapper: F) -> Try<U>
    where
        F: FnOnce(T) -> Try<U>,
    {
        match self {
            Self::Success(value) => capture(move || Ok::<_, Infallible>(mapper(value))).flatten(),
            Self::Failure(error) => Try::Failure(error),
        }
    }

    /// Converts into an `Option`, discarding the error of a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// assert_eq!(Try::success(1).to_option(), Some(1));
    /// assert_eq!(Try::of(|| "?".parse::<i8>()).to_option(), None);
    /// ```
    pub fn to_option(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the value of a success, or `other` for a failure.
    ///
    /// Never fails: the error of a failure is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// assert_eq!(Try::of(|| "5".parse::<i32>()).or_else(-1), 5);
    /// assert_eq!(Try::of(|| "five".parse::<i32>()).or_else(-1), -1);
    /// ```
    pub fn or_else(self, other: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => other,
        }
    }

    /// Returns the value of a success, or the result of `other` for a failure.
    ///
    /// `other` is only called for a failure. It is not run inside a capturing
    /// boundary: a panic inside `other` unwinds to the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// let name = Try::of(|| std::env::var("ATTEMPT_DOC_UNSET_VARIABLE"))
    ///     .or_else_get(|| String::from("anonymous"));
    /// assert_eq!(name, "anonymous");
    /// ```
    pub fn or_else_get<F>(self, other: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => other(),
        }
    }

    /// Returns a success unchanged, or runs `fallback` inside a capturing
    /// boundary for a failure.
    ///
    /// Chains of fallbacks are evaluated left to right and stop at the first
    /// success: in `Try::of(a).or_else_try(b).or_else_try(c)`, `b` only runs
    /// if `a` failed and `c` only runs if both failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// let port = Try::of(|| "".parse::<u16>())
    ///     .or_else_try(|| "eighty".parse::<u16>())
    ///     .or_else_try(|| "80".parse::<u16>())
    ///     .or_else_try(|| -> Result<u16, attempt::Error> { unreachable!() });
    /// assert_eq!(port.get().unwrap(), 80);
    /// ```
    #[track_caller]
    pub fn or_else_try<F, E>(self, fallback: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        match self {
            Self::Success(value) => Self::Success(value),
            Self::Failure(_) => Self::of(fallback),
        }
    }
}

impl<T> Try<Try<T>> {
    /// Removes one level of nesting.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::Try;
    ///
    /// let nested = Try::success(Try::success(3));
    /// assert_eq!(nested.flatten().get().unwrap(), 3);
    /// ```
    pub fn flatten(self) -> Try<T> {
        match self {
            Self::Success(inner) => inner,
            Self::Failure(error) => Try::Failure(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Try<T>
where
    E: Into<Error>,
{
    #[track_caller]
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error.into()),
        }
    }
}

impl<T> From<Try<T>> for Result<T, Error> {
    fn from(outcome: Try<T>) -> Self {
        outcome.get()
    }
}

/// Collects the values of an iterator of `Try`s.
///
/// Stops at the first failure and returns it; later items are not consumed.
///
/// ```
/// use attempt::Try;
///
/// let all: Try<Vec<u8>> = ["1", "2", "3"]
///     .iter()
///     .map(|s| Try::of(|| s.parse::<u8>()))
///     .collect();
/// assert_eq!(all.get().unwrap(), [1, 2, 3]);
///
/// let some: Try<Vec<u8>> = ["1", "x", "3"]
///     .iter()
///     .map(|s| Try::of(|| s.parse::<u8>()))
///     .collect();
/// assert!(some.is_failure());
/// ```
impl<T, C> FromIterator<Try<T>> for Try<C>
where
    C: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Try<T>>>(iter: I) -> Self {
        let mut failure = None;
        let collected = iter
            .into_iter()
            .map_while(|item| match item {
                Try::Success(value) => Some(value),
                Try::Failure(error) => {
                    failure = Some(error);
                    None
                }
            })
            .collect();

        match failure {
            Some(error) => Try::Failure(error),
            None => Try::Success(collected),
        }
    }
}

fn missing_value<T>(location: &'static Location<'static>) -> Error {
    Error::new_at(Box::new(MissingArgument::new::<T>("value")), location)
}
