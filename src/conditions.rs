//! Conditions manufactured by this crate.
//!
//! Most failures a [`Try`](crate::Try) carries come from caller code and are
//! stored verbatim. The types in this module are the few conditions the crate
//! produces itself:
//!
//! - [`NoSuchElement`]: an empty `Option` was turned into a `Try`, or a
//!   [`filter`](crate::Try::filter) predicate rejected the value.
//! - [`MissingArgument`]: a value that must be present was `None`.
//! - [`Panicked`] (requires `std`): caller code panicked inside a capturing
//!   boundary.
//!
//! All of them are ordinary error types, so they are recognised with
//! [`Error::is`](crate::Error::is) or [`Error::downcast_ref`](crate::Error::downcast_ref):
//!
//! ```
//! use attempt::{Try, conditions::NoSuchElement};
//!
//! let outcome = Try::success(3).filter(|n| n % 2 == 0);
//! assert!(outcome.error().unwrap().is::<NoSuchElement>());
//! ```

#[cfg(feature = "std")]
use alloc::{boxed::Box, string::String};
use core::fmt;
#[cfg(feature = "std")]
use core::any::Any;

/// An element was expected but there was none.
///
/// Produced by [`Try::from_optional`](crate::Try::from_optional) for `None`
/// and by [`Try::filter`](crate::Try::filter) when the predicate rejects the
/// value. It records the type name of the missing element.
///
/// # Examples
///
/// ```
/// use attempt::conditions::NoSuchElement;
///
/// let condition = NoSuchElement::new::<String>();
/// assert!(condition.to_string().contains("String"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoSuchElement {
    type_name: &'static str,
}

impl NoSuchElement {
    /// Creates a new `NoSuchElement` for elements of type `T`.
    #[must_use]
    pub fn new<T: ?Sized>() -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
        }
    }

    /// The type name of the missing element.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for NoSuchElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no such element of type {}", self.type_name)
    }
}

impl core::error::Error for NoSuchElement {}

/// A value that is required to be present was absent.
///
/// Produced by [`Try::of_nullable`](crate::Try::of_nullable) and
/// [`Try::require`](crate::Try::require) when the value turns out to be
/// `None`.
///
/// # Examples
///
/// ```
/// use attempt::conditions::MissingArgument;
///
/// let condition = MissingArgument::new::<u16>("port");
/// assert_eq!(condition.argument(), "port");
/// assert_eq!(condition.to_string(), "missing argument `port` of type u16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingArgument {
    argument: &'static str,
    type_name: &'static str,
}

impl MissingArgument {
    /// Creates a new `MissingArgument` for the argument `argument` of type `T`.
    #[must_use]
    pub fn new<T: ?Sized>(argument: &'static str) -> Self {
        Self {
            argument,
            type_name: core::any::type_name::<T>(),
        }
    }

    /// The name of the missing argument.
    #[must_use]
    pub fn argument(&self) -> &'static str {
        self.argument
    }

    /// The type name of the missing argument.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for MissingArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing argument `{}` of type {}",
            self.argument, self.type_name
        )
    }
}

impl core::error::Error for MissingArgument {}

/// Caller code panicked inside a capturing boundary.
///
/// The panic message is extracted from `&str` and `String` payloads. The
/// original payload is kept so that [`Error::raise`](crate::Error::raise) can
/// resume the panic unchanged.
///
/// # Examples
///
/// ```
/// use attempt::{Try, conditions::Panicked};
///
/// let outcome = Try::<u32>::of(|| -> Result<u32, attempt::Error> { panic!("sensor offline") });
/// let panicked = outcome.error().unwrap().downcast_ref::<Panicked>().unwrap();
/// assert_eq!(panicked.message(), "sensor offline");
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub struct Panicked {
    message: String,
    payload: spin::Mutex<Box<dyn Any + Send>>,
}

#[cfg(feature = "std")]
impl Panicked {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            String::from(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            String::from("Box<dyn Any>")
        };

        Self {
            message,
            payload: spin::Mutex::new(payload),
        }
    }

    /// The panic message, or `"Box<dyn Any>"` when the payload was not a
    /// string.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the original panic payload is of type `P`.
    #[must_use]
    pub fn payload_is<P: Any>(&self) -> bool {
        let payload = self.payload.lock();
        let payload: &(dyn Any + Send) = &**payload;
        payload.is::<P>()
    }

    /// Returns the original panic payload.
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload.into_inner()
    }
}

#[cfg(feature = "std")]
impl fmt::Debug for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panicked")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

#[cfg(feature = "std")]
impl core::error::Error for Panicked {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_conditions_send_sync() {
        static_assertions::assert_impl_all!(NoSuchElement: Send, Sync, Copy);
        static_assertions::assert_impl_all!(MissingArgument: Send, Sync, Copy);
        #[cfg(feature = "std")]
        static_assertions::assert_impl_all!(Panicked: Send, Sync);
    }

    #[test]
    fn test_no_such_element_display() {
        let condition = NoSuchElement::new::<u64>();
        assert_eq!(condition.type_name(), "u64");
        assert_eq!(condition.to_string(), "no such element of type u64");
    }

    #[test]
    fn test_missing_argument_display() {
        let condition = MissingArgument::new::<str>("path");
        assert_eq!(condition.argument(), "path");
        assert_eq!(condition.type_name(), "str");
        assert_eq!(condition.to_string(), "missing argument `path` of type str");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_panicked_message_extraction() {
        let from_str = Panicked::new(Box::new("static message"));
        assert_eq!(from_str.message(), "static message");
        assert!(from_str.payload_is::<&'static str>());

        let from_string = Panicked::new(Box::new(String::from("owned message")));
        assert_eq!(from_string.message(), "owned message");
        assert_eq!(from_string.to_string(), "panicked: owned message");

        let opaque = Panicked::new(Box::new(17_u8));
        assert_eq!(opaque.message(), "Box<dyn Any>");
        assert_eq!(*opaque.into_payload().downcast::<u8>().unwrap(), 17);
    }
}
