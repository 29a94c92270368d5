//! The capturing boundary shared by every `Try`-producing operation.

#[cfg(feature = "std")]
use alloc::boxed::Box;
#[cfg(feature = "std")]
use core::{any::Any, panic::Location};

#[cfg(feature = "std")]
use crate::conditions::Panicked;
use crate::{Error, Try, hooks};

/// Runs `f` and turns its outcome into a [`Try`].
///
/// An error returned by `f` is converted here, so its location is the
/// caller's. With `std`, panics raised by `f` are captured too: a payload
/// that is an [`Error`] (see [`Error::raise`]) is recovered as is, anything
/// else becomes a [`Panicked`] condition attributed to the caller's location.
#[cfg(feature = "std")]
#[track_caller]
pub(crate) fn capture<T, E, F>(f: F) -> Try<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Error>,
{
    let location = Location::caller();
    let outcome = match std::panic::catch_unwind(core::panic::AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.into()),
        Err(payload) => Err(from_panic_payload(payload, location)),
    };
    settle(outcome)
}

#[cfg(not(feature = "std"))]
#[track_caller]
pub(crate) fn capture<T, E, F>(f: F) -> Try<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Error>,
{
    let outcome = match f() {
        Ok(value) => Ok(value),
        Err(error) => Err(error.into()),
    };
    settle(outcome)
}

/// Finishes a capture: failures are reported to the capture hooks.
///
/// Hooks run outside the panic boundary, so a panicking hook unwinds out of
/// the capturing operation.
pub(crate) fn settle<T>(outcome: Result<T, Error>) -> Try<T> {
    match outcome {
        Ok(value) => Try::Success(value),
        Err(error) => {
            hooks::run_capture_hooks(&error);
            Try::Failure(error)
        }
    }
}

#[cfg(feature = "std")]
fn from_panic_payload(payload: Box<dyn Any + Send>, location: &'static Location<'static>) -> Error {
    match payload.downcast::<Error>() {
        Ok(error) => *error,
        Err(payload) => Error::new_at(Box::new(Panicked::new(payload)), location),
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn test_capture_ok_and_err() {
        assert_eq!(capture(|| Ok::<_, Error>(5)).get().unwrap(), 5);

        let error = Error::msg("refused");
        let expected = error.clone();
        let captured = capture::<(), _, _>(move || Err(error));
        assert!(Error::ptr_eq(captured.error().unwrap(), &expected));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("handshake failed")]
    struct HandshakeFailed;

    #[test]
    fn test_capture_converts_error_at_caller() {
        let line = line!() + 1;
        let captured = capture::<(), _, _>(|| Err(HandshakeFailed));
        let error = captured.error().unwrap();
        assert!(error.is::<HandshakeFailed>());
        assert_eq!(error.location().file(), file!());
        assert_eq!(error.location().line(), line);
    }

    #[test]
    fn test_capture_panic_with_string_payload() {
        let line = line!() + 1;
        let captured = capture::<u8, Error, _>(|| panic!("index {} out of range", 4));
        let error = captured.error().unwrap();
        assert_eq!(
            error.downcast_ref::<Panicked>().unwrap().message(),
            "index 4 out of range"
        );
        assert_eq!(error.location().line(), line);
    }

    #[test]
    fn test_capture_recovers_raised_error() {
        let error = Error::msg("raised");
        let raised = error.clone();
        let captured = capture::<String, Error, _>(move || raised.raise());
        assert!(Error::ptr_eq(captured.error().unwrap(), &error));
    }

    #[test]
    fn test_capture_integer_division_by_zero() {
        let divisor = core::hint::black_box(0_i32);
        let captured = capture(|| Ok::<_, Error>(10 / divisor));
        let error = captured.error().unwrap();
        assert!(
            error
                .downcast_ref::<Panicked>()
                .unwrap()
                .message()
                .contains("divide by zero")
        );
    }
}
