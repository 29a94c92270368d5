/// Creates an [`Error`](crate::Error).
///
/// ## Using a format string
///
/// When invoked with a literal as the first argument, this macro interprets
/// its arguments the same way as [`format!()`] and the formatted message
/// becomes the error. Messages without arguments are not allocated.
///
/// [`format!()`]: alloc::format
///
/// ## Using an error value
///
/// Any other expression is converted with [`Error::from`](crate::Error), so
/// it must be a `core::error::Error + Send + Sync + 'static` (or already an
/// [`Error`](crate::Error)).
///
/// # Examples
///
/// ```
/// use attempt::error;
///
/// let error = error!("disk full");
/// assert_eq!(error.to_string(), "disk full");
///
/// let error = error!("{} bytes left on {}", 0, "/dev/sda1");
/// assert_eq!(error.to_string(), "0 bytes left on /dev/sda1");
///
/// let parse_error = "x".parse::<i32>().unwrap_err();
/// let error = error!(parse_error);
/// assert!(error.is::<std::num::ParseIntError>());
/// ```
#[macro_export]
macro_rules! error {
    ($msg:literal $(,)?) => {
        $crate::__private::format_error($crate::__private::format_args!($msg))
    };
    ($err:expr $(,)?) => {
        $crate::Error::from($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::__private::format_error($crate::__private::format_args!($fmt, $($arg)*))
    };
}

/// Return early with an error.
///
/// This is equivalent to writing `return Err(error!(...).into());`, so the
/// enclosing function may return any error type that an
/// [`Error`](crate::Error) converts into. Closures passed to
/// [`Try::of`](crate::Try::of) need their error type spelled out.
///
/// # Examples
///
/// ```
/// use attempt::{Error, Try, bail};
///
/// let outcome = Try::of(|| -> Result<u32, Error> {
///     let depth = 12;
///     if depth > 8 {
///         bail!("nesting too deep: {depth}");
///     }
///     Ok(depth)
/// });
/// assert_eq!(outcome.error().unwrap().to_string(), "nesting too deep: 12");
/// ```
#[macro_export]
macro_rules! bail {
    ($($args:tt)*) => {
        return $crate::__private::Err($crate::error!($($args)*).into())
    };
}

/// Return early with an error if a condition does not hold.
///
/// With only a condition, the message names the failed condition. Otherwise
/// the remaining arguments are passed to [`bail!`].
///
/// # Examples
///
/// ```
/// use attempt::{Error, ensure};
///
/// fn checked_port(port: u32) -> Result<u16, Error> {
///     ensure!(port != 0);
///     ensure!(port <= 65535, "port {port} out of range");
///     Ok(port as u16)
/// }
///
/// assert_eq!(checked_port(0).unwrap_err().to_string(), "condition failed: `port != 0`");
/// assert_eq!(checked_port(70000).unwrap_err().to_string(), "port 70000 out of range");
/// assert_eq!(checked_port(443).unwrap(), 443);
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            return $crate::__private::Err(
                $crate::__private::format_error($crate::__private::format_args!(
                    "condition failed: `{}`",
                    $crate::__private::stringify!($cond)
                ))
                .into(),
            );
        }
    };
    ($cond:expr, $($args:tt)+) => {
        if !$cond {
            $crate::bail!($($args)+);
        }
    };
}
