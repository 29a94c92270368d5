#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Tracing events for failures captured by `attempt`.
//!
//! `attempt` never logs on its own. This crate provides [`TracingHook`], a
//! [capture hook](attempt::hooks) that emits a `tracing` event every time a
//! [`Try`] boundary captures a failure, and [`TraceExt`] to emit the same
//! event for a single value on demand.
//!
//! # Quick Start
//!
//! ```
//! use attempt::{Try, hooks::register_capture_hook};
//! use attempt_tracing::TracingHook;
//! use tracing_subscriber::{Registry, layer::SubscriberExt};
//!
//! let subscriber = Registry::default().with(tracing_subscriber::fmt::layer());
//! tracing::subscriber::set_global_default(subscriber).expect("failed to set subscriber");
//!
//! register_capture_hook(TracingHook::new());
//!
//! #[tracing::instrument]
//! fn load(port: &str) -> Try<u16> {
//!     Try::of(|| port.parse::<u16>())
//! }
//! let _ = load("eighty");
//! ```
//!
//! Every event has the target `attempt` and carries these fields:
//!
//! - `error`: the error's `Display` form
//! - `chain`: the error followed by its sources
//! - `location`: where the error was created
//! - `span`: the names of the active spans, outermost first, separated by
//!   `:` (empty outside of any span or without a `tracing_subscriber`
//!   registry)
//!
//! # Environment Variables
//!
//! - `ATTEMPT_TRACING` - Comma-separated options:
//!   - `trace`, `debug`, `info`, `warn` or `error` - The level of emitted
//!     events (default `debug`)
//!   - `off` - Do not emit events

use std::sync::OnceLock;

use attempt::{Error, Try, hooks::CaptureHook};
use tracing::{Level, Span};

/// Capture hook that emits a `tracing` event for each captured failure.
///
/// # Examples
///
/// ```
/// use attempt::hooks::register_capture_hook;
/// use attempt_tracing::TracingHook;
///
/// // Respects the ATTEMPT_TRACING environment variable
/// register_capture_hook(TracingHook::new());
///
/// // Fixed level, ignoring the environment
/// register_capture_hook(TracingHook::at(tracing::Level::WARN));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TracingHook {
    /// The level of emitted events, or `None` to emit nothing.
    pub level: Option<Level>,
}

#[derive(Debug)]
struct AttemptTracingEnvOptions {
    level: Option<Level>,
}

impl AttemptTracingEnvOptions {
    fn get() -> &'static Self {
        static ATTEMPT_TRACING_FLAGS: OnceLock<AttemptTracingEnvOptions> = OnceLock::new();

        ATTEMPT_TRACING_FLAGS.get_or_init(|| {
            let level = match std::env::var_os("ATTEMPT_TRACING") {
                Some(var) => parse_level_options(&var.to_string_lossy()),
                None => Some(DEFAULT_LEVEL),
            };
            AttemptTracingEnvOptions { level }
        })
    }
}

const DEFAULT_LEVEL: Level = Level::DEBUG;

fn parse_level_options(options: &str) -> Option<Level> {
    let mut level = DEFAULT_LEVEL;
    let mut off = false;

    for option in options.split(',').map(str::trim) {
        if option.eq_ignore_ascii_case("off") {
            off = true;
        } else if let Ok(parsed) = option.parse::<Level>() {
            level = parsed;
        }
    }

    if off { None } else { Some(level) }
}

impl TracingHook {
    /// Creates a new [`TracingHook`] configured from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `ATTEMPT_TRACING` - Comma-separated options:
    ///   - `trace`, `debug`, `info`, `warn` or `error` - The level of emitted
    ///     events (default `debug`)
    ///   - `off` - Do not emit events
    ///
    /// The variable is read once, the first time it is needed.
    pub fn new() -> Self {
        Self {
            level: AttemptTracingEnvOptions::get().level,
        }
    }

    /// Creates a [`TracingHook`] emitting events at `level`.
    pub const fn at(level: Level) -> Self {
        Self { level: Some(level) }
    }

    /// Emits the event for `error`, if this hook is enabled.
    pub fn emit(&self, error: &Error) {
        if let Some(level) = self.level {
            emit(level, error);
        }
    }
}

impl Default for TracingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureHook for TracingHook {
    fn on_capture(&self, error: &Error) {
        self.emit(error);
    }
}

fn emit(level: Level, error: &Error) {
    let chain = format!("{error:#}");
    let span = current_span_path().unwrap_or_default();

    macro_rules! emit_at {
        ($level:expr, $error:ident, $chain:ident, $span:ident) => {
            tracing::event!(
                target: "attempt",
                $level,
                error = %$error,
                chain = %$chain,
                location = %$error.location(),
                span = %$span,
                "failure captured"
            )
        };
    }

    if level == Level::ERROR {
        emit_at!(Level::ERROR, error, chain, span);
    } else if level == Level::WARN {
        emit_at!(Level::WARN, error, chain, span);
    } else if level == Level::INFO {
        emit_at!(Level::INFO, error, chain, span);
    } else if level == Level::DEBUG {
        emit_at!(Level::DEBUG, error, chain, span);
    } else {
        emit_at!(Level::TRACE, error, chain, span);
    }
}

fn current_span_path() -> Option<String> {
    use tracing_subscriber::registry::LookupSpan;

    Span::current()
        .with_subscriber(|(span_id, dispatch)| {
            let registry = dispatch.downcast_ref::<tracing_subscriber::Registry>()?;
            let span_ref = registry.span(span_id)?;
            let names: Vec<&str> = span_ref.scope().from_root().map(|s| s.name()).collect();
            Some(names.join(":"))
        })
        .flatten()
}

/// Extension trait for emitting the capture event for a single value.
///
/// The event is the one [`TracingHook`] emits, at the level configured by
/// the `ATTEMPT_TRACING` environment variable. Successes emit nothing.
///
/// # Examples
///
/// ```
/// use attempt::Try;
/// use attempt_tracing::TraceExt;
///
/// let timeout = Try::<u32>::failure(attempt::Error::msg("no timeout configured"))
///     .trace_failure()
///     .or_else(30);
/// assert_eq!(timeout, 30);
/// ```
pub trait TraceExt: Sized {
    /// Emits the capture event if `self` holds an error, then returns `self`.
    fn trace_failure(self) -> Self;
}

impl<T> TraceExt for Try<T> {
    fn trace_failure(self) -> Self {
        if let Some(error) = self.error() {
            TracingHook::new().emit(error);
        }
        self
    }
}

impl<T> TraceExt for Result<T, Error> {
    fn trace_failure(self) -> Self {
        if let Err(error) = &self {
            TracingHook::new().emit(error);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        fmt,
        sync::{Arc, Mutex},
    };

    use attempt::hooks::register_capture_hook;
    use tracing::{
        Event, Subscriber,
        field::{Field, Visit},
    };
    use tracing_subscriber::{
        Layer, Registry,
        layer::{Context, SubscriberExt},
    };

    use super::*;

    #[derive(Debug)]
    struct Recorded {
        level: Level,
        target: String,
        fields: HashMap<&'static str, String>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Recorded>>>);

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            struct Fields(HashMap<&'static str, String>);

            impl Visit for Fields {
                fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
                    self.0.insert(field.name(), format!("{value:?}"));
                }
            }

            let mut fields = Fields(HashMap::new());
            event.record(&mut fields);
            self.0.lock().unwrap().push(Recorded {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields: fields.0,
            });
        }
    }

    fn record(f: impl FnOnce()) -> Vec<Recorded> {
        let recorder = Recorder::default();
        let subscriber = Registry::default().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, f);
        std::mem::take(&mut *recorder.0.lock().unwrap())
    }

    #[derive(Debug, thiserror::Error)]
    #[error("config unreadable")]
    struct ConfigUnreadable(#[source] std::io::Error);

    #[derive(Debug, thiserror::Error)]
    #[error("only captured in the registration test")]
    struct RegisteredOnly;

    #[test]
    fn test_hook_emits_event() {
        let hook = TracingHook::at(Level::WARN);
        let events = record(|| hook.on_capture(&Error::msg("boom")));

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, Level::WARN);
        assert_eq!(event.target, "attempt");
        assert_eq!(event.fields["message"], "failure captured");
        assert_eq!(event.fields["error"], "boom");
        assert!(event.fields["location"].contains("lib.rs"));
        assert_eq!(event.fields["span"], "");
    }

    #[test]
    fn test_chain_includes_sources() {
        let error = Error::new(ConfigUnreadable(std::io::Error::other("permission denied")));
        let events = record(|| TracingHook::at(Level::ERROR).emit(&error));

        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(events[0].fields["error"], "config unreadable");
        assert_eq!(
            events[0].fields["chain"],
            "config unreadable: permission denied"
        );
    }

    #[test]
    fn test_disabled_hook_is_silent() {
        let hook = TracingHook { level: None };
        assert!(record(|| hook.on_capture(&Error::msg("quiet"))).is_empty());
    }

    #[test]
    fn test_span_path() {
        let events = record(|| {
            let _outer = tracing::info_span!("load_config").entered();
            tracing::debug_span!("parse").in_scope(|| {
                TracingHook::at(Level::INFO).emit(&Error::msg("bad toml"));
            });
        });
        assert_eq!(events[0].fields["span"], "load_config:parse");
    }

    #[test]
    fn test_trace_failure() {
        let events = record(|| {
            let _ = Try::success(1).trace_failure();
            let _ = Try::<i32>::failure(Error::msg("traced")).trace_failure();
            let _ = Ok::<_, Error>(2).trace_failure();
        });
        let expected = usize::from(TracingHook::new().level.is_some());
        assert_eq!(events.len(), expected);
    }

    #[test]
    fn test_registered_hook_sees_captures() {
        register_capture_hook(TracingHook::at(Level::ERROR));

        let events = record(|| {
            let _ = Try::<()>::of(|| Err(RegisteredOnly));
        });
        let matching = events
            .iter()
            .filter(|e| e.fields.get("error").is_some_and(|v| *v == RegisteredOnly.to_string()))
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn test_parse_level_options() {
        assert_eq!(parse_level_options(""), Some(Level::DEBUG));
        assert_eq!(parse_level_options("warn"), Some(Level::WARN));
        assert_eq!(parse_level_options("INFO"), Some(Level::INFO));
        assert_eq!(parse_level_options("trace, off"), None);
        assert_eq!(parse_level_options("off,error"), None);
        assert_eq!(parse_level_options("loud"), Some(Level::DEBUG));
    }
}
