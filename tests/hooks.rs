#![cfg(feature = "std")]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use attempt::{
    Error, Try,
    hooks::{CaptureHook, capture_hook_count, clear_capture_hooks, register_capture_hook},
};

#[derive(Debug, thiserror::Error)]
#[error("watched")]
struct Watched;

#[derive(Debug, thiserror::Error)]
#[error("fragile")]
struct Fragile;

struct Counter(Arc<AtomicUsize>);

impl CaptureHook for Counter {
    fn on_capture(&self, error: &Error) {
        if error.is::<Watched>() {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// Kept as a single test: the hook registry is global to the test binary.
#[test]
fn capture_hooks_lifecycle() {
    let captured = Arc::new(AtomicUsize::new(0));
    let recaptured = Arc::new(AtomicUsize::new(0));

    register_capture_hook(Counter(captured.clone()));
    let recaptured_in_hook = recaptured.clone();
    register_capture_hook(move |error: &Error| {
        // Hooks may capture failures themselves without deadlocking.
        if error.is::<Watched>() {
            let nested = Try::<()>::of(|| Err(Error::msg("from hook")));
            assert!(nested.is_failure());
            recaptured_in_hook.fetch_add(1, Ordering::SeqCst);
        }
    });
    assert_eq!(capture_hook_count(), 2);

    let _ = Try::<()>::of(|| Err(Watched));
    let _ = Try::success(1).try_map(|_| Err::<u8, _>(Watched));
    let _ = Try::success(2).filter(|_| false);
    assert_eq!(captured.load(Ordering::SeqCst), 2);
    assert_eq!(recaptured.load(Ordering::SeqCst), 2);

    // Direct construction is not a capture.
    let _ = Try::<()>::failure(Watched);
    assert_eq!(captured.load(Ordering::SeqCst), 2);

    // A raised failure recovered by an enclosing boundary is reported again.
    let inner = Try::<u8>::of(|| Err(Watched));
    let reported = inner.error().unwrap().clone();
    let outer = Try::of(|| Ok::<_, Error>(inner.get_or_raise()));
    assert!(Error::ptr_eq(outer.error().unwrap(), &reported));
    assert_eq!(captured.load(Ordering::SeqCst), 4);
    assert_eq!(recaptured.load(Ordering::SeqCst), 4);

    // A panicking hook unwinds out of the capturing operation.
    register_capture_hook(|error: &Error| {
        if error.is::<Fragile>() {
            panic!("hook failed");
        }
    });
    let escaped = std::panic::catch_unwind(|| Try::<()>::of(|| Err(Fragile)));
    assert!(escaped.is_err());
    assert!(Try::<()>::of(|| Err(Watched)).is_failure());
    assert_eq!(captured.load(Ordering::SeqCst), 5);

    assert_eq!(clear_capture_hooks(), 3);
    assert_eq!(capture_hook_count(), 0);

    let _ = Try::<()>::of(|| Err(Watched));
    assert_eq!(captured.load(Ordering::SeqCst), 5);
}
