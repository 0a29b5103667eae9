//! Helper to set the backtrace env var.

use std::sync::Once;

static INIT: Once = Once::new();

/// Sets the `RUST_BACKTRACE` environment variable to `1` if it is not already set.
///
/// Must be called at the start of `main`, before any other thread exists.
pub fn enable() {
    INIT.call_once(|| {
        if std::env::var_os("RUST_BACKTRACE").is_none() {
            // SAFETY: single threaded at startup, guarded by `INIT`.
            unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
        }
    });
}
