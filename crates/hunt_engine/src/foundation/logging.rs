//! Logging bootstrap

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored so tests and the
/// driver binary can both call it.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Initialize logging for unit tests (captured by the test harness).
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
