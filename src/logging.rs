//! Logging setup for ClipForge.
//!
//! The crate logs through the `log` facade with bracketed subsystem tags
//! (`[SEGMENTS]`, `[KEYFRAMES]`, `[SESSION]`, `[EXPORT]`, `[CONFIG]`). Hosts that
//! bring their own logger can skip `init` entirely.

use std::sync::Once;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "clipforge_lib=info";

static INIT: Once = Once::new();

/// Install `env_logger` once, honouring `RUST_LOG`.
///
/// Safe to call repeatedly; a logger installed by the host wins.
pub fn init() {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);
        if env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .try_init()
            .is_ok()
        {
            log::info!("[LOGGING] ClipForge logging initialized");
        }
    });
}

/// Test-only logger that captures output through the test harness.
#[cfg(test)]
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        log::debug!("[LOGGING] still alive");
    }
}
