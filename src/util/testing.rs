use std::env;
use std::sync::Once;
use tracing::info;

use crate::config::LogSettings;
use crate::util::logging::init_logging;

static TEST_SETUP: Once = Once::new();

/// Global trace-level subscriber for tests, installed once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        let settings = LogSettings {
            filter: "trace".into(),
            span_events: true,
        };
        if !init_logging(&settings) {
            eprintln!("Tracing subscriber already set");
        }
        info!("Test Setup complete");
    });
}
