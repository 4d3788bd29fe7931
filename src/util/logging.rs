use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::LogSettings;

/// Installs a global stderr subscriber configured by `settings`.
///
/// `RUST_LOG` takes precedence over `settings.filter`. Returns `false` if a
/// global subscriber was already set.
pub fn init_logging(settings: &LogSettings) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let span_events = if settings.span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(span_events);

    let initialized = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()
        .is_ok();
    if initialized {
        tracing::debug!(filter = %settings.filter, "logging initialized");
    }
    initialized
}
