use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Log to stderr so stdout carries only converted lines. Filter from `PY_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                EnvFilter::try_from_env("PY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .try_init();
    });
}
