use tracing_subscriber::EnvFilter;

/// JSON logs on stdout, filtered by `RUST_LOG` (default `info`).
///
/// CloudWatch stamps every line, so the formatter omits its own timestamp.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_current_span(false)
        .without_time()
        .try_init();
}
