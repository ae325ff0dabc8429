use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `TRACKCULL_LOG` controls the
/// filter; defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_env("TRACKCULL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
