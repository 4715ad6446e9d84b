use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. With `debug` set, `RUST_LOG` may
/// override the level; otherwise output is pinned to `info`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        tracing::debug!("logging already initialized: {err}");
    }
}
