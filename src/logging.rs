use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber when `RUST_LOG` is set.
pub fn init() {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
