use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Logs go to stderr so stdout stays free for command output.
pub fn init(default_filter: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // a second install (tests, embedding) is not an error worth surfacing
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
