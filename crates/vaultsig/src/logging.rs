use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `--debug` and `-v`.
pub fn init(debug: bool, verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug, verbosity)));

    // a subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_directive(debug: bool, verbosity: u8) -> &'static str {
    match (debug, verbosity) {
        (_, 3..) => "trace",
        (true, _) | (_, 2) => "debug",
        (false, 1) => "info",
        (false, _) => "warn",
    }
}
