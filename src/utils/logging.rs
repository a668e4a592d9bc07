use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber for the binary.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for
/// this crate and warnings for everything else. Records emitted through the
/// `log` macros are picked up as well.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second initialization (tests, embedding) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,sp_listings=debug"
    } else {
        "warn"
    }
}
