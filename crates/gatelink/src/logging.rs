//! Logging initialization for the CLI.
//!
//! Logs go to stderr so command output on stdout stays pipeable.
//! `RUST_LOG` overrides the verbosity chosen by `--verbose`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "gatelink=debug,gatelink_gateway=debug,gatelink_auth=debug"
    } else {
        "gatelink=info,gatelink_gateway=warn,gatelink_auth=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
