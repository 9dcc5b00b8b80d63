use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive (e.g. `frogmpeg=debug`)
pub const LOG_ENV_VAR: &str = "FROGMPEG_LOG";

/// Default level for a `-v` count: 0 = warn, 1 = info, 2+ = debug
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber. `FROGMPEG_LOG` overrides the verbosity flag.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}
