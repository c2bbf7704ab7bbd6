use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WK2OP_LOG";

/// Diagnostics go to stderr so stdout carries only migration output.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
