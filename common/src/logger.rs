use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the process-wide tracing subscriber.
///
/// `LOG_LEVEL` in the environment wins over `log_level`. Calling this more than
/// once is harmless: the first subscriber stays installed, which is what a test
/// binary running several graded suites needs.
pub fn init_logger(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(log_level));

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logger_is_idempotent() {
        init_logger("gradescope=debug");
        init_logger("gradescope=info");
        tracing::info!("logger initialised twice without panicking");
    }
}
