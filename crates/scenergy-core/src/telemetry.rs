//! Logging bootstrap for embedding applications

use tracing::Level;

use crate::{Error, Result};

/// Initialize a tracing subscriber for logging
///
/// Configures the subscriber with:
/// - Environment filter (`RUST_LOG`), plus `default_level` as a directive
/// - Stderr output
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_tracing(default_level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::invalid_config(format!("Failed to initialize tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = init_tracing(Level::DEBUG);
        assert!(matches!(init_tracing(Level::DEBUG), Err(Error::InvalidConfig(_))));
    }
}
