//! Error types for the coffee maker binary.
//!
//! [`CliError`] is the top-level error type that wraps all possible
//! failure modes during startup, providing a single type `main` can
//! propagate with `?`.

/// Top-level error for the coffee maker binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: drip_core::config::ConfigError,
    },

    /// Reading from stdin failed.
    #[error("input error: {source}")]
    Input {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
