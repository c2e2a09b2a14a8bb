//! Error types for simulation input and configuration

/// Errors surfaced by [`crate::sim::step`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Fewer action sets than registered players; the step was not applied
    #[error("malformed input: expected {expected} action sets, got {got}")]
    MalformedInput { expected: usize, got: usize },
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value outside its allowed range
    #[error("Invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
