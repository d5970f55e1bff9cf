use thiserror::Error;

/// Top-level error type for clankers-core.
#[derive(Debug, Error)]
pub enum ClankersError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IK error: {0}")]
    Ik(#[from] IkError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Planar arm needs at least 3 links, got {0}")]
    TooFewLinks(usize),

    #[error("Invalid length for link {index}: {value} (must be finite and > 0)")]
    InvalidLinkLength { index: usize, value: f64 },

    #[error("Joint limit count mismatch: expected {expected}, got {got}")]
    LimitCountMismatch { expected: usize, got: usize },

    #[error("Invalid limits for joint {index}: [{lower}, {upper}]")]
    InvalidLimits { index: usize, lower: f64, upper: f64 },

    #[error("Invalid tolerance: {0} (must be finite and > 0)")]
    InvalidTolerance(f64),
}

/// Errors raised while solving and marshaling IK results.
///
/// Copy + static messages for cheap propagation across the C boundary,
/// where every variant collapses to a `false` return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IkError {
    #[error("Required input is null: {0}")]
    NullInput(&'static str),

    #[error("No kinematic solution for the requested pose")]
    NoSolution,

    #[error("Free parameter count mismatch: expected {expected}, got {got}")]
    FreeParameterCount { expected: usize, got: usize },

    #[error("Solution joint count mismatch: expected {expected}, got {got}")]
    JointCountMismatch { expected: usize, got: usize },

    #[error("Free parameter index {index} out of range ({available} supplied)")]
    FreeIndexOutOfRange { index: usize, available: usize },

    #[error("Failed to allocate solution buffer of {elements} elements")]
    Allocation { elements: usize },

    #[error("Count {0} does not fit the C interface")]
    CountOverflow(usize),
}
