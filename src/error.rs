use std::fmt;

/// Errors produced by the simulation core when inputs are invalid.
#[derive(Debug)]
pub enum SimError {
    /// A label set or confidence interval failed validation.
    InvalidConfiguration(String),

    /// A prediction was requested from a session that has no trained model.
    NotTrained,

    /// A buffer length did not match what the model expects.
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "features").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::NotTrained => write!(f, "no trained model in this session"),
            Self::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for SimError {}
