use std::error::Error;
use std::fmt;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Fatal simulation errors. Physics state after a partial, failed update is
/// not well-defined, so none of these are recoverable mid-run: the driver
/// propagates them and aborts instead of stepping further.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Two distinct particles occupy the same position, making the pairwise
    /// force undefined (division by zero separation).
    DegenerateInput { i: usize, j: usize },

    /// A vector or sequence disagrees in length with the configured
    /// dimensionality or particle count.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Non-positive gravitational constant, timestep, or mass.
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DegenerateInput { i, j } => write!(
                f,
                "particles {} and {} are coincident: pairwise force is undefined",
                i, j
            ),
            SimError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch in {}: expected {}, found {}",
                what, expected, found
            ),
            SimError::InvalidParameter { name, value } => {
                write!(f, "parameter {} must be positive, got {}", name, value)
            }
        }
    }
}

impl Error for SimError {}
