//! Diagram geometry errors.

use ph_fluids::FluidError;
use thiserror::Error;

pub type DiagramResult<T> = Result<T, DiagramError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// Coordinate outside the axis range (or not finite).
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Axis range or viewport that cannot be mapped.
    #[error("Invalid axis: {what}")]
    InvalidAxis { what: &'static str },

    /// Property lookup failed while sampling.
    #[error("Property error: {0}")]
    Property(#[from] FluidError),
}
