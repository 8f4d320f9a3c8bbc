//! Cycle model errors.

use ph_core::units::{Pressure, display::to_psia};
use ph_fluids::{FluidError, OtherProperty};
use std::fmt;
use thiserror::Error;

/// Result type for cycle model operations.
pub type ModelResult<T> = Result<T, CycleError>;

/// Where a failed property lookup happened.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupContext {
    /// State point label ("1", "2s", ...) or a named auxiliary lookup.
    pub point: &'static str,
    pub pressure: Option<Pressure>,
    pub input: Option<OtherProperty>,
}

impl LookupContext {
    pub fn at(point: &'static str, pressure: Pressure, input: OtherProperty) -> Self {
        Self {
            point,
            pressure: Some(pressure),
            input: Some(input),
        }
    }

    /// Both saturation states at `pressure`.
    pub fn saturation(point: &'static str, pressure: Pressure) -> Self {
        Self {
            point,
            pressure: Some(pressure),
            input: None,
        }
    }

    pub fn named(point: &'static str) -> Self {
        Self {
            point,
            pressure: None,
            input: None,
        }
    }
}

impl fmt::Display for LookupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point {}", self.point)?;
        if let Some(p) = self.pressure {
            write!(f, " (P={:.1} psia", to_psia(p))?;
            if let Some(input) = self.input {
                write!(f, ", {input}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Errors produced while computing a cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    /// The property provider could not resolve a state.
    #[error("Property lookup failed at {context}: {source}")]
    PropertyLookup {
        context: LookupContext,
        source: FluidError,
    },

    /// The (effective) parameter set violates a cycle invariant.
    #[error("Invalid parameters: {what}")]
    ParameterInvalid { what: &'static str },

    /// A ratio with a non-positive denominator.
    #[error("Undefined division: {what}")]
    DivisionUndefined { what: &'static str },
}

impl CycleError {
    pub(crate) fn lookup(context: LookupContext) -> impl FnOnce(FluidError) -> CycleError {
        move |source| CycleError::PropertyLookup { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::pa;

    #[test]
    fn lookup_error_names_point_and_pressure() {
        let err = CycleError::PropertyLookup {
            context: LookupContext::at("2s", pa(1_103_161.0), OtherProperty::Entropy(1730.0)),
            source: FluidError::OutOfRange { what: "pressure" },
        };
        let msg = err.to_string();
        assert!(msg.contains("point 2s"), "{msg}");
        assert!(msg.contains("160.0 psia"), "{msg}");
        assert!(msg.contains("S="), "{msg}");
    }

    #[test]
    fn named_context_has_no_pressure() {
        let ctx = LookupContext::named("critical point");
        assert_eq!(ctx.to_string(), "point critical point");
    }
}
