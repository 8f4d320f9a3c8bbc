//! Refrigerant property provider trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::refrigerant::Refrigerant;
use ph_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};
use std::fmt;

/// The second intensive property that, together with pressure, fixes a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OtherProperty {
    /// Temperature. Single-phase states only.
    Temperature(Temperature),
    /// Vapor mass fraction in [0, 1]. Saturated states only.
    Quality(f64),
    /// Specific entropy [J/(kg·K)].
    Entropy(SpecEntropy),
    /// Specific enthalpy [J/kg].
    Enthalpy(SpecEnthalpy),
}

impl OtherProperty {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Temperature(_) => "T",
            Self::Quality(_) => "Q",
            Self::Entropy(_) => "S",
            Self::Enthalpy(_) => "H",
        }
    }

    /// Raw value in SI base units.
    pub fn value_si(&self) -> f64 {
        match self {
            Self::Temperature(t) => t.value,
            Self::Quality(q) => *q,
            Self::Entropy(s) => *s,
            Self::Enthalpy(h) => *h,
        }
    }
}

impl fmt::Display for OtherProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.3}", self.kind(), self.value_si())
    }
}

/// Resolved thermodynamic state returned by a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyPoint {
    /// Pressure [Pa]
    pub pressure: Pressure,
    /// Temperature [K]
    pub temperature: Temperature,
    /// Specific enthalpy [J/kg]
    pub enthalpy: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)]
    pub entropy: SpecEntropy,
    /// Vapor quality when the state is inside the dome, `None` when single-phase
    pub quality: Option<f64>,
}

/// Saturated liquid and vapor at one pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationPair {
    pub liquid: PropertyPoint,
    pub vapor: PropertyPoint,
}

impl SaturationPair {
    /// Latent heat of vaporization [J/kg].
    pub fn latent_heat(&self) -> SpecEnthalpy {
        self.vapor.enthalpy - self.liquid.enthalpy
    }
}

/// Trait for refrigerant property backends.
///
/// Implementations must be thread-safe (Send + Sync), validate their inputs and
/// reject states they cannot resolve instead of returning non-finite numbers.
pub trait PropertyProvider: Send + Sync {
    /// Get the provider name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this provider carries the given refrigerant.
    fn supports(&self, refrigerant: Refrigerant) -> bool;

    /// Critical pressure of the refrigerant.
    fn critical_pressure(&self, refrigerant: Refrigerant) -> FluidResult<Pressure>;

    /// Resolve the state at `pressure` and one other intensive property.
    fn lookup(
        &self,
        refrigerant: Refrigerant,
        pressure: Pressure,
        other: OtherProperty,
    ) -> FluidResult<PropertyPoint>;

    /// Saturated liquid (Q=0) and vapor (Q=1) at `pressure`.
    fn saturation(
        &self,
        refrigerant: Refrigerant,
        pressure: Pressure,
    ) -> FluidResult<SaturationPair> {
        Ok(SaturationPair {
            liquid: self.lookup(refrigerant, pressure, OtherProperty::Quality(0.0))?,
            vapor: self.lookup(refrigerant, pressure, OtherProperty::Quality(1.0))?,
        })
    }
}

/// Validation helpers for lookup inputs and outputs.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure quality lies in [0, 1].
    pub fn validate_quality(q: f64) -> FluidResult<()> {
        if !q.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "quality must be finite",
            });
        }
        if !(0.0..=1.0).contains(&q) {
            return Err(FluidError::OutOfRange {
                what: "quality must be within [0, 1]",
            });
        }
        Ok(())
    }

    /// Validate the non-pressure half of a lookup.
    pub fn validate_other(other: OtherProperty) -> FluidResult<()> {
        match other {
            OtherProperty::Temperature(t) => validate_temperature(t),
            OtherProperty::Quality(q) => validate_quality(q),
            OtherProperty::Entropy(s) => {
                ph_core::ensure_finite(s, "entropy")?;
                Ok(())
            }
            OtherProperty::Enthalpy(h) => {
                ph_core::ensure_finite(h, "enthalpy")?;
                Ok(())
            }
        }
    }

    /// Reject states a backend produced with non-finite fields.
    pub fn validate_point(point: &PropertyPoint) -> FluidResult<()> {
        validate_pressure(point.pressure)?;
        validate_temperature(point.temperature)?;
        ph_core::ensure_finite(point.enthalpy, "enthalpy")?;
        ph_core::ensure_finite(point.entropy, "entropy")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use ph_core::units::{k, pa};

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(pa(101325.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_quality_bounds() {
        assert!(validate_quality(0.0).is_ok());
        assert!(validate_quality(1.0).is_ok());
        assert!(matches!(
            validate_quality(1.2),
            Err(FluidError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_quality(f64::NAN),
            Err(FluidError::NonPhysical { .. })
        ));
    }

    #[test]
    fn validate_other_dispatches() {
        assert!(validate_other(OtherProperty::Temperature(k(250.0))).is_ok());
        assert!(validate_other(OtherProperty::Temperature(k(-1.0))).is_err());
        assert!(validate_other(OtherProperty::Entropy(f64::INFINITY)).is_err());
        assert!(validate_other(OtherProperty::Enthalpy(250_000.0)).is_ok());
    }

    #[test]
    fn other_property_display_names_kind() {
        let s = OtherProperty::Quality(0.5).to_string();
        assert!(s.starts_with("Q="));
    }
}
