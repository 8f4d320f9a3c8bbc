//! CoolProp-based refrigerant property provider.

use crate::error::{FluidError, FluidResult};
use crate::provider::{OtherProperty, PropertyPoint, PropertyProvider, validation};
use crate::refrigerant::Refrigerant;
use ph_core::units::{Pressure, k, pa};
use rfluids::prelude::*;

/// CoolProp backend for refrigerant properties.
///
/// Thread-safe: rfluids Fluid instances are created per lookup and never shared.
pub struct CoolPropProvider {}

impl CoolPropProvider {
    /// Create a new CoolProp provider.
    pub fn new() -> Self {
        Self {}
    }

    /// Create a Fluid instance at the given pressure and second input.
    fn fluid_at(
        &self,
        refrigerant: Refrigerant,
        p_pa: f64,
        other: OtherProperty,
    ) -> FluidResult<Fluid> {
        let second = match other {
            OtherProperty::Temperature(t) => FluidInput::temperature(t.value),
            OtherProperty::Quality(q) => FluidInput::quality(q),
            OtherProperty::Entropy(s) => FluidInput::entropy(s),
            OtherProperty::Enthalpy(h) => FluidInput::enthalpy(h),
        };

        Fluid::from(refrigerant.rfluids_pure())
            .in_state(FluidInput::pressure(p_pa), second)
            .map_err(|e| {
                tracing::debug!(%refrigerant, p_pa, %other, error = %e, "CoolProp rejected state");
                FluidError::Backend {
                    message: format!("rfluids error at P={p_pa} Pa, {other}: {e}"),
                }
            })
    }
}

impl Default for CoolPropProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyProvider for CoolPropProvider {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, refrigerant: Refrigerant) -> bool {
        Refrigerant::ALL.contains(&refrigerant)
    }

    fn critical_pressure(&self, refrigerant: Refrigerant) -> FluidResult<Pressure> {
        let mut fluid = Fluid::from(refrigerant.rfluids_pure());
        let p_crit = fluid.critical_pressure().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting critical pressure: {e}"),
        })?;
        let p = pa(p_crit);
        validation::validate_pressure(p)?;
        Ok(p)
    }

    fn lookup(
        &self,
        refrigerant: Refrigerant,
        pressure: Pressure,
        other: OtherProperty,
    ) -> FluidResult<PropertyPoint> {
        if !self.supports(refrigerant) {
            return Err(FluidError::NotSupported {
                what: "refrigerant not available in CoolProp catalog",
            });
        }
        validation::validate_pressure(pressure)?;
        validation::validate_other(other)?;

        let p_pa = pressure.value;
        let mut fluid = self.fluid_at(refrigerant, p_pa, other)?;

        let t_k = fluid.temperature().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting temperature: {e}"),
        })?;
        let h = fluid.enthalpy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting enthalpy: {e}"),
        })?;
        let s = fluid.entropy().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting entropy: {e}"),
        })?;
        // CoolProp reports single-phase states with a sentinel outside [0, 1]
        let quality = match other {
            OtherProperty::Quality(q) => Some(q),
            _ => fluid.quality().ok().filter(|q| (0.0..=1.0).contains(q)),
        };

        let point = PropertyPoint {
            pressure,
            temperature: k(t_k),
            enthalpy: h,
            entropy: s,
            quality,
        };
        validation::validate_point(&point)?;
        Ok(point)
    }
}
