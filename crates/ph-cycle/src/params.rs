//! Cycle operating parameters and the limits that keep them valid.

use crate::error::{CycleError, ModelResult};
use ph_core::numeric::clamp;
use ph_core::units::display::{delta_fahrenheit, psia};
use ph_core::units::{Pressure, TempInterval, dk, pa};

/// Operating point of the simple vapor-compression cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleParameters {
    /// Evaporator (low side) absolute pressure
    pub evaporating_pressure: Pressure,
    /// Condenser (high side) absolute pressure
    pub condensing_pressure: Pressure,
    /// Compressor inlet temperature above evaporator saturation
    pub superheat: TempInterval,
    /// Condenser outlet temperature below condenser saturation
    pub subcooling: TempInterval,
    /// Compressor isentropic efficiency in (0, 1]
    pub efficiency: f64,
}

impl CycleParameters {
    /// Build a parameter set from gauge-style display units (psia, °F).
    pub fn imperial(
        evaporating_psia: f64,
        condensing_psia: f64,
        superheat_f: f64,
        subcooling_f: f64,
        efficiency: f64,
    ) -> Self {
        Self {
            evaporating_pressure: psia(evaporating_psia),
            condensing_pressure: psia(condensing_psia),
            superheat: delta_fahrenheit(superheat_f),
            subcooling: delta_fahrenheit(subcooling_f),
            efficiency,
        }
    }

    /// Check every cycle invariant against the refrigerant's critical pressure.
    pub fn validate(&self, critical_pressure: Pressure) -> ModelResult<()> {
        let p_e = self.evaporating_pressure.value;
        let p_c = self.condensing_pressure.value;
        let fields = [
            p_e,
            p_c,
            self.superheat.value,
            self.subcooling.value,
            self.efficiency,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(CycleError::ParameterInvalid {
                what: "parameters must be finite",
            });
        }
        if p_e <= 0.0 {
            return Err(CycleError::ParameterInvalid {
                what: "evaporating pressure must be positive",
            });
        }
        if p_e >= p_c {
            return Err(CycleError::ParameterInvalid {
                what: "evaporating pressure must be below condensing pressure",
            });
        }
        if p_c >= critical_pressure.value {
            return Err(CycleError::ParameterInvalid {
                what: "condensing pressure must be below critical pressure",
            });
        }
        if self.superheat.value < 0.0 {
            return Err(CycleError::ParameterInvalid {
                what: "superheat must be non-negative",
            });
        }
        if self.subcooling.value < 0.0 {
            return Err(CycleError::ParameterInvalid {
                what: "subcooling must be non-negative",
            });
        }
        if self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(CycleError::ParameterInvalid {
                what: "efficiency must be within (0, 1]",
            });
        }
        Ok(())
    }
}

impl Default for CycleParameters {
    /// Classroom starting point: 35/160 psia, 10 °F superheat, 5 °F subcooling.
    fn default() -> Self {
        Self::imperial(35.0, 160.0, 10.0, 5.0, 0.75)
    }
}

/// Bounds applied to user adjustments and fault-adjusted parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterLimits {
    pub min_pressure: Pressure,
    pub max_pressure: Pressure,
    /// Smallest allowed condensing minus evaporating pressure
    pub min_pressure_gap: Pressure,
    /// Condensing pressure never exceeds this fraction of critical pressure
    pub critical_margin: f64,
    pub min_superheat: TempInterval,
    pub min_subcooling: TempInterval,
    pub min_efficiency: f64,
    pub max_efficiency: f64,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            min_pressure: psia(10.0),
            max_pressure: psia(400.0),
            min_pressure_gap: psia(5.0),
            critical_margin: 0.98,
            min_superheat: delta_fahrenheit(0.1),
            min_subcooling: delta_fahrenheit(0.1),
            min_efficiency: 0.1,
            max_efficiency: 1.0,
        }
    }
}

impl ParameterLimits {
    /// Pressure window for a refrigerant with the given critical pressure.
    pub fn envelope(&self, critical_pressure: Pressure) -> PressureEnvelope {
        let ceiling = self
            .max_pressure
            .value
            .min(critical_pressure.value * self.critical_margin);
        PressureEnvelope {
            floor: self.min_pressure,
            ceiling: pa(ceiling),
            gap: self.min_pressure_gap,
        }
    }

    pub fn clamp_superheat(&self, superheat: TempInterval) -> TempInterval {
        dk(superheat.value.max(self.min_superheat.value))
    }

    pub fn clamp_subcooling(&self, subcooling: TempInterval) -> TempInterval {
        dk(subcooling.value.max(self.min_subcooling.value))
    }

    pub fn clamp_efficiency(&self, efficiency: f64) -> f64 {
        clamp(efficiency, self.min_efficiency, self.max_efficiency)
    }
}

/// Allowed pressures once the critical pressure is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureEnvelope {
    pub floor: Pressure,
    pub ceiling: Pressure,
    pub gap: Pressure,
}

impl PressureEnvelope {
    /// Evaporating pressure bounded below the current condensing pressure.
    pub fn clamp_evaporating(&self, evaporating: Pressure, condensing: Pressure) -> Pressure {
        let upper = condensing.value - self.gap.value;
        pa(clamp(evaporating.value, self.floor.value, upper))
    }

    /// Condensing pressure bounded above the current evaporating pressure.
    pub fn clamp_condensing(&self, condensing: Pressure, evaporating: Pressure) -> Pressure {
        let lower = evaporating.value + self.gap.value;
        pa(clamp(condensing.value, lower, self.ceiling.value))
    }

    /// Clamp both pressures together, condensing side first.
    pub fn clamp_pair(&self, evaporating: Pressure, condensing: Pressure) -> (Pressure, Pressure) {
        let lower = self.floor.value + self.gap.value;
        let condensing = pa(clamp(condensing.value, lower, self.ceiling.value));
        (self.clamp_evaporating(evaporating, condensing), condensing)
    }

    /// `params` with both pressures pulled inside the envelope.
    pub fn contain(&self, params: &CycleParameters) -> CycleParameters {
        let (evaporating_pressure, condensing_pressure) =
            self.clamp_pair(params.evaporating_pressure, params.condensing_pressure);
        CycleParameters {
            evaporating_pressure,
            condensing_pressure,
            ..*params
        }
    }
}
