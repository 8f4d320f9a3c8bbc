//! Per-unit-mass performance figures.

use crate::error::{CycleError, ModelResult};
use ph_core::units::SpecEnthalpy;

/// Energy balances of one cycle [J/kg], plus COP.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Performance {
    /// h1 - h4
    pub refrigeration_effect: SpecEnthalpy,
    /// h2 - h1
    pub compressor_work: SpecEnthalpy,
    /// h2s - h1
    pub isentropic_work: SpecEnthalpy,
    /// h2 - h3
    pub heat_rejected: SpecEnthalpy,
    /// refrigeration effect / compressor work
    pub cop: f64,
}

impl Performance {
    /// Evaluate from the four enthalpies of the cycle.
    pub fn from_enthalpies(h1: f64, h2s: f64, h2: f64, h3: f64, h4: f64) -> ModelResult<Self> {
        let refrigeration_effect = h1 - h4;
        let compressor_work = h2 - h1;
        Ok(Self {
            refrigeration_effect,
            compressor_work,
            isentropic_work: h2s - h1,
            heat_rejected: h2 - h3,
            cop: coefficient_of_performance(refrigeration_effect, compressor_work)?,
        })
    }

    /// First-law residual: heat rejected minus (effect + work). Zero for a closed cycle.
    pub fn energy_residual(&self) -> f64 {
        self.heat_rejected - (self.refrigeration_effect + self.compressor_work)
    }
}

/// Coefficient of performance.
pub fn coefficient_of_performance(
    refrigeration_effect: f64,
    compressor_work: f64,
) -> ModelResult<f64> {
    if compressor_work.is_nan() || compressor_work <= 0.0 {
        return Err(CycleError::DivisionUndefined {
            what: "compressor work must be positive for COP",
        });
    }
    Ok(refrigeration_effect / compressor_work)
}

/// Actual compression enthalpy rise from the isentropic one.
pub fn actual_work(isentropic_work: f64, efficiency: f64) -> ModelResult<f64> {
    if efficiency.is_nan() || efficiency <= 0.0 {
        return Err(CycleError::DivisionUndefined {
            what: "isentropic efficiency must be positive",
        });
    }
    if isentropic_work.is_nan() || isentropic_work <= 0.0 {
        return Err(CycleError::DivisionUndefined {
            what: "isentropic enthalpy rise must be positive",
        });
    }
    Ok(isentropic_work / efficiency)
}
