//! Fault scenarios and the heuristic table that maps them onto parameters.
//!
//! The effects are teaching heuristics, not physics: each fault shifts the
//! operating point the way a technician would see it on the gauges. The table
//! is data, so a configuration file can retune it.

use crate::params::{CycleParameters, ParameterLimits, PressureEnvelope};
use ph_core::units::display::delta_fahrenheit;
use ph_core::units::{TempInterval, dk, pa};
use std::fmt;
use std::str::FromStr;

/// Exactly one fault is active at a time; selecting another replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fault {
    #[default]
    None,
    LowCharge,
    HighCharge,
    DirtyCondenser,
    DirtyEvaporator,
}

impl Fault {
    pub const ALL: [Fault; 5] = [
        Fault::None,
        Fault::LowCharge,
        Fault::HighCharge,
        Fault::DirtyCondenser,
        Fault::DirtyEvaporator,
    ];

    /// Stable snake_case identifier used in configuration and on the CLI.
    pub fn key(&self) -> &'static str {
        match self {
            Fault::None => "none",
            Fault::LowCharge => "low_charge",
            Fault::HighCharge => "high_charge",
            Fault::DirtyCondenser => "dirty_condenser",
            Fault::DirtyEvaporator => "dirty_evaporator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Fault::None => "None",
            Fault::LowCharge => "Low Refrigerant Charge",
            Fault::HighCharge => "High Refrigerant Charge",
            Fault::DirtyCondenser => "Dirty Condenser",
            Fault::DirtyEvaporator => "Dirty Evaporator",
        }
    }

    pub fn is_active(&self) -> bool {
        *self != Fault::None
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Fault {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Fault::ALL
            .into_iter()
            .find(|fault| fault.key() == normalized)
            .ok_or_else(|| format!("unknown fault '{s}'"))
    }
}

/// How one fault shifts the operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultEffect {
    /// Multiplier on evaporating pressure
    pub evaporating_factor: f64,
    /// Multiplier on condensing pressure
    pub condensing_factor: f64,
    /// Added to superheat (may be negative)
    pub superheat_delta: TempInterval,
    /// Added to subcooling (may be negative)
    pub subcooling_delta: TempInterval,
}

impl FaultEffect {
    /// No change at all.
    pub fn identity() -> Self {
        Self {
            evaporating_factor: 1.0,
            condensing_factor: 1.0,
            superheat_delta: dk(0.0),
            subcooling_delta: dk(0.0),
        }
    }
}

/// Heuristic effect per fault.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultTable {
    pub low_charge: FaultEffect,
    pub high_charge: FaultEffect,
    pub dirty_condenser: FaultEffect,
    pub dirty_evaporator: FaultEffect,
}

impl Default for FaultTable {
    /// Factors reproduce a 5 psia drop from 35 psia and a 10 psia rise from
    /// 160 psia, the classroom defaults.
    ///
    /// High charge floods the evaporator: it raises head pressure and cuts
    /// superheat. Subcooling is left alone, so `subcooling_delta` is zero.
    fn default() -> Self {
        let low_side = 30.0 / 35.0;
        let high_side = 170.0 / 160.0;
        Self {
            low_charge: FaultEffect {
                evaporating_factor: low_side,
                superheat_delta: delta_fahrenheit(10.0),
                ..FaultEffect::identity()
            },
            high_charge: FaultEffect {
                condensing_factor: high_side,
                superheat_delta: delta_fahrenheit(-10.0),
                ..FaultEffect::identity()
            },
            dirty_condenser: FaultEffect {
                condensing_factor: high_side,
                ..FaultEffect::identity()
            },
            dirty_evaporator: FaultEffect {
                evaporating_factor: low_side,
                superheat_delta: delta_fahrenheit(10.0),
                ..FaultEffect::identity()
            },
        }
    }
}

impl FaultTable {
    pub fn effect(&self, fault: Fault) -> FaultEffect {
        match fault {
            Fault::None => FaultEffect::identity(),
            Fault::LowCharge => self.low_charge,
            Fault::HighCharge => self.high_charge,
            Fault::DirtyCondenser => self.dirty_condenser,
            Fault::DirtyEvaporator => self.dirty_evaporator,
        }
    }
}

/// Effective parameters under `fault`.
///
/// `Fault::None` returns `base` unchanged. Otherwise the effect is applied and
/// the result is pulled back inside `envelope` with `p_evap < p_cond`, and the
/// temperature offsets are floored at the limits. `base` must already lie
/// inside `envelope` (see [`PressureEnvelope::contain`]); otherwise the clamp
/// can move a pressure against the fault.
pub fn adjust(
    base: &CycleParameters,
    fault: Fault,
    table: &FaultTable,
    limits: &ParameterLimits,
    envelope: &PressureEnvelope,
) -> CycleParameters {
    if !fault.is_active() {
        return *base;
    }
    let effect = table.effect(fault);

    let evaporating = pa(base.evaporating_pressure.value * effect.evaporating_factor);
    let condensing = pa(base.condensing_pressure.value * effect.condensing_factor);
    let (evaporating_pressure, condensing_pressure) = envelope.clamp_pair(evaporating, condensing);

    CycleParameters {
        evaporating_pressure,
        condensing_pressure,
        superheat: limits.clamp_superheat(base.superheat + effect.superheat_delta),
        subcooling: limits.clamp_subcooling(base.subcooling + effect.subcooling_delta),
        efficiency: base.efficiency,
    }
}
