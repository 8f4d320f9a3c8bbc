//! Named thermodynamic states of the cycle.

use ph_core::units::{Pressure, SpecEnthalpy, SpecEntropy, Temperature};
use ph_fluids::{PropertyPoint, SaturationPair};
use std::fmt;

/// Position of a state in the cycle, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatePointId {
    CompressorInlet,
    IsentropicDischarge,
    ActualDischarge,
    CondenserOutlet,
    EvaporatorInlet,
    /// Same state as the compressor inlet; closes the loop.
    EvaporatorOutlet,
}

impl StatePointId {
    pub const ALL: [StatePointId; 6] = [
        StatePointId::CompressorInlet,
        StatePointId::IsentropicDischarge,
        StatePointId::ActualDischarge,
        StatePointId::CondenserOutlet,
        StatePointId::EvaporatorInlet,
        StatePointId::EvaporatorOutlet,
    ];

    /// Position in [`StatePointId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            StatePointId::CompressorInlet => 0,
            StatePointId::IsentropicDischarge => 1,
            StatePointId::ActualDischarge => 2,
            StatePointId::CondenserOutlet => 3,
            StatePointId::EvaporatorInlet => 4,
            StatePointId::EvaporatorOutlet => 5,
        }
    }

    /// Diagram label.
    pub fn label(&self) -> &'static str {
        match self {
            StatePointId::CompressorInlet | StatePointId::EvaporatorOutlet => "1",
            StatePointId::IsentropicDischarge => "2s",
            StatePointId::ActualDischarge => "2",
            StatePointId::CondenserOutlet => "3",
            StatePointId::EvaporatorInlet => "4",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatePointId::CompressorInlet => "Compressor Inlet",
            StatePointId::IsentropicDischarge => "Isentropic Discharge",
            StatePointId::ActualDischarge => "Compressor Discharge",
            StatePointId::CondenserOutlet => "Condenser Outlet",
            StatePointId::EvaporatorInlet => "Evaporator Inlet",
            StatePointId::EvaporatorOutlet => "Evaporator Outlet",
        }
    }

    /// Whether the point is a reference construct rather than a real state.
    pub fn is_reference(&self) -> bool {
        matches!(self, StatePointId::IsentropicDischarge)
    }
}

impl fmt::Display for StatePointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase descriptor shown next to each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    SubcooledLiquid,
    SaturatedLiquid,
    TwoPhase,
    SaturatedVapor,
    SuperheatedVapor,
    NearSaturation,
}

impl Phase {
    /// Temperature tolerance around saturation [K]
    pub const TEMPERATURE_TOLERANCE: f64 = 0.1;
    /// Enthalpy tolerance around the saturated liquid/vapor enthalpies [J/kg]
    pub const ENTHALPY_TOLERANCE: f64 = 50.0;
    const QUALITY_TOLERANCE: f64 = 1e-4;

    pub fn label(&self) -> &'static str {
        match self {
            Phase::SubcooledLiquid => "Subcooled Liquid",
            Phase::SaturatedLiquid => "Saturated Liquid",
            Phase::TwoPhase => "Two-Phase Mixture",
            Phase::SaturatedVapor => "Saturated Vapor",
            Phase::SuperheatedVapor => "Superheated Vapor",
            Phase::NearSaturation => "Near Saturation",
        }
    }

    /// Classify `point` against the saturation states at its pressure.
    pub fn classify(point: &PropertyPoint, saturation: &SaturationPair) -> Phase {
        let t = point.temperature.value;
        let t_sat = saturation.vapor.temperature.value;
        let below = t < t_sat - Self::TEMPERATURE_TOLERANCE;
        let above = t > t_sat + Self::TEMPERATURE_TOLERANCE;

        if let Some(q) = point.quality {
            if q.abs() < Self::QUALITY_TOLERANCE {
                return if below {
                    Phase::SubcooledLiquid
                } else {
                    Phase::SaturatedLiquid
                };
            }
            if (q - 1.0).abs() < Self::QUALITY_TOLERANCE {
                return if above {
                    Phase::SuperheatedVapor
                } else {
                    Phase::SaturatedVapor
                };
            }
            if q > 0.0 && q < 1.0 {
                return Phase::TwoPhase;
            }
        }

        if below {
            return Phase::SubcooledLiquid;
        }
        if above {
            return Phase::SuperheatedVapor;
        }

        let h = point.enthalpy;
        let h_f = saturation.liquid.enthalpy;
        let h_g = saturation.vapor.enthalpy;
        if (h - h_f).abs() < Self::ENTHALPY_TOLERANCE {
            Phase::SaturatedLiquid
        } else if (h - h_g).abs() < Self::ENTHALPY_TOLERANCE {
            Phase::SaturatedVapor
        } else if h > h_f && h < h_g {
            Phase::TwoPhase
        } else {
            Phase::NearSaturation
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled state of the cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePoint {
    pub id: StatePointId,
    pub pressure: Pressure,
    pub enthalpy: SpecEnthalpy,
    pub temperature: Temperature,
    pub entropy: SpecEntropy,
    /// Vapor quality, present only inside the dome
    pub quality: Option<f64>,
    pub phase: Phase,
}

impl StatePoint {
    pub fn from_property(
        id: StatePointId,
        point: &PropertyPoint,
        saturation: &SaturationPair,
    ) -> Self {
        Self {
            id,
            pressure: point.pressure,
            enthalpy: point.enthalpy,
            temperature: point.temperature,
            entropy: point.entropy,
            quality: point.quality,
            phase: Phase::classify(point, saturation),
        }
    }

    /// Same thermodynamic state under another id.
    pub fn relabeled(&self, id: StatePointId) -> Self {
        Self { id, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::{k, pa};

    fn prop(t: f64, h: f64, quality: Option<f64>) -> PropertyPoint {
        PropertyPoint {
            pressure: pa(300_000.0),
            temperature: k(t),
            enthalpy: h,
            entropy: 1_500.0,
            quality,
        }
    }

    fn saturation() -> SaturationPair {
        SaturationPair {
            liquid: prop(274.0, 201_000.0, Some(0.0)),
            vapor: prop(274.0, 399_000.0, Some(1.0)),
        }
    }

    #[test]
    fn ids_are_ordered_and_labeled() {
        for (i, id) in StatePointId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert_eq!(StatePointId::EvaporatorOutlet.label(), "1");
        assert_eq!(StatePointId::IsentropicDischarge.to_string(), "2s");
        assert!(StatePointId::IsentropicDischarge.is_reference());
    }

    #[test]
    fn classify_single_phase_by_temperature() {
        let sat = saturation();
        assert_eq!(Phase::classify(&prop(260.0, 180_000.0, None), &sat), Phase::SubcooledLiquid);
        assert_eq!(Phase::classify(&prop(290.0, 410_000.0, None), &sat), Phase::SuperheatedVapor);
    }

    #[test]
    fn classify_inside_dome_by_quality() {
        let sat = saturation();
        assert_eq!(Phase::classify(&prop(274.0, 250_000.0, Some(0.25)), &sat), Phase::TwoPhase);
        assert_eq!(
            Phase::classify(&prop(274.0, 201_000.0, Some(0.0)), &sat),
            Phase::SaturatedLiquid
        );
        assert_eq!(
            Phase::classify(&prop(274.0, 399_000.0, Some(1.0)), &sat),
            Phase::SaturatedVapor
        );
    }

    #[test]
    fn classify_at_saturation_temperature_uses_enthalpy() {
        let sat = saturation();
        assert_eq!(Phase::classify(&prop(274.05, 399_020.0, None), &sat), Phase::SaturatedVapor);
        assert_eq!(Phase::classify(&prop(274.05, 399_500.0, None), &sat), Phase::NearSaturation);
    }

    #[test]
    fn relabel_keeps_state() {
        let sat = saturation();
        let inlet = prop(280.0, 404_000.0, None);
        let one = StatePoint::from_property(StatePointId::CompressorInlet, &inlet, &sat);
        let closed = one.relabeled(StatePointId::EvaporatorOutlet);
        assert_eq!(closed.enthalpy, one.enthalpy);
        assert_eq!(closed.id, StatePointId::EvaporatorOutlet);
    }
}
