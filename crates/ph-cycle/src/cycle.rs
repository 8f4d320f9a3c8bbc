//! Cycle state computation.

use crate::error::{CycleError, LookupContext, ModelResult};
use crate::fault::{self, Fault, FaultTable};
use crate::params::{CycleParameters, ParameterLimits};
use crate::performance::{Performance, actual_work};
use crate::state_point::{StatePoint, StatePointId};
use ph_core::units::{Pressure, Temperature, k};
use ph_fluids::{OtherProperty, PropertyPoint, PropertyProvider, Refrigerant, SaturationPair};
use tracing::debug;

/// Smallest superheat/subcooling offset used for a single-phase lookup [K].
///
/// A zero offset would put points 1 and 3 exactly on the saturation line,
/// where a (P, T) pair does not fix the state.
pub const MIN_LOOKUP_OFFSET_K: f64 = 0.01;

/// Thermodynamic process between two state points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Process {
    /// 1 → 2s, drawn as a dashed reference line
    IdealCompression,
    Compression,
    Condensation,
    Expansion,
    Evaporation,
}

impl Process {
    pub fn label(&self) -> &'static str {
        match self {
            Process::IdealCompression => "Ideal Compression",
            Process::Compression => "Compressor",
            Process::Condensation => "Condenser",
            Process::Expansion => "Expansion Valve",
            Process::Evaporation => "Evaporator",
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Process::IdealCompression)
    }
}

/// A directed segment of the cycle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSegment {
    pub process: Process,
    pub from: StatePointId,
    pub to: StatePointId,
}

/// The five segments of the diagram, reference line first.
pub const PROCESS_SEGMENTS: [ProcessSegment; 5] = [
    ProcessSegment {
        process: Process::IdealCompression,
        from: StatePointId::CompressorInlet,
        to: StatePointId::IsentropicDischarge,
    },
    ProcessSegment {
        process: Process::Compression,
        from: StatePointId::CompressorInlet,
        to: StatePointId::ActualDischarge,
    },
    ProcessSegment {
        process: Process::Condensation,
        from: StatePointId::ActualDischarge,
        to: StatePointId::CondenserOutlet,
    },
    ProcessSegment {
        process: Process::Expansion,
        from: StatePointId::CondenserOutlet,
        to: StatePointId::EvaporatorInlet,
    },
    ProcessSegment {
        process: Process::Evaporation,
        from: StatePointId::EvaporatorInlet,
        to: StatePointId::EvaporatorOutlet,
    },
];

/// Snapshot of one computed cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub refrigerant: Refrigerant,
    pub fault: Fault,
    /// Parameters after the fault adjustment
    pub parameters: CycleParameters,
    pub critical_pressure: Pressure,
    /// Saturation temperature at the evaporating pressure (dew point)
    pub evaporating_temperature: Temperature,
    /// Saturation temperature at the condensing pressure (bubble point)
    pub condensing_temperature: Temperature,
    pub performance: Performance,
    points: [StatePoint; 6],
}

impl CycleResult {
    /// All six points in [`StatePointId::ALL`] order.
    pub fn points(&self) -> &[StatePoint] {
        &self.points
    }

    pub fn point(&self, id: StatePointId) -> &StatePoint {
        &self.points[id.index()]
    }

    /// Segments with their endpoint states, in drawing order.
    pub fn segments(
        &self,
    ) -> impl Iterator<Item = (ProcessSegment, &StatePoint, &StatePoint)> + '_ {
        PROCESS_SEGMENTS
            .iter()
            .map(move |seg| (*seg, self.point(seg.from), self.point(seg.to)))
    }

    /// Min and max enthalpy over all points [J/kg].
    pub fn enthalpy_span(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.enthalpy), hi.max(p.enthalpy))
            })
    }
}

/// Compute the cycle for `base` parameters under `fault`.
///
/// `base` is validated, then its pressures are pulled inside the envelope
/// before the fault is applied, so a fault only ever moves a pressure in its
/// own direction. Pure: the same inputs always give the same result.
pub fn compute_cycle(
    provider: &dyn PropertyProvider,
    refrigerant: Refrigerant,
    base: &CycleParameters,
    fault: Fault,
    faults: &FaultTable,
    limits: &ParameterLimits,
) -> ModelResult<CycleResult> {
    let critical_pressure = provider
        .critical_pressure(refrigerant)
        .map_err(CycleError::lookup(LookupContext::named("critical point")))?;
    base.validate(critical_pressure)?;
    let envelope = limits.envelope(critical_pressure);
    let baseline = envelope.contain(base);
    let effective = fault::adjust(&baseline, fault, faults, limits, &envelope);
    effective.validate(critical_pressure)?;

    let solver = StateSolver {
        provider,
        refrigerant,
    };
    let result = solver.solve(&effective, fault, critical_pressure)?;
    debug!(
        provider = provider.name(),
        %fault,
        cop = result.performance.cop,
        "cycle computed"
    );
    Ok(result)
}

struct StateSolver<'a> {
    provider: &'a dyn PropertyProvider,
    refrigerant: Refrigerant,
}

impl StateSolver<'_> {
    fn lookup(
        &self,
        point: &'static str,
        pressure: Pressure,
        other: OtherProperty,
    ) -> ModelResult<PropertyPoint> {
        self.provider
            .lookup(self.refrigerant, pressure, other)
            .map_err(CycleError::lookup(LookupContext::at(point, pressure, other)))
    }

    fn saturation(&self, point: &'static str, pressure: Pressure) -> ModelResult<SaturationPair> {
        self.provider
            .saturation(self.refrigerant, pressure)
            .map_err(CycleError::lookup(LookupContext::saturation(point, pressure)))
    }

    fn solve(
        &self,
        params: &CycleParameters,
        fault: Fault,
        critical_pressure: Pressure,
    ) -> ModelResult<CycleResult> {
        let p_evap = params.evaporating_pressure;
        let p_cond = params.condensing_pressure;
        let sat_evap = self.saturation("evaporator saturation", p_evap)?;
        let sat_cond = self.saturation("condenser saturation", p_cond)?;
        let t_evap = sat_evap.vapor.temperature;
        let t_cond = sat_cond.liquid.temperature;

        // 1: superheated vapor leaving the evaporator
        let superheat = params.superheat.value.max(MIN_LOOKUP_OFFSET_K);
        let one = self.lookup(
            "1",
            p_evap,
            OtherProperty::Temperature(k(t_evap.value + superheat)),
        )?;

        // 2s: isentropic compression to the condensing pressure
        let two_s = self.lookup("2s", p_cond, OtherProperty::Entropy(one.entropy))?;
        let work = actual_work(two_s.enthalpy - one.enthalpy, params.efficiency)?;

        // 2: real compressor discharge
        let two = self.lookup("2", p_cond, OtherProperty::Enthalpy(one.enthalpy + work))?;

        // 3: subcooled liquid leaving the condenser
        let subcooling = params.subcooling.value.max(MIN_LOOKUP_OFFSET_K);
        let three = self.lookup(
            "3",
            p_cond,
            OtherProperty::Temperature(k(t_cond.value - subcooling)),
        )?;

        // 4: isenthalpic throttle back to the evaporating pressure
        let four = self.lookup("4", p_evap, OtherProperty::Enthalpy(three.enthalpy))?;

        let performance = Performance::from_enthalpies(
            one.enthalpy,
            two_s.enthalpy,
            two.enthalpy,
            three.enthalpy,
            four.enthalpy,
        )?;

        let inlet = StatePoint::from_property(StatePointId::CompressorInlet, &one, &sat_evap);
        let points = [
            inlet,
            StatePoint::from_property(StatePointId::IsentropicDischarge, &two_s, &sat_cond),
            StatePoint::from_property(StatePointId::ActualDischarge, &two, &sat_cond),
            StatePoint::from_property(StatePointId::CondenserOutlet, &three, &sat_cond),
            StatePoint::from_property(StatePointId::EvaporatorInlet, &four, &sat_evap),
            inlet.relabeled(StatePointId::EvaporatorOutlet),
        ];

        Ok(CycleResult {
            refrigerant: self.refrigerant,
            fault,
            parameters: *params,
            critical_pressure,
            evaporating_temperature: t_evap,
            condensing_temperature: t_cond,
            performance,
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_point::Phase;
    use ph_fluids::SaturationSurrogate;

    fn run(params: CycleParameters, fault: Fault) -> ModelResult<CycleResult> {
        compute_cycle(
            &SaturationSurrogate::r134a(),
            Refrigerant::R134a,
            &params,
            fault,
            &FaultTable::default(),
            &ParameterLimits::default(),
        )
    }

    #[test]
    fn default_cycle_is_closed_and_ordered() {
        let result = run(CycleParameters::default(), Fault::None).unwrap();
        let one = result.point(StatePointId::CompressorInlet);
        let two_s = result.point(StatePointId::IsentropicDischarge);
        let two = result.point(StatePointId::ActualDischarge);
        let three = result.point(StatePointId::CondenserOutlet);
        let four = result.point(StatePointId::EvaporatorInlet);

        assert_eq!(result.point(StatePointId::EvaporatorOutlet).enthalpy, one.enthalpy);
        assert_eq!(four.enthalpy, three.enthalpy);
        assert!((two_s.entropy - one.entropy).abs() < 1e-6);
        assert!(two.enthalpy > two_s.enthalpy);
        assert!(result.performance.cop > 0.0 && result.performance.cop.is_finite());
        assert!(result.performance.energy_residual().abs() < 1e-6);
    }

    #[test]
    fn phases_follow_the_cycle() {
        let result = run(CycleParameters::default(), Fault::None).unwrap();
        assert_eq!(result.point(StatePointId::CompressorInlet).phase, Phase::SuperheatedVapor);
        assert_eq!(result.point(StatePointId::ActualDischarge).phase, Phase::SuperheatedVapor);
        assert_eq!(result.point(StatePointId::CondenserOutlet).phase, Phase::SubcooledLiquid);
        assert_eq!(result.point(StatePointId::EvaporatorInlet).phase, Phase::TwoPhase);
    }

    #[test]
    fn saturation_temperatures_reported() {
        let result = run(CycleParameters::default(), Fault::None).unwrap();
        assert!(result.evaporating_temperature < result.condensing_temperature);
        let t1 = result.point(StatePointId::CompressorInlet).temperature;
        assert!(t1 > result.evaporating_temperature);
    }

    #[test]
    fn segments_connect_points() {
        let result = run(CycleParameters::default(), Fault::None).unwrap();
        let segments: Vec<_> = result.segments().collect();
        assert_eq!(segments.len(), 5);
        assert!(segments[0].0.process.is_reference());
        assert_eq!(segments[4].2.id, StatePointId::EvaporatorOutlet);
        for pair in segments[1..].windows(2) {
            assert_eq!(pair[0].0.to, pair[1].0.from);
        }
    }

    #[test]
    fn zero_offsets_still_resolve() {
        let params = CycleParameters::imperial(50.0, 150.0, 0.0, 0.0, 0.8);
        let result = run(params, Fault::None).unwrap();
        let t1 = result.point(StatePointId::CompressorInlet).temperature.value;
        assert!((t1 - result.evaporating_temperature.value - MIN_LOOKUP_OFFSET_K).abs() < 1e-9);
    }

    #[test]
    fn invalid_parameters_fail_before_lookup() {
        let params = CycleParameters::imperial(150.0, 50.0, 10.0, 10.0, 0.8);
        let err = run(params, Fault::None).unwrap_err();
        assert!(matches!(err, CycleError::ParameterInvalid { .. }));
    }

    #[test]
    fn low_charge_never_raises_a_pressure_below_the_floor() {
        let base = CycleParameters::imperial(8.0, 150.0, 10.0, 5.0, 0.75);
        let none = run(base, Fault::None).unwrap();
        let low = run(base, Fault::LowCharge).unwrap();
        assert!(none.parameters.evaporating_pressure > base.evaporating_pressure);
        assert!(low.parameters.evaporating_pressure <= none.parameters.evaporating_pressure);
    }

    #[test]
    fn dirty_condenser_never_lowers_a_pressure_above_the_ceiling() {
        let base = CycleParameters::imperial(50.0, 450.0, 10.0, 5.0, 0.75);
        let none = run(base, Fault::None).unwrap();
        let dirty = run(base, Fault::DirtyCondenser).unwrap();
        assert!(none.parameters.condensing_pressure < base.condensing_pressure);
        assert!(dirty.parameters.condensing_pressure >= none.parameters.condensing_pressure);
    }

    #[test]
    fn faults_move_pressures_their_own_way_inside_the_envelope() {
        let base = CycleParameters::imperial(20.0, 300.0, 10.0, 5.0, 0.75);
        let none = run(base, Fault::None).unwrap().parameters;
        for fault in [Fault::LowCharge, Fault::DirtyEvaporator] {
            let eff = run(base, fault).unwrap().parameters;
            assert!(eff.evaporating_pressure < none.evaporating_pressure, "{fault}");
        }
        for fault in [Fault::HighCharge, Fault::DirtyCondenser] {
            let eff = run(base, fault).unwrap().parameters;
            assert!(eff.condensing_pressure > none.condensing_pressure, "{fault}");
        }
    }

    #[test]
    fn fault_is_recorded_with_effective_parameters() {
        let base = CycleParameters::default();
        let result = run(base, Fault::LowCharge).unwrap();
        assert_eq!(result.fault, Fault::LowCharge);
        assert!(result.parameters.evaporating_pressure < base.evaporating_pressure);
    }
}
