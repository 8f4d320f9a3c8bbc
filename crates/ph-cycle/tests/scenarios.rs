//! End-to-end cycle scenarios on the analytic surrogate.

use ph_core::units::display::{psia, to_psia};
use ph_core::units::Pressure;
use ph_cycle::{
    Command, CycleError, CycleModel, CycleParameters, Fault, FaultTable, ParameterLimits,
    StatePointId,
};
use ph_fluids::{
    FluidError, FluidResult, OtherProperty, PropertyPoint, PropertyProvider, Refrigerant,
    SaturationSurrogate,
};

fn surrogate_model(defaults: CycleParameters) -> CycleModel {
    CycleModel::new(
        Box::new(SaturationSurrogate::r134a()),
        Refrigerant::R134a,
        defaults,
        ParameterLimits::default(),
        FaultTable::default(),
    )
    .unwrap()
}

/// Surrogate that refuses every lookup above a pressure threshold.
struct CappedProvider {
    inner: SaturationSurrogate,
    cap: Pressure,
}

impl PropertyProvider for CappedProvider {
    fn name(&self) -> &str {
        "Capped"
    }

    fn supports(&self, refrigerant: Refrigerant) -> bool {
        self.inner.supports(refrigerant)
    }

    fn critical_pressure(&self, refrigerant: Refrigerant) -> FluidResult<Pressure> {
        self.inner.critical_pressure(refrigerant)
    }

    fn lookup(
        &self,
        refrigerant: Refrigerant,
        pressure: Pressure,
        other: OtherProperty,
    ) -> FluidResult<PropertyPoint> {
        if pressure > self.cap {
            return Err(FluidError::OutOfRange {
                what: "pressure above test cap",
            });
        }
        self.inner.lookup(refrigerant, pressure, other)
    }
}

#[test]
fn textbook_cycle_at_50_150_psia() {
    let model = surrogate_model(CycleParameters::imperial(50.0, 150.0, 10.0, 10.0, 0.8));
    assert!(model.last_error().is_none());
    let result = model.current_result().unwrap();

    let ideal = result.point(StatePointId::IsentropicDischarge);
    let actual = result.point(StatePointId::ActualDischarge);
    assert!(actual.temperature > ideal.temperature);

    let cop = result.performance.cop;
    assert!(cop.is_finite() && cop > 0.0, "COP = {cop}");
    assert!(result.performance.compressor_work > result.performance.isentropic_work);
}

#[test]
fn raising_evaporating_pressure_clamps_below_condensing() {
    let mut model = surrogate_model(CycleParameters::imperial(50.0, 150.0, 10.0, 10.0, 0.8));
    model
        .apply(Command::AdjustEvaporatingPressure(psia(500.0)))
        .unwrap();

    let params = model.current_parameters();
    assert!(params.evaporating_pressure < params.condensing_pressure);
    let gap = to_psia(params.condensing_pressure) - to_psia(params.evaporating_pressure);
    assert!((gap - 5.0).abs() < 1e-9, "gap = {gap} psia");
    assert!(model.last_error().is_none());
}

#[test]
fn low_charge_lowers_effective_evaporating_pressure() {
    let mut model = surrogate_model(CycleParameters::imperial(50.0, 150.0, 10.0, 10.0, 0.8));
    let before = model.current_parameters().evaporating_pressure;
    model.apply(Command::SelectFault(Fault::LowCharge)).unwrap();

    let effective = model.effective_parameters().unwrap();
    assert!(effective.evaporating_pressure < before);
    assert_eq!(model.current_parameters().evaporating_pressure, before);
    assert_eq!(model.current_result().unwrap().fault, Fault::LowCharge);
}

#[test]
fn dirty_evaporator_raises_superheat() {
    let mut model = surrogate_model(CycleParameters::default());
    let base = *model.current_parameters();
    model
        .apply(Command::SelectFault(Fault::DirtyEvaporator))
        .unwrap();
    let effective = model.effective_parameters().unwrap();
    assert!(effective.superheat > base.superheat);
    assert!(effective.evaporating_pressure < base.evaporating_pressure);
}

#[test]
fn selecting_a_second_fault_replaces_the_first() {
    let mut model = surrogate_model(CycleParameters::default());
    model.apply(Command::SelectFault(Fault::LowCharge)).unwrap();
    model
        .apply(Command::SelectFault(Fault::DirtyCondenser))
        .unwrap();
    let base = *model.current_parameters();
    let effective = model.effective_parameters().unwrap();
    assert_eq!(model.fault(), Fault::DirtyCondenser);
    assert_eq!(effective.evaporating_pressure, base.evaporating_pressure);
}

#[test]
fn failed_recompute_keeps_previous_result() {
    let provider = CappedProvider {
        inner: SaturationSurrogate::r134a(),
        cap: psia(200.0),
    };
    let mut model = CycleModel::new(
        Box::new(provider),
        Refrigerant::R134a,
        CycleParameters::default(),
        ParameterLimits::default(),
        FaultTable::default(),
    )
    .unwrap();
    let good = model.current_result().unwrap().clone();

    let err = model
        .apply(Command::AdjustCondensingPressure(psia(60.0)))
        .unwrap_err();
    match &err {
        CycleError::PropertyLookup { context, .. } => {
            assert_eq!(context.point, "condenser saturation");
            assert!(context.pressure.is_some());
            assert!(context.input.is_none());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(model.current_result(), Some(&good));
    assert_eq!(model.last_error(), Some(&err));

    model
        .apply(Command::AdjustCondensingPressure(psia(-60.0)))
        .unwrap();
    assert!(model.last_error().is_none());
}

#[test]
fn every_command_recomputes_once() {
    let mut model = surrogate_model(CycleParameters::default());
    let first = model.current_result().unwrap().performance.cop;
    model
        .apply(Command::AdjustSuperheat(ph_core::units::dk(5.0)))
        .unwrap();
    let second = model.current_result().unwrap().performance.cop;
    assert_ne!(first, second);
}
