//! Cycle scenarios against real R134a properties from CoolProp.

use ph_cycle::{CycleModel, CycleParameters, FaultTable, ParameterLimits, Phase, StatePointId};
use ph_fluids::{CoolPropProvider, Refrigerant};

#[test]
fn textbook_cycle_with_coolprop() {
    let model = CycleModel::new(
        Box::new(CoolPropProvider::new()),
        Refrigerant::R134a,
        CycleParameters::imperial(50.0, 150.0, 10.0, 10.0, 0.8),
        ParameterLimits::default(),
        FaultTable::default(),
    )
    .unwrap();
    assert!(model.last_error().is_none(), "{:?}", model.last_error());
    let result = model.current_result().unwrap();

    // 50 psia: about 40 °F saturation, 150 psia: about 105 °F
    let t_evap = result.evaporating_temperature.value;
    let t_cond = result.condensing_temperature.value;
    assert!((t_evap - 277.6).abs() < 2.0, "T_evap = {t_evap} K");
    assert!((t_cond - 314.3).abs() < 2.0, "T_cond = {t_cond} K");

    let ideal = result.point(StatePointId::IsentropicDischarge);
    let actual = result.point(StatePointId::ActualDischarge);
    assert!(actual.temperature > ideal.temperature);
    assert_eq!(result.point(StatePointId::EvaporatorInlet).phase, Phase::TwoPhase);

    let cop = result.performance.cop;
    assert!(cop > 3.0 && cop < 8.0, "COP = {cop}");
}
