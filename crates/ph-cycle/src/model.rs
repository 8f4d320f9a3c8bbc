//! Stateful cycle model driven by commands.

use crate::command::Command;
use crate::cycle::{CycleResult, compute_cycle};
use crate::error::{CycleError, LookupContext, ModelResult};
use crate::fault::{Fault, FaultTable};
use crate::params::{CycleParameters, ParameterLimits, PressureEnvelope};
use ph_core::units::Pressure;
use ph_fluids::{PropertyProvider, Refrigerant};
use tracing::{debug, warn};

/// Owns the base parameters, active fault and last good result.
///
/// Recomputation is atomic: a failed recompute records the error and leaves
/// the previous result in place.
pub struct CycleModel {
    provider: Box<dyn PropertyProvider>,
    refrigerant: Refrigerant,
    critical_pressure: Pressure,
    defaults: CycleParameters,
    limits: ParameterLimits,
    faults: FaultTable,
    parameters: CycleParameters,
    fault: Fault,
    result: Option<CycleResult>,
    last_error: Option<CycleError>,
}

impl CycleModel {
    /// Build a model and compute the initial cycle.
    ///
    /// Fails when the provider cannot report a critical pressure or the
    /// defaults are invalid. Valid defaults outside the pressure envelope are
    /// pulled inside it. A failing first computation is not fatal; it is
    /// available through [`CycleModel::last_error`].
    pub fn new(
        provider: Box<dyn PropertyProvider>,
        refrigerant: Refrigerant,
        defaults: CycleParameters,
        limits: ParameterLimits,
        faults: FaultTable,
    ) -> ModelResult<Self> {
        let critical_pressure = provider
            .critical_pressure(refrigerant)
            .map_err(CycleError::lookup(LookupContext::named("critical point")))?;
        defaults.validate(critical_pressure)?;
        let contained = limits.envelope(critical_pressure).contain(&defaults);
        if contained != defaults {
            warn!(
                evaporating_pa = contained.evaporating_pressure.value,
                condensing_pa = contained.condensing_pressure.value,
                "default pressures moved inside the allowed envelope"
            );
        }
        let defaults = contained;

        let mut model = Self {
            provider,
            refrigerant,
            critical_pressure,
            defaults,
            limits,
            faults,
            parameters: defaults,
            fault: Fault::None,
            result: None,
            last_error: None,
        };
        // Failure is recorded in last_error
        let _ = model.recompute();
        Ok(model)
    }

    /// Recompute from the current base parameters and fault.
    pub fn recompute(&mut self) -> ModelResult<&CycleResult> {
        let computed = compute_cycle(
            self.provider.as_ref(),
            self.refrigerant,
            &self.parameters,
            self.fault,
            &self.faults,
            &self.limits,
        );
        match computed {
            Ok(result) => {
                self.last_error = None;
                Ok(self.result.insert(result))
            }
            Err(err) => {
                warn!(
                    error = %err,
                    fault = %self.fault,
                    "cycle recompute failed; keeping previous result"
                );
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Apply one command, then recompute.
    pub fn apply(&mut self, command: Command) -> ModelResult<&CycleResult> {
        debug!(?command, "applying command");
        let envelope = self.envelope();
        let params = &mut self.parameters;
        match command {
            Command::AdjustEvaporatingPressure(dp) => {
                params.evaporating_pressure = envelope.clamp_evaporating(
                    params.evaporating_pressure + dp,
                    params.condensing_pressure,
                );
            }
            Command::AdjustCondensingPressure(dp) => {
                params.condensing_pressure = envelope.clamp_condensing(
                    params.condensing_pressure + dp,
                    params.evaporating_pressure,
                );
            }
            Command::AdjustSuperheat(dt) => {
                params.superheat = self.limits.clamp_superheat(params.superheat + dt);
            }
            Command::AdjustSubcooling(dt) => {
                params.subcooling = self.limits.clamp_subcooling(params.subcooling + dt);
            }
            Command::AdjustEfficiency(de) => {
                params.efficiency = self.limits.clamp_efficiency(params.efficiency + de);
            }
            Command::SelectFault(fault) => self.fault = fault,
            Command::Reset => return self.reset(),
        }
        self.recompute()
    }

    /// Restore defaults, clear the fault and recompute.
    pub fn reset(&mut self) -> ModelResult<&CycleResult> {
        self.parameters = self.defaults;
        self.fault = Fault::None;
        self.recompute()
    }

    /// Last successfully computed cycle.
    pub fn current_result(&self) -> Option<&CycleResult> {
        self.result.as_ref()
    }

    /// Base parameters, before any fault adjustment.
    pub fn current_parameters(&self) -> &CycleParameters {
        &self.parameters
    }

    /// Parameters the last good result was computed with.
    pub fn effective_parameters(&self) -> Option<&CycleParameters> {
        self.result.as_ref().map(|r| &r.parameters)
    }

    pub fn fault(&self) -> Fault {
        self.fault
    }

    pub fn last_error(&self) -> Option<&CycleError> {
        self.last_error.as_ref()
    }

    pub fn critical_pressure(&self) -> Pressure {
        self.critical_pressure
    }

    pub fn refrigerant(&self) -> Refrigerant {
        self.refrigerant
    }

    pub fn limits(&self) -> &ParameterLimits {
        &self.limits
    }

    pub fn provider(&self) -> &dyn PropertyProvider {
        self.provider.as_ref()
    }

    fn envelope(&self) -> PressureEnvelope {
        self.limits.envelope(self.critical_pressure)
    }
}

impl std::fmt::Debug for CycleModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleModel")
            .field("provider", &self.provider.name())
            .field("refrigerant", &self.refrigerant)
            .field("parameters", &self.parameters)
            .field("fault", &self.fault)
            .field("has_result", &self.result.is_some())
            .field("last_error", &self.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::display::{psia, to_delta_fahrenheit, to_psia};
    use ph_core::units::dk;
    use ph_fluids::SaturationSurrogate;

    fn model() -> CycleModel {
        CycleModel::new(
            Box::new(SaturationSurrogate::r134a()),
            Refrigerant::R134a,
            CycleParameters::default(),
            ParameterLimits::default(),
            FaultTable::default(),
        )
        .unwrap()
    }

    #[test]
    fn new_computes_initial_cycle() {
        let m = model();
        assert!(m.current_result().is_some());
        assert!(m.last_error().is_none());
        assert_eq!(m.fault(), Fault::None);
        assert!((m.critical_pressure().value - 4_059_300.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_defaults_rejected() {
        let err = CycleModel::new(
            Box::new(SaturationSurrogate::r134a()),
            Refrigerant::R134a,
            CycleParameters::imperial(100.0, 90.0, 10.0, 5.0, 0.75),
            ParameterLimits::default(),
            FaultTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CycleError::ParameterInvalid { .. }));
    }

    #[test]
    fn defaults_outside_envelope_are_contained() {
        let m = CycleModel::new(
            Box::new(SaturationSurrogate::r134a()),
            Refrigerant::R134a,
            CycleParameters::imperial(8.0, 450.0, 10.0, 5.0, 0.75),
            ParameterLimits::default(),
            FaultTable::default(),
        )
        .unwrap();
        let p = m.current_parameters();
        assert!((to_psia(p.evaporating_pressure) - 10.0).abs() < 1e-9);
        assert!((to_psia(p.condensing_pressure) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn evaporating_pressure_cannot_pass_condensing() {
        let mut m = model();
        for _ in 0..200 {
            m.apply(Command::AdjustEvaporatingPressure(psia(2.0))).unwrap();
        }
        let p = m.current_parameters();
        assert!((to_psia(p.evaporating_pressure) - 155.0).abs() < 1e-9);
        assert!(p.evaporating_pressure < p.condensing_pressure);
    }

    #[test]
    fn condensing_pressure_stops_at_ceiling() {
        let mut m = model();
        for _ in 0..200 {
            m.apply(Command::AdjustCondensingPressure(psia(5.0))).unwrap();
        }
        assert!((to_psia(m.current_parameters().condensing_pressure) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn superheat_floor_and_efficiency_bounds() {
        let mut m = model();
        m.apply(Command::AdjustSuperheat(dk(-100.0))).unwrap();
        assert!((to_delta_fahrenheit(m.current_parameters().superheat) - 0.1).abs() < 1e-9);
        m.apply(Command::AdjustEfficiency(5.0)).unwrap();
        assert_eq!(m.current_parameters().efficiency, 1.0);
    }

    #[test]
    fn fault_changes_effective_but_not_base() {
        let mut m = model();
        let base = *m.current_parameters();
        m.apply(Command::SelectFault(Fault::DirtyCondenser)).unwrap();
        assert_eq!(*m.current_parameters(), base);
        let eff = m.effective_parameters().unwrap();
        assert!(eff.condensing_pressure > base.condensing_pressure);

        m.apply(Command::SelectFault(Fault::None)).unwrap();
        assert_eq!(*m.effective_parameters().unwrap(), base);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut m = model();
        m.apply(Command::AdjustSubcooling(dk(3.0))).unwrap();
        m.apply(Command::SelectFault(Fault::LowCharge)).unwrap();
        m.apply(Command::Reset).unwrap();
        assert_eq!(*m.current_parameters(), CycleParameters::default());
        assert_eq!(m.fault(), Fault::None);
    }

    #[test]
    fn envelope_follows_critical_pressure() {
        let m = model();
        let env = m.envelope();
        assert_eq!(env.floor, m.limits().min_pressure);
        assert!(env.ceiling.value <= m.critical_pressure().value);
        assert_eq!(env.gap, m.limits().min_pressure_gap);
    }
}
