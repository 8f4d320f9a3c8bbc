//! Conversions from display-unit definitions to SI core types.

use crate::schema::{
    AxesDef, FaultEffectDef, FaultTableDef, LimitsDef, ParametersDef, ProviderKind,
    SimulatorConfig, StepsDef, WindowDef,
};
use crate::ConfigResult;
use crate::validate::ValidationError;
use ph_core::units::Pressure;
use ph_core::units::display::{btu_per_lb, delta_fahrenheit, psia, to_delta_fahrenheit, to_psia};
use ph_cycle::{AdjustmentSteps, CycleParameters, FaultEffect, FaultTable, ParameterLimits};
use ph_diagram::{AxisRange, Margins, PlotLayout};
use ph_fluids::{CoolPropProvider, PropertyProvider, Refrigerant, SaturationSurrogate};

impl ParametersDef {
    pub fn to_parameters(&self) -> CycleParameters {
        CycleParameters::imperial(
            self.evaporating_psia,
            self.condensing_psia,
            self.superheat_f,
            self.subcooling_f,
            self.efficiency,
        )
    }
}

impl From<&CycleParameters> for ParametersDef {
    fn from(params: &CycleParameters) -> Self {
        Self {
            evaporating_psia: to_psia(params.evaporating_pressure),
            condensing_psia: to_psia(params.condensing_pressure),
            superheat_f: to_delta_fahrenheit(params.superheat),
            subcooling_f: to_delta_fahrenheit(params.subcooling),
            efficiency: params.efficiency,
        }
    }
}

impl StepsDef {
    pub fn to_steps(&self) -> AdjustmentSteps {
        AdjustmentSteps {
            evaporating_pressure: psia(self.evaporating_psia),
            condensing_pressure: psia(self.condensing_psia),
            superheat: delta_fahrenheit(self.superheat_f),
            subcooling: delta_fahrenheit(self.subcooling_f),
            efficiency: self.efficiency,
        }
    }
}

impl LimitsDef {
    /// Limits with the pressure window taken from `axes`.
    pub fn to_limits(&self, axes: &AxesDef) -> ParameterLimits {
        ParameterLimits {
            min_pressure: psia(axes.p_min_psia),
            max_pressure: psia(axes.p_max_psia),
            min_pressure_gap: psia(self.min_pressure_gap_psia),
            critical_margin: self.critical_margin,
            min_superheat: delta_fahrenheit(self.min_superheat_f),
            min_subcooling: delta_fahrenheit(self.min_subcooling_f),
            min_efficiency: self.min_efficiency,
            max_efficiency: self.max_efficiency,
        }
    }
}

impl FaultEffectDef {
    pub fn to_effect(&self) -> FaultEffect {
        FaultEffect {
            evaporating_factor: self.evaporating_factor,
            condensing_factor: self.condensing_factor,
            superheat_delta: delta_fahrenheit(self.superheat_delta_f),
            subcooling_delta: delta_fahrenheit(self.subcooling_delta_f),
        }
    }
}

impl From<&FaultEffect> for FaultEffectDef {
    fn from(effect: &FaultEffect) -> Self {
        Self {
            evaporating_factor: effect.evaporating_factor,
            condensing_factor: effect.condensing_factor,
            superheat_delta_f: to_delta_fahrenheit(effect.superheat_delta),
            subcooling_delta_f: to_delta_fahrenheit(effect.subcooling_delta),
        }
    }
}

impl FaultTableDef {
    pub fn to_table(&self) -> FaultTable {
        FaultTable {
            low_charge: self.low_charge.to_effect(),
            high_charge: self.high_charge.to_effect(),
            dirty_condenser: self.dirty_condenser.to_effect(),
            dirty_evaporator: self.dirty_evaporator.to_effect(),
        }
    }
}

impl From<&FaultTable> for FaultTableDef {
    fn from(table: &FaultTable) -> Self {
        Self {
            low_charge: (&table.low_charge).into(),
            high_charge: (&table.high_charge).into(),
            dirty_condenser: (&table.dirty_condenser).into(),
            dirty_evaporator: (&table.dirty_evaporator).into(),
        }
    }
}

impl AxesDef {
    pub fn to_axis_range(&self) -> ConfigResult<AxisRange> {
        Ok(AxisRange::new(
            btu_per_lb(self.h_min_btu_lb),
            btu_per_lb(self.h_max_btu_lb),
            psia(self.p_min_psia),
            psia(self.p_max_psia),
        )?)
    }

    pub fn pressure_ticks(&self) -> Vec<Pressure> {
        self.pressure_ticks_psia.iter().copied().map(psia).collect()
    }
}

impl WindowDef {
    pub fn to_layout(&self) -> PlotLayout {
        PlotLayout {
            margins: Margins {
                top: f64::from(self.margin_top),
                bottom: f64::from(self.margin_bottom),
                left: f64::from(self.margin_left),
                right: f64::from(self.panel_width + self.panel_gap),
            },
            panel_width: f64::from(self.panel_width),
        }
    }
}

impl ProviderKind {
    pub fn build(&self) -> Box<dyn PropertyProvider> {
        match self {
            ProviderKind::CoolProp => Box::new(CoolPropProvider::new()),
            ProviderKind::Surrogate => Box::new(SaturationSurrogate::r134a()),
        }
    }
}

impl SimulatorConfig {
    pub fn refrigerant(&self) -> ConfigResult<Refrigerant> {
        self.refrigerant.parse().map_err(|_| {
            ValidationError::InvalidValue {
                field: "refrigerant".to_string(),
                value: self.refrigerant.clone(),
                reason: "not in the refrigerant catalog".to_string(),
            }
            .into()
        })
    }

    pub fn parameter_limits(&self) -> ParameterLimits {
        self.limits.to_limits(&self.axes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_match_core_defaults() {
        let from_config = ParametersDef::default().to_parameters();
        assert_eq!(from_config, CycleParameters::default());
    }

    #[test]
    fn default_limits_match_core_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.parameter_limits(), ParameterLimits::default());
    }

    #[test]
    fn default_steps_match_core_defaults() {
        assert_eq!(StepsDef::default().to_steps(), AdjustmentSteps::default());
    }

    #[test]
    fn fault_table_survives_display_units() {
        let table = FaultTableDef::default().to_table();
        let core = FaultTable::default();
        assert_eq!(table.low_charge.evaporating_factor, core.low_charge.evaporating_factor);
        let dsh = table.high_charge.superheat_delta.value - core.high_charge.superheat_delta.value;
        assert!(dsh.abs() < 1e-12);
    }

    #[test]
    fn window_layout_matches_diagram_defaults() {
        assert_eq!(WindowDef::default().to_layout(), PlotLayout::default());
    }

    #[test]
    fn surrogate_provider_builds() {
        let provider = ProviderKind::Surrogate.build();
        assert_eq!(provider.name(), "Surrogate");
    }

    #[test]
    fn unknown_refrigerant_is_reported() {
        let config = SimulatorConfig {
            refrigerant: "R22".to_string(),
            ..SimulatorConfig::default()
        };
        assert!(config.refrigerant().is_err());
        assert_eq!(SimulatorConfig::default().refrigerant().unwrap(), Refrigerant::R134a);
    }
}
