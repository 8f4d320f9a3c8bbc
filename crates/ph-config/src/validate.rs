//! Configuration validation logic.

use crate::schema::{AxesDef, FaultEffectDef, SimulatorConfig, WindowDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be non-negative and finite"));
    }
    Ok(())
}

pub fn validate_config(config: &SimulatorConfig) -> Result<(), ValidationError> {
    if config.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    if config.refrigerant.parse::<ph_fluids::Refrigerant>().is_err() {
        return Err(invalid(
            "refrigerant",
            &config.refrigerant,
            "not in the refrigerant catalog",
        ));
    }

    validate_axes(&config.axes)?;
    validate_window(&config.window)?;

    let d = &config.defaults;
    positive("defaults.evaporating_psia", d.evaporating_psia)?;
    positive("defaults.condensing_psia", d.condensing_psia)?;
    non_negative("defaults.superheat_f", d.superheat_f)?;
    non_negative("defaults.subcooling_f", d.subcooling_f)?;
    if d.evaporating_psia >= d.condensing_psia {
        return Err(invalid(
            "defaults.evaporating_psia",
            d.evaporating_psia,
            "must be below defaults.condensing_psia",
        ));
    }
    let axes = &config.axes;
    let on_axis = |p: f64| p >= axes.p_min_psia && p <= axes.p_max_psia;
    if !on_axis(d.evaporating_psia) {
        return Err(invalid(
            "defaults.evaporating_psia",
            d.evaporating_psia,
            "must lie within [axes.p_min_psia, axes.p_max_psia]",
        ));
    }
    if !on_axis(d.condensing_psia) {
        return Err(invalid(
            "defaults.condensing_psia",
            d.condensing_psia,
            "must lie within [axes.p_min_psia, axes.p_max_psia]",
        ));
    }
    if !(d.efficiency > 0.0 && d.efficiency <= 1.0) {
        return Err(invalid("defaults.efficiency", d.efficiency, "must be within (0, 1]"));
    }

    let s = &config.steps;
    positive("steps.evaporating_psia", s.evaporating_psia)?;
    positive("steps.condensing_psia", s.condensing_psia)?;
    positive("steps.superheat_f", s.superheat_f)?;
    positive("steps.subcooling_f", s.subcooling_f)?;
    positive("steps.efficiency", s.efficiency)?;

    let l = &config.limits;
    positive("limits.min_pressure_gap_psia", l.min_pressure_gap_psia)?;
    if l.min_pressure_gap_psia >= config.axes.p_max_psia - config.axes.p_min_psia {
        return Err(invalid(
            "limits.min_pressure_gap_psia",
            l.min_pressure_gap_psia,
            "must be smaller than the pressure axis span",
        ));
    }
    if !(l.critical_margin > 0.0 && l.critical_margin < 1.0) {
        return Err(invalid(
            "limits.critical_margin",
            l.critical_margin,
            "must be within (0, 1)",
        ));
    }
    non_negative("limits.min_superheat_f", l.min_superheat_f)?;
    non_negative("limits.min_subcooling_f", l.min_subcooling_f)?;
    positive("limits.min_efficiency", l.min_efficiency)?;
    if !(l.min_efficiency <= l.max_efficiency && l.max_efficiency <= 1.0) {
        return Err(invalid(
            "limits.max_efficiency",
            l.max_efficiency,
            "must be within [min_efficiency, 1]",
        ));
    }

    let f = &config.faults;
    validate_fault("faults.low_charge", &f.low_charge)?;
    validate_fault("faults.high_charge", &f.high_charge)?;
    validate_fault("faults.dirty_condenser", &f.dirty_condenser)?;
    validate_fault("faults.dirty_evaporator", &f.dirty_evaporator)?;

    Ok(())
}

fn validate_axes(axes: &AxesDef) -> Result<(), ValidationError> {
    if !axes.h_min_btu_lb.is_finite() || !axes.h_max_btu_lb.is_finite() {
        return Err(invalid("axes.h_min_btu_lb", axes.h_min_btu_lb, "must be finite"));
    }
    if axes.h_min_btu_lb >= axes.h_max_btu_lb {
        return Err(invalid(
            "axes.h_min_btu_lb",
            axes.h_min_btu_lb,
            "must be below axes.h_max_btu_lb",
        ));
    }
    positive("axes.p_min_psia", axes.p_min_psia)?;
    positive("axes.p_max_psia", axes.p_max_psia)?;
    if axes.p_min_psia >= axes.p_max_psia {
        return Err(invalid(
            "axes.p_min_psia",
            axes.p_min_psia,
            "must be below axes.p_max_psia",
        ));
    }
    for &tick in &axes.pressure_ticks_psia {
        positive("axes.pressure_ticks_psia", tick)?;
    }
    if axes.enthalpy_tick_count < 2 {
        return Err(invalid(
            "axes.enthalpy_tick_count",
            axes.enthalpy_tick_count,
            "at least two ticks are needed",
        ));
    }
    if axes.dome_samples < 2 {
        return Err(invalid(
            "axes.dome_samples",
            axes.dome_samples,
            "at least two samples are needed",
        ));
    }
    Ok(())
}

fn validate_window(window: &WindowDef) -> Result<(), ValidationError> {
    let sizes = [
        ("window.width", window.width),
        ("window.height", window.height),
        ("window.min_width", window.min_width),
        ("window.min_height", window.min_height),
        ("window.panel_width", window.panel_width),
    ];
    for (field, value) in sizes {
        positive(field, f64::from(value))?;
    }
    let margins = [
        ("window.margin_top", window.margin_top),
        ("window.margin_bottom", window.margin_bottom),
        ("window.margin_left", window.margin_left),
        ("window.panel_gap", window.panel_gap),
    ];
    for (field, value) in margins {
        non_negative(field, f64::from(value))?;
    }
    if window.width < window.min_width || window.height < window.min_height {
        return Err(invalid(
            "window.width",
            format!("{}x{}", window.width, window.height),
            "initial size below the minimum size",
        ));
    }
    Ok(())
}

fn validate_fault(field: &str, effect: &FaultEffectDef) -> Result<(), ValidationError> {
    positive(&format!("{field}.evaporating_factor"), effect.evaporating_factor)?;
    positive(&format!("{field}.condensing_factor"), effect.condensing_factor)?;
    if !effect.superheat_delta_f.is_finite() || !effect.subcooling_delta_f.is_finite() {
        return Err(invalid(field, "non-finite delta", "temperature deltas must be finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&SimulatorConfig::default()).is_ok());
    }

    #[test]
    fn inverted_axes_rejected() {
        let mut config = SimulatorConfig::default();
        config.axes.p_min_psia = 500.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("axes.p_min_psia"));
    }

    #[test]
    fn inverted_defaults_rejected() {
        let mut config = SimulatorConfig::default();
        config.defaults.evaporating_psia = 200.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn defaults_off_the_pressure_axis_rejected() {
        let mut config = SimulatorConfig::default();
        config.defaults.evaporating_psia = 8.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("defaults.evaporating_psia"));

        let mut config = SimulatorConfig::default();
        config.defaults.condensing_psia = 450.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("defaults.condensing_psia"));
    }

    #[test]
    fn future_version_rejected() {
        let config = SimulatorConfig {
            version: crate::LATEST_VERSION + 1,
            ..SimulatorConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn zero_fault_factor_rejected() {
        let mut config = SimulatorConfig::default();
        config.faults.dirty_condenser.condensing_factor = 0.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("faults.dirty_condenser.condensing_factor"));
    }

    #[test]
    fn window_smaller_than_minimum_rejected() {
        let mut config = SimulatorConfig::default();
        config.window.width = 400.0;
        assert!(validate_config(&config).is_err());
    }
}
