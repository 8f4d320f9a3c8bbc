//! Display-unit reports of computed cycles.

use ph_config::ParametersDef;
use ph_core::units::display::{
    to_btu_per_lb, to_btu_per_lb_r, to_delta_fahrenheit, to_fahrenheit, to_psia,
};
use ph_cycle::{CycleResult, FaultTable, StatePoint, StatePointId};
use ph_diagram::DomeSample;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct PointReport {
    pub label: &'static str,
    pub description: &'static str,
    pub pressure_psia: f64,
    pub temperature_f: f64,
    pub enthalpy_btu_lb: f64,
    pub entropy_btu_lb_r: f64,
    pub quality: Option<f64>,
    pub phase: &'static str,
}

impl From<&StatePoint> for PointReport {
    fn from(point: &StatePoint) -> Self {
        Self {
            label: point.id.label(),
            description: point.id.description(),
            pressure_psia: to_psia(point.pressure),
            temperature_f: to_fahrenheit(point.temperature),
            enthalpy_btu_lb: to_btu_per_lb(point.enthalpy),
            entropy_btu_lb_r: to_btu_per_lb_r(point.entropy),
            quality: point.quality,
            phase: point.phase.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub refrigeration_effect_btu_lb: f64,
    pub compressor_work_btu_lb: f64,
    pub isentropic_work_btu_lb: f64,
    pub heat_rejected_btu_lb: f64,
    pub cop: f64,
}

#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub refrigerant: String,
    pub provider: String,
    pub fault: &'static str,
    /// Parameters after the fault adjustment
    pub parameters: ParametersDef,
    pub evaporating_temperature_f: f64,
    pub condensing_temperature_f: f64,
    pub points: Vec<PointReport>,
    pub performance: PerformanceReport,
}

impl CycleReport {
    pub fn new(result: &CycleResult, provider: &str) -> Self {
        let perf = &result.performance;
        Self {
            refrigerant: result.refrigerant.to_string(),
            provider: provider.to_string(),
            fault: result.fault.key(),
            parameters: (&result.parameters).into(),
            evaporating_temperature_f: to_fahrenheit(result.evaporating_temperature),
            condensing_temperature_f: to_fahrenheit(result.condensing_temperature),
            points: result
                .points()
                .iter()
                .filter(|p| p.id != StatePointId::EvaporatorOutlet)
                .map(PointReport::from)
                .collect(),
            performance: PerformanceReport {
                refrigeration_effect_btu_lb: to_btu_per_lb(perf.refrigeration_effect),
                compressor_work_btu_lb: to_btu_per_lb(perf.compressor_work),
                isentropic_work_btu_lb: to_btu_per_lb(perf.isentropic_work),
                heat_rejected_btu_lb: to_btu_per_lb(perf.heat_rejected),
                cop: perf.cop,
            },
        }
    }

    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let p = &self.parameters;
        let _ = writeln!(out, "Refrigerant: {} ({})", self.refrigerant, self.provider);
        let _ = writeln!(out, "Fault: {}", self.fault);
        let _ = writeln!(
            out,
            "P_evap = {:.1} psia ({:.1} °F sat)   P_cond = {:.1} psia ({:.1} °F sat)",
            p.evaporating_psia,
            self.evaporating_temperature_f,
            p.condensing_psia,
            self.condensing_temperature_f
        );
        let _ = writeln!(
            out,
            "Superheat = {:.1} °F   Subcooling = {:.1} °F   η = {:.2}",
            p.superheat_f, p.subcooling_f, p.efficiency
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<4} {:<22} {:>9} {:>9} {:>10} {:>10} {:>7}  Phase",
            "Pt", "State", "P [psia]", "T [°F]", "h [BTU/lb]", "s [BTU/lbR]", "x"
        );
        for pt in &self.points {
            let quality = pt.quality.map_or_else(|| "-".to_string(), |q| format!("{q:.3}"));
            let _ = writeln!(
                out,
                "{:<4} {:<22} {:>9.1} {:>9.1} {:>10.2} {:>10.4} {:>7}  {}",
                pt.label,
                pt.description,
                pt.pressure_psia,
                pt.temperature_f,
                pt.enthalpy_btu_lb,
                pt.entropy_btu_lb_r,
                quality,
                pt.phase
            );
        }
        let perf = &self.performance;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Refrigeration effect: {:>8.2} BTU/lb",
            perf.refrigeration_effect_btu_lb
        );
        let _ = writeln!(
            out,
            "Compressor work:      {:>8.2} BTU/lb (isentropic {:.2})",
            perf.compressor_work_btu_lb, perf.isentropic_work_btu_lb
        );
        let _ = writeln!(out, "Heat rejected:        {:>8.2} BTU/lb", perf.heat_rejected_btu_lb);
        let _ = writeln!(out, "COP:                  {:>8.2}", perf.cop);
        out
    }
}

#[derive(Debug, Serialize)]
pub struct DomeRow {
    pub pressure_psia: f64,
    pub bubble_btu_lb: f64,
    pub dew_btu_lb: f64,
}

impl From<&DomeSample> for DomeRow {
    fn from(sample: &DomeSample) -> Self {
        Self {
            pressure_psia: to_psia(sample.pressure),
            bubble_btu_lb: to_btu_per_lb(sample.bubble_enthalpy),
            dew_btu_lb: to_btu_per_lb(sample.dew_enthalpy),
        }
    }
}

pub fn dome_table(rows: &[DomeRow]) -> String {
    let mut out = format!("{:>10} {:>12} {:>12}\n", "P [psia]", "h_f [BTU/lb]", "h_g [BTU/lb]");
    for row in rows {
        let _ = writeln!(
            out,
            "{:>10.2} {:>12.2} {:>12.2}",
            row.pressure_psia, row.bubble_btu_lb, row.dew_btu_lb
        );
    }
    out
}

/// One line per fault, with the shift it gives the default operating point.
pub fn fault_table(table: &FaultTable) -> String {
    let mut out = String::new();
    let reference = ParametersDef::default();
    for fault in ph_cycle::Fault::ALL.iter().filter(|f| f.is_active()) {
        let effect = table.effect(*fault);
        let _ = writeln!(
            out,
            "{:<18} P_evap x{:.4} ({:+.1} psia)  P_cond x{:.4} ({:+.1} psia)  \
             SH {:+.1} °F  SC {:+.1} °F",
            fault.key(),
            effect.evaporating_factor,
            reference.evaporating_psia * (effect.evaporating_factor - 1.0),
            effect.condensing_factor,
            reference.condensing_psia * (effect.condensing_factor - 1.0),
            to_delta_fahrenheit(effect.superheat_delta),
            to_delta_fahrenheit(effect.subcooling_delta),
        );
    }
    out
}
