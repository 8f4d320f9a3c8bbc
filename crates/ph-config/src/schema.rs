//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Immutable settings for the model, the diagram and the front ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub version: u32,
    pub refrigerant: String,
    pub provider: ProviderKind,
    pub defaults: ParametersDef,
    pub steps: StepsDef,
    pub limits: LimitsDef,
    pub faults: FaultTableDef,
    pub axes: AxesDef,
    pub window: WindowDef,
    pub palette: PaletteDef,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            refrigerant: "R134a".to_string(),
            provider: ProviderKind::default(),
            defaults: ParametersDef::default(),
            steps: StepsDef::default(),
            limits: LimitsDef::default(),
            faults: FaultTableDef::default(),
            axes: AxesDef::default(),
            window: WindowDef::default(),
            palette: PaletteDef::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    CoolProp,
    /// Closed-form surrogate; no native library needed.
    Surrogate,
}

/// Starting operating point, restored by reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParametersDef {
    pub evaporating_psia: f64,
    pub condensing_psia: f64,
    pub superheat_f: f64,
    pub subcooling_f: f64,
    pub efficiency: f64,
}

impl Default for ParametersDef {
    fn default() -> Self {
        Self {
            evaporating_psia: 35.0,
            condensing_psia: 160.0,
            superheat_f: 10.0,
            subcooling_f: 5.0,
            efficiency: 0.75,
        }
    }
}

/// Change per key press.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StepsDef {
    pub evaporating_psia: f64,
    pub condensing_psia: f64,
    pub superheat_f: f64,
    pub subcooling_f: f64,
    pub efficiency: f64,
}

impl Default for StepsDef {
    fn default() -> Self {
        Self {
            evaporating_psia: 1.0,
            condensing_psia: 2.0,
            superheat_f: 1.0,
            subcooling_f: 1.0,
            efficiency: 0.01,
        }
    }
}

/// Adjustment bounds. Pressure bounds come from the axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsDef {
    pub min_pressure_gap_psia: f64,
    pub critical_margin: f64,
    pub min_superheat_f: f64,
    pub min_subcooling_f: f64,
    pub min_efficiency: f64,
    pub max_efficiency: f64,
}

impl Default for LimitsDef {
    fn default() -> Self {
        Self {
            min_pressure_gap_psia: 5.0,
            critical_margin: 0.98,
            min_superheat_f: 0.1,
            min_subcooling_f: 0.1,
            min_efficiency: 0.1,
            max_efficiency: 1.0,
        }
    }
}

/// Heuristic shift applied by one fault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaultEffectDef {
    pub evaporating_factor: f64,
    pub condensing_factor: f64,
    pub superheat_delta_f: f64,
    pub subcooling_delta_f: f64,
}

impl Default for FaultEffectDef {
    fn default() -> Self {
        Self {
            evaporating_factor: 1.0,
            condensing_factor: 1.0,
            superheat_delta_f: 0.0,
            subcooling_delta_f: 0.0,
        }
    }
}

/// Teaching heuristics, not a physical fault model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaultTableDef {
    pub low_charge: FaultEffectDef,
    pub high_charge: FaultEffectDef,
    pub dirty_condenser: FaultEffectDef,
    pub dirty_evaporator: FaultEffectDef,
}

impl Default for FaultTableDef {
    fn default() -> Self {
        (&ph_cycle::FaultTable::default()).into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxesDef {
    pub h_min_btu_lb: f64,
    pub h_max_btu_lb: f64,
    pub p_min_psia: f64,
    pub p_max_psia: f64,
    pub pressure_ticks_psia: Vec<f64>,
    pub enthalpy_tick_count: usize,
    pub dome_samples: usize,
}

impl Default for AxesDef {
    fn default() -> Self {
        Self {
            h_min_btu_lb: 40.0,
            h_max_btu_lb: 210.0,
            p_min_psia: 10.0,
            p_max_psia: 400.0,
            pressure_ticks_psia: vec![
                10.0, 20.0, 30.0, 50.0, 75.0, 100.0, 150.0, 200.0, 300.0, 400.0,
            ],
            enthalpy_tick_count: 6,
            dome_samples: 80,
        }
    }
}

/// Window geometry [px].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowDef {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub panel_width: f32,
    /// Space between the plot and the info panel
    pub panel_gap: f32,
}

impl Default for WindowDef {
    fn default() -> Self {
        Self {
            width: 1300.0,
            height: 880.0,
            min_width: 950.0,
            min_height: 700.0,
            margin_top: 60.0,
            margin_bottom: 70.0,
            margin_left: 95.0,
            panel_width: 340.0,
            panel_gap: 25.0,
        }
    }
}

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteDef {
    pub background: Rgb,
    pub text: Rgb,
    pub axes: Rgb,
    pub dome: Rgb,
    pub compression: Rgb,
    pub ideal_compression: Rgb,
    pub condensation: Rgb,
    pub expansion: Rgb,
    pub evaporation: Rgb,
    pub title: Rgb,
    pub highlight: Rgb,
    pub error: Rgb,
}

impl Default for PaletteDef {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            text: [255, 255, 255],
            axes: [120, 120, 120],
            dome: [120, 120, 120],
            compression: [255, 60, 60],
            ideal_compression: [200, 0, 200],
            condensation: [255, 165, 0],
            expansion: [100, 100, 255],
            evaporation: [60, 255, 60],
            title: [255, 255, 0],
            highlight: [0, 255, 255],
            error: [255, 60, 60],
        }
    }
}
