use egui::Color32;
use ph_config::{PaletteDef, Rgb};
use ph_cycle::{Process, StatePointId};

/// Configured colors resolved for painting.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub axes: Color32,
    pub dome: Color32,
    pub title: Color32,
    pub highlight: Color32,
    pub error: Color32,
    compression: Color32,
    ideal_compression: Color32,
    condensation: Color32,
    expansion: Color32,
    evaporation: Color32,
}

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

impl From<&PaletteDef> for Palette {
    fn from(def: &PaletteDef) -> Self {
        Self {
            background: color(def.background),
            text: color(def.text),
            axes: color(def.axes),
            dome: color(def.dome),
            title: color(def.title),
            highlight: color(def.highlight),
            error: color(def.error),
            compression: color(def.compression),
            ideal_compression: color(def.ideal_compression),
            condensation: color(def.condensation),
            expansion: color(def.expansion),
            evaporation: color(def.evaporation),
        }
    }
}

impl Palette {
    pub fn process(&self, process: Process) -> Color32 {
        match process {
            Process::IdealCompression => self.ideal_compression,
            Process::Compression => self.compression,
            Process::Condensation => self.condensation,
            Process::Expansion => self.expansion,
            Process::Evaporation => self.evaporation,
        }
    }

    /// Each point takes the color of the process that ends at it.
    pub fn point(&self, id: StatePointId) -> Color32 {
        match id {
            StatePointId::CompressorInlet | StatePointId::EvaporatorOutlet => self.evaporation,
            StatePointId::IsentropicDischarge => self.ideal_compression,
            StatePointId::ActualDischarge => self.compression,
            StatePointId::CondenserOutlet => self.condensation,
            StatePointId::EvaporatorInlet => self.expansion,
        }
    }
}
