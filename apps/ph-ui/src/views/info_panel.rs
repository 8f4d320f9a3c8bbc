use crate::input;
use crate::palette::Palette;
use egui::{Color32, RichText};
use ph_core::units::display::{to_btu_per_lb, to_delta_fahrenheit, to_fahrenheit, to_psia};
use ph_cycle::{CycleModel, CycleResult, Process, StatePointId};

const SECTION_SPACE: f32 = 12.0;
const MAX_ERRORS: usize = 5;

/// Text panel beside the diagram: parameters, performance, states, legend, keys.
#[derive(Default)]
pub struct InfoPanel;

impl InfoPanel {
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        model: Option<&CycleModel>,
        errors: &[String],
        palette: &Palette,
    ) {
        let title = model.map_or_else(
            || "P-h Cycle".to_owned(),
            |m| format!("{} Cycle", m.refrigerant()),
        );
        ui.label(RichText::new(title).size(20.0).strong().color(palette.text));
        ui.add_space(SECTION_SPACE);

        let result = model.and_then(CycleModel::current_result);
        if let Some(model) = model {
            self.parameters(ui, model, result, palette);
        }
        if let Some(result) = result {
            self.performance(ui, result, palette);
            self.states(ui, result, palette);
        }
        self.legend(ui, palette);
        self.controls(ui, palette);
        self.errors(ui, errors, palette);
    }

    fn parameters(
        &self,
        ui: &mut egui::Ui,
        model: &CycleModel,
        result: Option<&CycleResult>,
        palette: &Palette,
    ) {
        section(ui, "Parameters:", palette);
        let params = result.map_or(model.current_parameters(), |r| &r.parameters);
        let (t_evap, t_cond) = result.map_or(("---".to_owned(), "---".to_owned()), |r| {
            (
                format!("{:.1}", to_fahrenheit(r.evaporating_temperature)),
                format!("{:.1}", to_fahrenheit(r.condensing_temperature)),
            )
        });
        let lines = [
            format!("P_evap:    {:6.1} PSIA ({t_evap:>5}°F)", to_psia(params.evaporating_pressure)),
            format!("P_cond:    {:6.1} PSIA ({t_cond:>5}°F)", to_psia(params.condensing_pressure)),
            format!("Superheat: {:6.1} °F", to_delta_fahrenheit(params.superheat)),
            format!("Subcool:   {:6.1} °F", to_delta_fahrenheit(params.subcooling)),
            format!("Comp Eff:  {:6.2}", params.efficiency),
        ];
        for line in lines {
            mono(ui, line, palette.text);
        }
        let fault = model.fault();
        let color = if fault.is_active() { palette.error } else { palette.text };
        mono(ui, format!("Fault:     {}", fault.label()), color);
        mono(ui, format!("Provider:  {}", model.provider().name()), palette.text);
        ui.add_space(SECTION_SPACE);
    }

    fn performance(&self, ui: &mut egui::Ui, result: &CycleResult, palette: &Palette) {
        section(ui, "Performance:", palette);
        let perf = &result.performance;
        let lines = [
            format!("COP:       {:>7.3}", perf.cop),
            format!("Q_evap:    {:>7.1} BTU/lb", to_btu_per_lb(perf.refrigeration_effect)),
            format!("W_comp:    {:>7.1} BTU/lb", to_btu_per_lb(perf.compressor_work)),
            format!("Q_cond:    {:>7.1} BTU/lb", to_btu_per_lb(perf.heat_rejected)),
        ];
        for line in lines {
            mono(ui, line, palette.text);
        }
        ui.add_space(SECTION_SPACE);
    }

    fn states(&self, ui: &mut egui::Ui, result: &CycleResult, palette: &Palette) {
        section(ui, "State Descriptions:", palette);
        for id in [
            StatePointId::CompressorInlet,
            StatePointId::ActualDischarge,
            StatePointId::CondenserOutlet,
            StatePointId::EvaporatorInlet,
        ] {
            let point = result.point(id);
            mono(ui, format!("{}: {}", id.label(), point.phase.label()), palette.text);
        }
        ui.add_space(SECTION_SPACE);

        section(ui, "State Points Data (P, T, h):", palette);
        for id in [
            StatePointId::CompressorInlet,
            StatePointId::ActualDischarge,
            StatePointId::IsentropicDischarge,
            StatePointId::CondenserOutlet,
            StatePointId::EvaporatorInlet,
        ] {
            let point = result.point(id);
            let quality = point.quality.map(|q| format!(", q={q:.2}")).unwrap_or_default();
            let line = format!(
                "{:>2}: P={:<5.1} T={:<5.1} h={:<5.1}{quality}",
                id.label(),
                to_psia(point.pressure),
                to_fahrenheit(point.temperature),
                to_btu_per_lb(point.enthalpy),
            );
            let color = if id.is_reference() { palette.point(id) } else { palette.text };
            ui.label(RichText::new(line).monospace().size(11.0).color(color));
        }
        ui.add_space(SECTION_SPACE);
    }

    fn legend(&self, ui: &mut egui::Ui, palette: &Palette) {
        section(ui, "Legend:", palette);
        let items = [
            (palette.process(Process::Evaporation), "Evap Line/Pt 1"),
            (palette.process(Process::Compression), "Actual Comp/Pt 2"),
            (palette.process(Process::Condensation), "Cond Line/Pt 3"),
            (palette.process(Process::Expansion), "Exp Line/Pt 4"),
            (palette.process(Process::IdealCompression), "Ideal Comp/Pt 2s"),
            (palette.highlight, "Temp/Comp Labels"),
            (palette.dome, "Dome/Axes"),
        ];
        for (color, text) in items {
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 0.0, color);
                ui.label(RichText::new(text).monospace().size(11.0).color(palette.text));
            });
        }
        ui.add_space(SECTION_SPACE);
    }

    fn controls(&self, ui: &mut egui::Ui, palette: &Palette) {
        section(ui, "Controls:", palette);
        let half = input::HELP.len().div_ceil(2);
        ui.columns(2, |columns| {
            for (i, line) in input::HELP.iter().enumerate() {
                let column = &mut columns[usize::from(i >= half)];
                column.label(RichText::new(*line).monospace().size(11.0).color(palette.text));
            }
        });
        ui.add_space(SECTION_SPACE);
    }

    fn errors(&self, ui: &mut egui::Ui, errors: &[String], palette: &Palette) {
        if errors.is_empty() {
            return;
        }
        section_colored(ui, "Errors/Warnings:", palette.error);
        let start = errors.len().saturating_sub(MAX_ERRORS);
        for error in &errors[start..] {
            ui.label(RichText::new(error).monospace().size(11.0).color(palette.error));
        }
    }
}

fn section(ui: &mut egui::Ui, title: &str, palette: &Palette) {
    section_colored(ui, title, palette.title);
}

fn section_colored(ui: &mut egui::Ui, title: &str, color: Color32) {
    ui.label(RichText::new(title).monospace().size(14.0).color(color));
}

fn mono(ui: &mut egui::Ui, text: String, color: Color32) {
    ui.label(RichText::new(text).monospace().size(13.0).color(color));
}
