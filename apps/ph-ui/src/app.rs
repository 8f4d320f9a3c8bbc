use crate::input::{Action, InputController};
use crate::palette::Palette;
use crate::views::{DiagramView, InfoPanel};
use ph_config::SimulatorConfig;
use ph_cycle::{Command, CycleModel};
use ph_diagram::{CoordinateMapper, DomeSample, PlotLayout, RangePolicy};
use tracing::{debug, info, warn};

/// Error log entries kept for the panel.
const ERROR_HISTORY: usize = 20;

/// Everything that needs a working property backend.
struct Session {
    model: CycleModel,
    mapper: CoordinateMapper,
    diagram: DiagramView,
}

impl Session {
    fn start(config: &SimulatorConfig, layout: &PlotLayout) -> Result<Self, String> {
        let refrigerant = config.refrigerant().map_err(|e| e.to_string())?;
        let model = CycleModel::new(
            config.provider.build(),
            refrigerant,
            config.defaults.to_parameters(),
            config.parameter_limits(),
            config.faults.to_table(),
        )
        .map_err(|e| format!("Cannot start cycle model: {e}"))?;

        let axis = config.axes.to_axis_range().map_err(|e| e.to_string())?;
        let window = &config.window;
        let viewport = layout
            .plot_viewport(f64::from(window.width), f64::from(window.height))
            .map_err(|e| e.to_string())?;
        // Out-of-range points are left off the plot rather than pinned to its edge
        let mapper = CoordinateMapper::new(axis, viewport, RangePolicy::Reject);

        let dome: Vec<DomeSample> = mapper
            .dome_curve(model.provider(), refrigerant, config.axes.dome_samples)
            .map_err(|e| format!("Cannot sample saturation dome: {e}"))?
            .collect();
        info!(
            provider = model.provider().name(),
            %refrigerant,
            dome_samples = dome.len(),
            "simulator ready"
        );

        let diagram = DiagramView::new(
            *layout,
            config.axes.pressure_ticks(),
            config.axes.enthalpy_tick_count,
            dome,
        );
        Ok(Self {
            model,
            mapper,
            diagram,
        })
    }
}

pub struct PhSimulatorApp {
    session: Option<Session>,
    input: InputController,
    palette: Palette,
    layout: PlotLayout,
    info_panel: InfoPanel,
    errors: Vec<String>,
    fullscreen: bool,
}

impl PhSimulatorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SimulatorConfig) -> Self {
        let layout = config.window.to_layout();
        let mut app = Self {
            session: None,
            input: InputController::new(config.steps.to_steps()),
            palette: Palette::from(&config.palette),
            layout,
            info_panel: InfoPanel,
            errors: Vec::new(),
            fullscreen: false,
        };

        match Session::start(&config, &layout) {
            Ok(session) => {
                if let Some(err) = session.model.last_error() {
                    app.push_error(err.to_string());
                }
                app.session = Some(session);
            }
            Err(message) => {
                warn!(%message, "simulator started without a cycle model");
                app.push_error(message);
            }
        }
        app
    }

    fn push_error(&mut self, message: String) {
        self.errors.push(message);
        if self.errors.len() > ERROR_HISTORY {
            self.errors.remove(0);
        }
    }

    fn handle(&mut self, ctx: &egui::Context, action: Action) {
        match action {
            Action::Model(command) => self.apply(command),
            Action::ToggleFullscreen => self.set_fullscreen(ctx, !self.fullscreen),
            Action::Escape => {
                if self.fullscreen {
                    self.set_fullscreen(ctx, false);
                } else {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // The model keeps its previous result on failure
        let outcome = session.model.apply(command).map(|result| result.performance.cop);
        match outcome {
            Ok(cop) => debug!(?command, cop, "cycle updated"),
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, fullscreen: bool) {
        self.fullscreen = fullscreen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
    }
}

impl eframe::App for PhSimulatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for action in self.input.poll(ctx) {
            self.handle(ctx, action);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.palette.background))
            .show(ctx, |ui| match &mut self.session {
                Some(session) => session.diagram.show(
                    ui,
                    &mut session.mapper,
                    session.model.current_result(),
                    &self.palette,
                ),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(self.palette.error, "No property backend available");
                    });
                }
            });

        let screen = ctx.screen_rect();
        let (x, y) = self.layout.panel_origin(f64::from(screen.width()));
        let panel_width = self.layout.panel_width as f32 - 20.0;
        egui::Area::new(egui::Id::new("info_panel"))
            .fixed_pos(egui::pos2(x as f32, y as f32))
            .show(ctx, |ui| {
                ui.set_width(panel_width);
                egui::ScrollArea::vertical()
                    .max_height(screen.height() - y as f32 - 10.0)
                    .show(ui, |ui| {
                        self.info_panel.show(
                            ui,
                            self.session.as_ref().map(|s| &s.model),
                            &self.errors,
                            &self.palette,
                        );
                    });
            });
    }
}
