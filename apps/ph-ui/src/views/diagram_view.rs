use crate::palette::Palette;
use egui::epaint::TextShape;
use egui::{Align2, FontId, Pos2, Rect, Shape, Stroke};
use ph_core::units::{Pressure, pa};
use ph_core::units::display::{to_btu_per_lb, to_fahrenheit, to_psia};
use ph_cycle::{CycleResult, StatePointId};
use ph_diagram::{
    CoordinateMapper, DiagramResult, DomeSample, MappedSegment, PlotLayout, ScreenPoint, Viewport,
};
use tracing::debug;

const TICK_LENGTH: f32 = 4.0;
const TICK_LABEL_PADDING: f32 = 5.0;
const AXIS_LABEL_PADDING: f32 = 55.0;
const COMPONENT_LABEL_OFFSET: f32 = 15.0;
const POINT_RADIUS: f32 = 5.0;
const POINT_LABEL_OFFSET: f32 = 7.0;
const DASH_LENGTH: f32 = 5.0;

/// Paints axes, dome and cycle onto the central area.
pub struct DiagramView {
    layout: PlotLayout,
    pressure_ticks: Vec<Pressure>,
    enthalpy_tick_count: usize,
    dome: Vec<DomeSample>,
}

impl DiagramView {
    pub fn new(
        layout: PlotLayout,
        pressure_ticks: Vec<Pressure>,
        enthalpy_tick_count: usize,
        dome: Vec<DomeSample>,
    ) -> Self {
        Self {
            layout,
            pressure_ticks,
            enthalpy_tick_count,
            dome,
        }
    }

    /// Fit the mapper to the area the panel was given.
    fn fit(&self, mapper: &mut CoordinateMapper, area: Rect) -> DiagramResult<()> {
        let plot = self
            .layout
            .plot_viewport(f64::from(area.width()), f64::from(area.height()))?;
        let (ox, oy) = (f64::from(area.min.x), f64::from(area.min.y));
        let viewport =
            Viewport::new(plot.x_min + ox, plot.x_max + ox, plot.y_min + oy, plot.y_max + oy)?;
        if mapper.viewport() != &viewport {
            debug!(width = viewport.width(), height = viewport.height(), "plot resized");
            mapper.resize(viewport);
        }
        Ok(())
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        mapper: &mut CoordinateMapper,
        result: Option<&CycleResult>,
        palette: &Palette,
    ) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let area = response.rect;
        painter.rect_filled(area, 0.0, palette.background);

        if let Err(e) = self.fit(mapper, area) {
            painter.text(
                area.center(),
                Align2::CENTER_CENTER,
                format!("Cannot lay out diagram: {e}"),
                FontId::proportional(14.0),
                palette.error,
            );
            return;
        }

        self.draw_axes(&painter, mapper, palette);
        self.draw_dome(&painter, mapper, palette);
        if let Some(result) = result {
            draw_cycle(&painter, mapper, result, palette);
        }
    }

    fn draw_axes(&self, painter: &egui::Painter, mapper: &CoordinateMapper, palette: &Palette) {
        let plot = rect_of(mapper.viewport());
        let stroke = Stroke::new(1.0, palette.axes);
        let tick_font = FontId::monospace(11.0);
        let axis_font = FontId::proportional(15.0);
        painter.rect_stroke(plot, 0.0, stroke);

        for tick in mapper.enthalpy_ticks(self.enthalpy_tick_count) {
            let x = tick.position as f32;
            painter.line_segment(
                [Pos2::new(x, plot.bottom()), Pos2::new(x, plot.bottom() + TICK_LENGTH)],
                stroke,
            );
            painter.text(
                Pos2::new(x, plot.bottom() + TICK_LENGTH + TICK_LABEL_PADDING),
                Align2::CENTER_TOP,
                format!("{:.0}", to_btu_per_lb(tick.value)),
                tick_font.clone(),
                palette.text,
            );
        }
        painter.text(
            Pos2::new(plot.center().x, plot.bottom() + 2.0 * TICK_LABEL_PADDING + 20.0),
            Align2::CENTER_TOP,
            "Specific Enthalpy (BTU/lb)",
            axis_font.clone(),
            palette.text,
        );

        for tick in mapper.pressure_ticks(&self.pressure_ticks) {
            let y = tick.position as f32;
            painter.line_segment(
                [Pos2::new(plot.left() - TICK_LENGTH, y), Pos2::new(plot.left(), y)],
                stroke,
            );
            painter.text(
                Pos2::new(plot.left() - TICK_LENGTH - TICK_LABEL_PADDING, y),
                Align2::RIGHT_CENTER,
                format!("{:.0}", to_psia(pa(tick.value))),
                tick_font.clone(),
                palette.text,
            );
        }

        // Rotated a quarter turn counter-clockwise, anchored at the galley's top-left
        let galley =
            painter.layout_no_wrap("Pressure (PSIA, log)".to_owned(), axis_font, palette.text);
        let anchor = Pos2::new(
            plot.left() - AXIS_LABEL_PADDING - 0.5 * galley.size().y,
            plot.center().y + 0.5 * galley.size().x,
        );
        painter.add(
            TextShape::new(anchor, galley, palette.text).with_angle(-std::f32::consts::FRAC_PI_2),
        );
    }

    fn draw_dome(&self, painter: &egui::Painter, mapper: &CoordinateMapper, palette: &Palette) {
        let (bubble, dew) = mapper.dome_polylines(&self.dome);
        let stroke = Stroke::new(2.0, palette.dome);
        for line in [bubble, dew] {
            if line.len() > 1 {
                painter.add(Shape::line(line.into_iter().map(pos).collect(), stroke));
            }
        }
    }
}

fn draw_cycle(
    painter: &egui::Painter,
    mapper: &CoordinateMapper,
    result: &CycleResult,
    palette: &Palette,
) {
    for segment in mapper.map_segments(result) {
        let color = palette.process(segment.process);
        let (a, b) = (pos(segment.from), pos(segment.to));
        if segment.process.is_reference() {
            let stroke = Stroke::new(1.0, color);
            painter.extend(Shape::dashed_line(&[a, b], stroke, DASH_LENGTH, DASH_LENGTH));
        } else {
            painter.line_segment([a, b], Stroke::new(2.0, color));
            painter.text(
                component_label_position(&segment),
                Align2::CENTER_CENTER,
                segment.process.label(),
                FontId::proportional(13.0),
                palette.highlight,
            );
        }
    }

    let label_font = FontId::monospace(12.0);
    let temp_font = FontId::monospace(11.0);
    for (id, point) in mapper.map_points(result) {
        if id == StatePointId::EvaporatorOutlet {
            continue;
        }
        let center = pos(point);
        let color = palette.point(id);
        painter.circle_filled(center, POINT_RADIUS + 1.0, color);
        painter.circle_filled(center, POINT_RADIUS - 1.0, palette.background);
        painter.circle_filled(center, POINT_RADIUS - 2.0, color);

        let temperature = to_fahrenheit(result.point(id).temperature);
        let (text, text_color) = if id.is_reference() {
            (format!("2s: {temperature:.0}°F"), palette.point(id))
        } else {
            painter.text(
                center + egui::vec2(POINT_LABEL_OFFSET, -POINT_LABEL_OFFSET),
                Align2::LEFT_BOTTOM,
                id.label(),
                label_font.clone(),
                palette.text,
            );
            (format!("{temperature:.0}°F"), palette.highlight)
        };
        painter.text(
            center + egui::vec2(POINT_LABEL_OFFSET, POINT_LABEL_OFFSET),
            Align2::LEFT_TOP,
            text,
            temp_font.clone(),
            text_color,
        );
    }
}

/// Midpoint pushed off the segment along its normal.
fn component_label_position(segment: &MappedSegment) -> Pos2 {
    let mid = pos(segment.midpoint());
    let (from, to) = (pos(segment.from), pos(segment.to));
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let mut offset = egui::vec2(-angle.sin(), angle.cos()) * COMPONENT_LABEL_OFFSET;
    if (from.y - to.y).abs() < 5.0 {
        offset.y *= -1.5;
    }
    if (from.x - to.x).abs() < 5.0 {
        offset.x *= 1.5;
    }
    mid + offset
}

fn pos(point: ScreenPoint) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

fn rect_of(viewport: &Viewport) -> Rect {
    Rect::from_min_max(
        Pos2::new(viewport.x_min as f32, viewport.y_min as f32),
        Pos2::new(viewport.x_max as f32, viewport.y_max as f32),
    )
}
