//! Window layout: plot viewport and side panel placement.

use crate::error::DiagramResult;
use crate::mapper::Viewport;

/// Smallest plot extent in either direction [px].
pub const MIN_PLOT_EXTENT: f64 = 50.0;

/// Space around the plot area [px].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    /// Includes the info panel width
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 60.0,
            bottom: 70.0,
            left: 95.0,
            right: 340.0 + 25.0,
        }
    }
}

/// Plot and info-panel geometry for one window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub margins: Margins,
    pub panel_width: f64,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            panel_width: 340.0,
        }
    }
}

impl PlotLayout {
    /// Plot rectangle for a `width` × `height` window.
    pub fn plot_viewport(&self, width: f64, height: f64) -> DiagramResult<Viewport> {
        let m = &self.margins;
        let plot_width = (width - m.left - m.right).max(MIN_PLOT_EXTENT);
        let plot_height = (height - m.top - m.bottom).max(MIN_PLOT_EXTENT);
        Viewport::new(m.left, m.left + plot_width, m.top, m.top + plot_height)
    }

    /// Top-left corner of the info panel.
    pub fn panel_origin(&self, width: f64) -> (f64, f64) {
        (width - self.panel_width + 10.0, self.margins.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_layout() {
        let vp = PlotLayout::default().plot_viewport(1300.0, 880.0).unwrap();
        assert_eq!(vp.x_min, 95.0);
        assert_eq!(vp.width(), 1300.0 - 95.0 - 365.0);
        assert_eq!(vp.height(), 880.0 - 60.0 - 70.0);
    }

    #[test]
    fn tiny_window_keeps_minimum_plot() {
        let vp = PlotLayout::default().plot_viewport(200.0, 100.0).unwrap();
        assert_eq!(vp.width(), MIN_PLOT_EXTENT);
        assert_eq!(vp.height(), MIN_PLOT_EXTENT);
    }

    #[test]
    fn panel_sits_right_of_plot() {
        let layout = PlotLayout::default();
        let (x, y) = layout.panel_origin(1300.0);
        assert_eq!((x, y), (970.0, 60.0));
        let vp = layout.plot_viewport(1300.0, 880.0).unwrap();
        assert!(x > vp.x_max);
    }
}
