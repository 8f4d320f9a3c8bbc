//! (pressure, enthalpy) ↔ screen coordinate mapping.

use crate::dome::{DomeCurve, DomeSample};
use crate::error::{DiagramError, DiagramResult};
use crate::ticks::{self, Tick};
use ph_core::numeric::clamp;
use ph_core::units::{Pressure, SpecEnthalpy, pa};
use ph_cycle::{CycleResult, Process, StatePointId};
use ph_fluids::{PropertyProvider, Refrigerant};

/// Diagram bounds in SI: enthalpy [J/kg] horizontally, pressure (log) vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub h_min: SpecEnthalpy,
    pub h_max: SpecEnthalpy,
    pub p_min: Pressure,
    pub p_max: Pressure,
}

impl AxisRange {
    pub fn new(h_min: f64, h_max: f64, p_min: Pressure, p_max: Pressure) -> DiagramResult<Self> {
        let values = [h_min, h_max, p_min.value, p_max.value];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DiagramError::InvalidAxis {
                what: "axis bounds must be finite",
            });
        }
        if h_min >= h_max {
            return Err(DiagramError::InvalidAxis {
                what: "enthalpy minimum must be below maximum",
            });
        }
        if p_min.value <= 0.0 {
            return Err(DiagramError::InvalidAxis {
                what: "pressure minimum must be positive for a log axis",
            });
        }
        if p_min >= p_max {
            return Err(DiagramError::InvalidAxis {
                what: "pressure minimum must be below maximum",
            });
        }
        Ok(Self {
            h_min,
            h_max,
            p_min,
            p_max,
        })
    }

    pub fn contains(&self, pressure: Pressure, enthalpy: f64) -> bool {
        (self.h_min..=self.h_max).contains(&enthalpy)
            && (self.p_min.value..=self.p_max.value).contains(&pressure.value)
    }

    fn log_p_min(&self) -> f64 {
        self.p_min.value.log10()
    }

    fn log_p_max(&self) -> f64 {
        self.p_max.value.log10()
    }
}

/// Pixel rectangle of the plot area. Screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> DiagramResult<Self> {
        let values = [x_min, x_max, y_min, y_max];
        if values.iter().any(|v| !v.is_finite()) || x_min >= x_max || y_min >= y_max {
            return Err(DiagramError::InvalidAxis {
                what: "viewport must have positive finite extent",
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

/// What to do with coordinates outside the axis range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Fail with `OutOfRange`.
    #[default]
    Reject,
    /// Pull the coordinate onto the nearest edge.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// One cycle process in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedSegment {
    pub process: Process,
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

impl MappedSegment {
    pub fn midpoint(&self) -> ScreenPoint {
        ScreenPoint {
            x: 0.5 * (self.from.x + self.to.x),
            y: 0.5 * (self.from.y + self.to.y),
        }
    }
}

/// Linear-enthalpy / log-pressure mapping onto a viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    axis: AxisRange,
    viewport: Viewport,
    policy: RangePolicy,
}

impl CoordinateMapper {
    pub fn new(axis: AxisRange, viewport: Viewport, policy: RangePolicy) -> Self {
        Self {
            axis,
            viewport,
            policy,
        }
    }

    pub fn axis(&self) -> &AxisRange {
        &self.axis
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Replace the viewport after a window resize. The axis range is kept.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Map a state to screen coordinates.
    pub fn to_screen(
        &self,
        pressure: Pressure,
        enthalpy: SpecEnthalpy,
    ) -> DiagramResult<ScreenPoint> {
        if !pressure.value.is_finite() {
            return Err(DiagramError::OutOfRange {
                what: "pressure",
                value: pressure.value,
            });
        }
        if !enthalpy.is_finite() {
            return Err(DiagramError::OutOfRange {
                what: "enthalpy",
                value: enthalpy,
            });
        }

        let (p, h) = match self.policy {
            RangePolicy::Reject => {
                if !(self.axis.p_min.value..=self.axis.p_max.value).contains(&pressure.value) {
                    return Err(DiagramError::OutOfRange {
                        what: "pressure",
                        value: pressure.value,
                    });
                }
                if !(self.axis.h_min..=self.axis.h_max).contains(&enthalpy) {
                    return Err(DiagramError::OutOfRange {
                        what: "enthalpy",
                        value: enthalpy,
                    });
                }
                (pressure.value, enthalpy)
            }
            RangePolicy::Clamp => (
                clamp(pressure.value, self.axis.p_min.value, self.axis.p_max.value),
                clamp(enthalpy, self.axis.h_min, self.axis.h_max),
            ),
        };

        let fx = (h - self.axis.h_min) / (self.axis.h_max - self.axis.h_min);
        let (log_lo, log_hi) = (self.axis.log_p_min(), self.axis.log_p_max());
        let fy = (p.log10() - log_lo) / (log_hi - log_lo);
        Ok(ScreenPoint {
            x: self.viewport.x_min + fx * self.viewport.width(),
            y: self.viewport.y_max - fy * self.viewport.height(),
        })
    }

    /// Inverse of [`CoordinateMapper::to_screen`]: `(pressure, enthalpy)`.
    pub fn from_screen(&self, point: ScreenPoint) -> DiagramResult<(Pressure, SpecEnthalpy)> {
        if !point.x.is_finite() {
            return Err(DiagramError::OutOfRange {
                what: "screen x",
                value: point.x,
            });
        }
        if !point.y.is_finite() {
            return Err(DiagramError::OutOfRange {
                what: "screen y",
                value: point.y,
            });
        }
        let vp = &self.viewport;
        let (x, y) = match self.policy {
            RangePolicy::Reject => {
                if !(vp.x_min..=vp.x_max).contains(&point.x) {
                    return Err(DiagramError::OutOfRange {
                        what: "screen x",
                        value: point.x,
                    });
                }
                if !(vp.y_min..=vp.y_max).contains(&point.y) {
                    return Err(DiagramError::OutOfRange {
                        what: "screen y",
                        value: point.y,
                    });
                }
                (point.x, point.y)
            }
            RangePolicy::Clamp => (
                clamp(point.x, vp.x_min, vp.x_max),
                clamp(point.y, vp.y_min, vp.y_max),
            ),
        };

        let fx = (x - vp.x_min) / vp.width();
        let fy = (vp.y_max - y) / vp.height();
        let h = self.axis.h_min + fx * (self.axis.h_max - self.axis.h_min);
        let (log_lo, log_hi) = (self.axis.log_p_min(), self.axis.log_p_max());
        let p = 10.0_f64.powf(log_lo + fy * (log_hi - log_lo));
        Ok((pa(p), h))
    }

    /// Lazily sample the saturation dome inside this axis range.
    pub fn dome_curve<'a>(
        &self,
        provider: &'a dyn PropertyProvider,
        refrigerant: Refrigerant,
        samples: usize,
    ) -> DiagramResult<DomeCurve<'a>> {
        DomeCurve::new(provider, refrigerant, &self.axis, samples)
    }

    /// Bubble and dew polylines; samples off the axes are left out.
    pub fn dome_polylines(&self, samples: &[DomeSample]) -> (Vec<ScreenPoint>, Vec<ScreenPoint>) {
        let bubble = samples
            .iter()
            .filter_map(|s| self.plot_point(s.pressure, s.bubble_enthalpy))
            .collect();
        let dew = samples
            .iter()
            .filter_map(|s| self.plot_point(s.pressure, s.dew_enthalpy))
            .collect();
        (bubble, dew)
    }

    /// Screen position of every state point that lies on the diagram.
    pub fn map_points(&self, result: &CycleResult) -> Vec<(StatePointId, ScreenPoint)> {
        result
            .points()
            .iter()
            .filter_map(|p| self.plot_point(p.pressure, p.enthalpy).map(|sp| (p.id, sp)))
            .collect()
    }

    /// Cycle segments whose endpoints both lie on the diagram.
    pub fn map_segments(&self, result: &CycleResult) -> Vec<MappedSegment> {
        result
            .segments()
            .filter_map(|(seg, from, to)| {
                Some(MappedSegment {
                    process: seg.process,
                    from: self.plot_point(from.pressure, from.enthalpy)?,
                    to: self.plot_point(to.pressure, to.enthalpy)?,
                })
            })
            .collect()
    }

    /// Ticks evenly spaced along the enthalpy axis, positioned in screen x.
    pub fn enthalpy_ticks(&self, count: usize) -> Vec<Tick> {
        ticks::linear(self.axis.h_min, self.axis.h_max, count)
            .into_iter()
            .filter_map(|h| {
                let point = self.to_screen(self.axis.p_min, h).ok()?;
                Some(Tick {
                    value: h,
                    position: point.x,
                })
            })
            .collect()
    }

    /// The candidate pressures inside the axis range, positioned in screen y.
    pub fn pressure_ticks(&self, candidates: &[Pressure]) -> Vec<Tick> {
        ticks::within(candidates, self.axis.p_min, self.axis.p_max)
            .into_iter()
            .filter_map(|p| {
                let point = self.to_screen(p, self.axis.h_min).ok()?;
                Some(Tick {
                    value: p.value,
                    position: point.y,
                })
            })
            .collect()
    }

    /// Map for drawing: only in-range coordinates, whatever the policy.
    fn plot_point(&self, pressure: Pressure, enthalpy: f64) -> Option<ScreenPoint> {
        if !self.axis.contains(pressure, enthalpy) {
            return None;
        }
        self.to_screen(pressure, enthalpy).ok()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn to_screen_round_trips(
            log_p in 4.001_f64..5.999,
            h in 100_000.0_f64..500_000.0,
        ) {
            let axis = AxisRange::new(100_000.0, 500_000.0, pa(10_000.0), pa(1_000_000.0)).unwrap();
            let viewport = Viewport::new(95.0, 935.0, 60.0, 810.0).unwrap();
            let m = CoordinateMapper::new(axis, viewport, RangePolicy::Reject);
            let p = pa(10.0_f64.powf(log_p));
            let screen = m.to_screen(p, h).unwrap();
            prop_assert!(viewport.contains(screen));
            let (p_back, h_back) = m.from_screen(screen).unwrap();
            prop_assert!((p_back.value - p.value).abs() <= 1e-9 * p.value);
            prop_assert!((h_back - h).abs() <= 1e-6);
        }
    }
}
