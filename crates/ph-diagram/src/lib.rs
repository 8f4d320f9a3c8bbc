//! ph-diagram: P-h diagram geometry.
//!
//! Maps (pressure, enthalpy) onto a pixel viewport with a log-pressure
//! vertical axis and a linear enthalpy horizontal axis, lays the plot out in a
//! window, picks axis ticks and samples the saturation dome. Nothing here
//! draws; front ends take the screen coordinates and paint them.

pub mod dome;
pub mod error;
pub mod layout;
pub mod mapper;
pub mod ticks;

pub use dome::{DomeCurve, DomeSample};
pub use error::{DiagramError, DiagramResult};
pub use layout::{Margins, PlotLayout};
pub use mapper::{AxisRange, CoordinateMapper, MappedSegment, RangePolicy, ScreenPoint, Viewport};
pub use ticks::Tick;
