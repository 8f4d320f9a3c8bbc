//! ph-cycle: vapor-compression refrigeration cycle model.
//!
//! Given evaporating/condensing pressures, superheat, subcooling and
//! compressor isentropic efficiency, computes the five state points of the
//! simple cycle (1, 2s, 2, 3, 4) and the per-unit-mass performance figures.
//!
//! # Architecture
//!
//! - [`compute_cycle`] is a pure function of (provider, refrigerant,
//!   parameters, fault, fault table, limits).
//! - [`CycleModel`] owns the mutable pieces (base parameters, selected fault,
//!   last good result) and turns [`Command`]s into clamped parameter changes
//!   followed by one recompute.
//! - Faults never touch the base parameters; [`fault::adjust`] derives the
//!   effective set every time.

pub mod command;
pub mod cycle;
pub mod error;
pub mod fault;
pub mod model;
pub mod params;
pub mod performance;
pub mod state_point;

pub use command::{AdjustmentSteps, Command, Direction, Knob};
pub use cycle::{CycleResult, PROCESS_SEGMENTS, Process, ProcessSegment, compute_cycle};
pub use error::{CycleError, LookupContext, ModelResult};
pub use fault::{Fault, FaultEffect, FaultTable};
pub use model::CycleModel;
pub use params::{CycleParameters, ParameterLimits, PressureEnvelope};
pub use performance::Performance;
pub use state_point::{Phase, StatePoint, StatePointId};
