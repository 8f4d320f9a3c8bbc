//! ph-fluids: refrigerant property lookups for the P-h cycle simulator.
//!
//! Provides:
//! - Refrigerant catalog
//! - `PropertyProvider` trait: (pressure, one other intensive property) -> state
//! - CoolProp backend for real refrigerant properties
//! - A deterministic analytic surrogate for tests and offline use
//!
//! # Architecture
//!
//! This crate defines a stable API (`PropertyProvider` trait) that isolates the
//! cycle model from backend dependencies. CoolProp (via `rfluids`) is the
//! production backend; the surrogate gives closed-form, repeatable values so
//! cycle logic can be tested independently of backend accuracy.
//!
//! # Example
//!
//! ```no_run
//! use ph_fluids::{CoolPropProvider, OtherProperty, PropertyProvider, Refrigerant};
//! use ph_core::units::pa;
//!
//! let provider = CoolPropProvider::new();
//! let sat = provider
//!     .lookup(Refrigerant::R134a, pa(350_000.0), OtherProperty::Quality(1.0))
//!     .unwrap();
//! println!("T_sat = {:.2} K", sat.temperature.value);
//! ```

pub mod coolprop;
pub mod error;
pub mod provider;
pub mod refrigerant;
pub mod surrogate;

// Re-exports for ergonomics
pub use coolprop::CoolPropProvider;
pub use error::{FluidError, FluidResult};
pub use provider::{OtherProperty, PropertyPoint, PropertyProvider, SaturationPair};
pub use refrigerant::Refrigerant;
pub use surrogate::SaturationSurrogate;
