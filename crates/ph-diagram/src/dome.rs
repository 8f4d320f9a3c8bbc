//! Saturation dome sampling.

use crate::error::{DiagramError, DiagramResult};
use crate::mapper::AxisRange;
use ph_core::numeric::log_space;
use ph_core::units::{Pressure, SpecEnthalpy, pa};
use ph_fluids::{OtherProperty, PropertyProvider, Refrigerant};
use std::vec;
use tracing::warn;

/// Default number of log-spaced dome samples.
pub const DEFAULT_SAMPLES: usize = 80;
/// Lowest sampled pressure regardless of the axis [Pa].
pub const MIN_SAMPLE_PRESSURE: f64 = 1_000.0;
/// Sampling stops this fraction short of the critical pressure.
pub const CRITICAL_APPROACH: f64 = 0.999;
/// The critical point is appended once sampling reaches this fraction of it.
pub const CRITICAL_CLOSURE: f64 = 0.9;

/// Bubble (Q=0) and dew (Q=1) enthalpies at one pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomeSample {
    pub pressure: Pressure,
    pub bubble_enthalpy: SpecEnthalpy,
    pub dew_enthalpy: SpecEnthalpy,
}

/// Lazy sequence of dome samples from low to high pressure.
///
/// Samples whose lookup fails are skipped. When the axis reaches near the
/// critical point the sequence ends on the critical point itself.
pub struct DomeCurve<'a> {
    provider: &'a dyn PropertyProvider,
    refrigerant: Refrigerant,
    pressures: vec::IntoIter<f64>,
    closing: Option<Pressure>,
}

impl<'a> DomeCurve<'a> {
    pub fn new(
        provider: &'a dyn PropertyProvider,
        refrigerant: Refrigerant,
        axis: &AxisRange,
        samples: usize,
    ) -> DiagramResult<Self> {
        let critical = provider.critical_pressure(refrigerant)?;
        let start = axis.p_min.value.max(MIN_SAMPLE_PRESSURE);
        let end = axis.p_max.value.min(critical.value * CRITICAL_APPROACH);
        if start >= end {
            return Err(DiagramError::InvalidAxis {
                what: "pressure range does not cross the dome",
            });
        }

        let reaches_critical = end > critical.value * CRITICAL_CLOSURE
            && (axis.p_min.value..=axis.p_max.value).contains(&critical.value);
        Ok(Self {
            provider,
            refrigerant,
            pressures: log_space(start, end, samples).into_iter(),
            closing: reaches_critical.then_some(critical),
        })
    }

    fn sample(&self, p: f64) -> Option<DomeSample> {
        let pressure = pa(p);
        let bubble = self
            .provider
            .lookup(self.refrigerant, pressure, OtherProperty::Quality(0.0));
        let dew = self
            .provider
            .lookup(self.refrigerant, pressure, OtherProperty::Quality(1.0));
        match (bubble, dew) {
            (Ok(bubble), Ok(dew)) => Some(DomeSample {
                pressure,
                bubble_enthalpy: bubble.enthalpy,
                dew_enthalpy: dew.enthalpy,
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!(p_pa = p, error = %e, "skipping dome sample");
                None
            }
        }
    }

    fn critical_sample(&self, critical: Pressure) -> Option<DomeSample> {
        match self
            .provider
            .lookup(self.refrigerant, critical, OtherProperty::Quality(0.5))
        {
            Ok(point) => Some(DomeSample {
                pressure: critical,
                bubble_enthalpy: point.enthalpy,
                dew_enthalpy: point.enthalpy,
            }),
            Err(e) => {
                warn!(error = %e, "critical point not available; dome left open");
                None
            }
        }
    }
}

impl Iterator for DomeCurve<'_> {
    type Item = DomeSample;

    fn next(&mut self) -> Option<DomeSample> {
        while let Some(p) = self.pressures.next() {
            if let Some(sample) = self.sample(p) {
                return Some(sample);
            }
        }
        let critical = self.closing.take()?;
        self.critical_sample(critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::display::psia;
    use ph_fluids::SaturationSurrogate;

    fn classroom_axis() -> AxisRange {
        AxisRange::new(93_000.0, 488_000.0, psia(10.0), psia(400.0)).unwrap()
    }

    #[test]
    fn samples_are_ordered_and_inside_dome() {
        let surr = SaturationSurrogate::r134a();
        let samples: Vec<_> =
            DomeCurve::new(&surr, Refrigerant::R134a, &classroom_axis(), DEFAULT_SAMPLES)
                .unwrap()
                .collect();
        assert_eq!(samples.len(), DEFAULT_SAMPLES);
        assert!(samples.windows(2).all(|w| w[0].pressure < w[1].pressure));
        assert!(samples.iter().all(|s| s.bubble_enthalpy < s.dew_enthalpy));
    }

    #[test]
    fn near_critical_axis_tries_to_close_the_dome() {
        let surr = SaturationSurrogate::r134a();
        let axis = AxisRange::new(93_000.0, 488_000.0, psia(10.0), psia(700.0)).unwrap();
        let curve = DomeCurve::new(&surr, Refrigerant::R134a, &axis, 20).unwrap();
        assert!(curve.closing.is_some());
        // The surrogate has no state at the critical point, so the dome stays open
        assert_eq!(curve.count(), 20);
    }

    #[test]
    fn axis_above_critical_is_rejected() {
        let surr = SaturationSurrogate::r134a();
        let axis = AxisRange::new(93_000.0, 488_000.0, pa(4.5e6), pa(6.0e6)).unwrap();
        assert!(matches!(
            DomeCurve::new(&surr, Refrigerant::R134a, &axis, 10),
            Err(DiagramError::InvalidAxis { .. })
        ));
    }
}
