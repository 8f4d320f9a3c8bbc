//! Closed-form refrigerant surrogate.
//!
//! A small analytic property model used wherever repeatable numbers matter more
//! than accuracy: unit tests of the cycle model, offline demos, and machines
//! without the CoolProp native library. It is NOT a replacement for CoolProp;
//! expect errors of a few percent against real R134a tables.
//!
//! The model uses:
//! - **Clausius-Clapeyron saturation line** fitted through two reference points
//! - **Frozen liquid cp**, liquid properties depending on temperature only
//! - **Watson latent heat** vanishing at the critical temperature
//! - **Frozen vapor cp** for superheated vapor, measured from the dew point
//!
//! Enthalpy and entropy are built from the same cp integrals, so `ds = dh / T`
//! holds along every isobar and isentropic/isenthalpic round trips are exact.

use crate::error::{FluidError, FluidResult};
use crate::provider::{OtherProperty, PropertyPoint, PropertyProvider, validation};
use crate::refrigerant::Refrigerant;
use ph_core::units::{Pressure, k, pa};

/// Analytic saturation-line surrogate for a single refrigerant.
#[derive(Debug, Clone)]
pub struct SaturationSurrogate {
    refrigerant: Refrigerant,
    /// Critical pressure [Pa]
    pub p_crit: f64,
    /// Critical temperature [K]
    pub t_crit: f64,
    /// Reference saturation temperature [K]
    pub t_ref: f64,
    /// Saturation pressure at `t_ref` [Pa]
    pub p_ref: f64,
    /// Clausius-Clapeyron slope B in ln(P/P_ref) = B (1/T_ref - 1/T) [K]
    pub clapeyron_b: f64,
    /// Saturated liquid enthalpy at `t_ref` [J/kg]
    pub h_liq_ref: f64,
    /// Saturated liquid entropy at `t_ref` [J/(kg·K)]
    pub s_liq_ref: f64,
    /// Latent heat at `t_ref` [J/kg]
    pub h_fg_ref: f64,
    /// Frozen liquid cp [J/(kg·K)]
    pub cp_liquid: f64,
    /// Frozen vapor cp [J/(kg·K)]
    pub cp_vapor: f64,
}

impl SaturationSurrogate {
    /// Watson correlation exponent.
    const WATSON_EXPONENT: f64 = 0.38;

    /// R134a fit: saturation through 0 °C / 292.8 kPa and 40 °C / 1016.6 kPa,
    /// IIR reference state (h = 200 kJ/kg, s = 1 kJ/(kg·K) for liquid at 0 °C).
    pub fn r134a() -> Self {
        let t_ref: f64 = 273.15;
        let p_ref: f64 = 292_800.0;
        let t_2: f64 = 313.15;
        let p_2: f64 = 1_016_600.0;
        let clapeyron_b = (p_2 / p_ref).ln() / (1.0 / t_ref - 1.0 / t_2);
        Self {
            refrigerant: Refrigerant::R134a,
            p_crit: 4_059_300.0,
            t_crit: 374.21,
            t_ref,
            p_ref,
            clapeyron_b,
            h_liq_ref: 200_000.0,
            s_liq_ref: 1_000.0,
            h_fg_ref: 198_600.0,
            cp_liquid: 1_400.0,
            cp_vapor: 1_000.0,
        }
    }

    /// Saturation temperature [K] at pressure [Pa].
    pub fn saturation_temperature(&self, p_pa: f64) -> f64 {
        1.0 / (1.0 / self.t_ref - (p_pa / self.p_ref).ln() / self.clapeyron_b)
    }

    fn h_liquid(&self, t_k: f64) -> f64 {
        self.h_liq_ref + self.cp_liquid * (t_k - self.t_ref)
    }

    fn s_liquid(&self, t_k: f64) -> f64 {
        self.s_liq_ref + self.cp_liquid * (t_k / self.t_ref).ln()
    }

    fn latent_heat(&self, t_k: f64) -> f64 {
        let reduced = ((self.t_crit - t_k) / (self.t_crit - self.t_ref)).max(0.0);
        self.h_fg_ref * reduced.powf(Self::WATSON_EXPONENT)
    }

    fn point(&self, p_pa: f64, t_k: f64, h: f64, s: f64, quality: Option<f64>) -> PropertyPoint {
        PropertyPoint {
            pressure: pa(p_pa),
            temperature: k(t_k),
            enthalpy: h,
            entropy: s,
            quality,
        }
    }

    fn resolve(&self, p_pa: f64, other: OtherProperty) -> FluidResult<PropertyPoint> {
        let t_sat = self.saturation_temperature(p_pa);
        let h_f = self.h_liquid(t_sat);
        let s_f = self.s_liquid(t_sat);
        let h_fg = self.latent_heat(t_sat);
        let s_fg = h_fg / t_sat;
        let h_g = h_f + h_fg;
        let s_g = s_f + s_fg;

        let point = match other {
            OtherProperty::Quality(q) => {
                self.point(p_pa, t_sat, h_f + q * h_fg, s_f + q * s_fg, Some(q))
            }
            OtherProperty::Temperature(t) => {
                let t_k = t.value;
                if t_k < t_sat {
                    self.point(p_pa, t_k, self.h_liquid(t_k), self.s_liquid(t_k), None)
                } else if t_k > t_sat {
                    let h = h_g + self.cp_vapor * (t_k - t_sat);
                    let s = s_g + self.cp_vapor * (t_k / t_sat).ln();
                    self.point(p_pa, t_k, h, s, None)
                } else {
                    return Err(FluidError::InvalidArg {
                        what: "temperature equals saturation temperature; specify quality",
                    });
                }
            }
            OtherProperty::Entropy(s) => {
                if s < s_f {
                    let t_k = self.t_ref * ((s - self.s_liq_ref) / self.cp_liquid).exp();
                    self.point(p_pa, t_k, self.h_liquid(t_k), s, None)
                } else if s <= s_g {
                    let q = if s_fg > 0.0 { (s - s_f) / s_fg } else { 0.0 };
                    self.point(p_pa, t_sat, h_f + q * h_fg, s, Some(q))
                } else {
                    let t_k = t_sat * ((s - s_g) / self.cp_vapor).exp();
                    self.point(p_pa, t_k, h_g + self.cp_vapor * (t_k - t_sat), s, None)
                }
            }
            OtherProperty::Enthalpy(h) => {
                if h < h_f {
                    let t_k = self.t_ref + (h - self.h_liq_ref) / self.cp_liquid;
                    if t_k <= 0.0 {
                        return Err(FluidError::OutOfRange {
                            what: "enthalpy below the liquid range at this pressure",
                        });
                    }
                    self.point(p_pa, t_k, h, self.s_liquid(t_k), None)
                } else if h <= h_g {
                    let q = if h_fg > 0.0 { (h - h_f) / h_fg } else { 0.0 };
                    self.point(p_pa, t_sat, h, s_f + q * s_fg, Some(q))
                } else {
                    let t_k = t_sat + (h - h_g) / self.cp_vapor;
                    self.point(p_pa, t_k, h, s_g + self.cp_vapor * (t_k / t_sat).ln(), None)
                }
            }
        };
        Ok(point)
    }
}

impl PropertyProvider for SaturationSurrogate {
    fn name(&self) -> &str {
        "Surrogate"
    }

    fn supports(&self, refrigerant: Refrigerant) -> bool {
        refrigerant == self.refrigerant
    }

    fn critical_pressure(&self, refrigerant: Refrigerant) -> FluidResult<Pressure> {
        if !self.supports(refrigerant) {
            return Err(FluidError::NotSupported {
                what: "refrigerant not carried by this surrogate",
            });
        }
        Ok(pa(self.p_crit))
    }

    fn lookup(
        &self,
        refrigerant: Refrigerant,
        pressure: Pressure,
        other: OtherProperty,
    ) -> FluidResult<PropertyPoint> {
        if !self.supports(refrigerant) {
            return Err(FluidError::NotSupported {
                what: "refrigerant not carried by this surrogate",
            });
        }
        validation::validate_pressure(pressure)?;
        validation::validate_other(other)?;
        if pressure.value >= self.p_crit {
            return Err(FluidError::OutOfRange {
                what: "pressure at or above critical pressure",
            });
        }

        let point = self.resolve(pressure.value, other)?;
        validation::validate_point(&point)?;
        Ok(point)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn entropy_rises_with_enthalpy_on_isobar(
            p in 50_000.0_f64..3_500_000.0,
            h_a in 150_000.0_f64..480_000.0,
            dh in 1.0_f64..50_000.0,
        ) {
            let surr = SaturationSurrogate::r134a();
            let a = surr.lookup(Refrigerant::R134a, pa(p), OtherProperty::Enthalpy(h_a)).unwrap();
            let b = surr
                .lookup(Refrigerant::R134a, pa(p), OtherProperty::Enthalpy(h_a + dh))
                .unwrap();
            prop_assert!(b.entropy > a.entropy);
        }
    }
}
