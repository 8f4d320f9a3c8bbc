// ph-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
pub type SpecEntropy = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn dk(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn pa_of(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn delta_kelvin_of(dt: TempInterval) -> f64 {
    use uom::si::temperature_interval::kelvin;
    dt.get::<kelvin>()
}

/// Display-unit conversion table.
///
/// The core computes in SI. The front ends show the imperial units a
/// refrigeration technician reads off gauges, and convert only here.
///
/// | Quantity            | SI          | Display        | Factor                     |
/// |---------------------|-------------|----------------|----------------------------|
/// | Pressure            | Pa          | psia           | 1 psia = 6894.757 Pa (uom) |
/// | Temperature         | K           | °F             | (K - 273.15) · 9/5 + 32    |
/// | Temperature delta   | K           | °F             | 1 K = 1.8 °F               |
/// | Specific enthalpy   | J/kg        | BTU/lb         | 1 J/kg = 0.000430210 BTU/lb|
/// | Specific entropy    | J/(kg·K)    | BTU/(lb·°R)    | 1 J/(kg·K) = 0.0002390057  |
pub mod display {
    use super::*;

    pub const BTU_PER_LB_PER_J_PER_KG: f64 = 0.000_430_210;
    pub const BTU_PER_LB_R_PER_J_PER_KG_K: f64 = 0.000_239_005_7;

    #[inline]
    pub fn psia(v: f64) -> Pressure {
        use uom::si::pressure::pound_force_per_square_inch;
        Pressure::new::<pound_force_per_square_inch>(v)
    }

    #[inline]
    pub fn to_psia(p: Pressure) -> f64 {
        use uom::si::pressure::pound_force_per_square_inch;
        p.get::<pound_force_per_square_inch>()
    }

    #[inline]
    pub fn fahrenheit(v: f64) -> Temperature {
        use uom::si::thermodynamic_temperature::degree_fahrenheit;
        Temperature::new::<degree_fahrenheit>(v)
    }

    #[inline]
    pub fn to_fahrenheit(t: Temperature) -> f64 {
        use uom::si::thermodynamic_temperature::degree_fahrenheit;
        t.get::<degree_fahrenheit>()
    }

    #[inline]
    pub fn delta_fahrenheit(v: f64) -> TempInterval {
        use uom::si::temperature_interval::degree_fahrenheit;
        TempInterval::new::<degree_fahrenheit>(v)
    }

    #[inline]
    pub fn to_delta_fahrenheit(dt: TempInterval) -> f64 {
        use uom::si::temperature_interval::degree_fahrenheit;
        dt.get::<degree_fahrenheit>()
    }

    #[inline]
    pub fn btu_per_lb(v: f64) -> SpecEnthalpy {
        v / BTU_PER_LB_PER_J_PER_KG
    }

    #[inline]
    pub fn to_btu_per_lb(h: SpecEnthalpy) -> f64 {
        h * BTU_PER_LB_PER_J_PER_KG
    }

    #[inline]
    pub fn to_btu_per_lb_r(s: SpecEntropy) -> f64 {
        s * BTU_PER_LB_R_PER_J_PER_KG_K
    }
}

#[cfg(test)]
mod tests {
    use super::display::*;
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _dt = dk(5.0);
    }

    #[test]
    fn psia_matches_reference_factor() {
        // 14.696 psia is one standard atmosphere
        let p = psia(14.695_95);
        assert!((pa_of(p) - 101_325.0).abs() < 1.0);
        assert!((to_psia(pa(101_325.0)) - 14.695_95).abs() < 1e-3);
    }

    #[test]
    fn fahrenheit_scale_and_interval() {
        assert!((kelvin_of(fahrenheit(32.0)) - 273.15).abs() < 1e-9);
        assert!((to_fahrenheit(k(373.15)) - 212.0).abs() < 1e-9);
        assert!((delta_kelvin_of(delta_fahrenheit(9.0)) - 5.0).abs() < 1e-12);
        assert!((to_delta_fahrenheit(dk(10.0)) - 18.0).abs() < 1e-12);
    }

    #[test]
    fn enthalpy_round_trip() {
        let h = btu_per_lb(100.0);
        assert!((to_btu_per_lb(h) - 100.0).abs() < 1e-9);
    }
}
