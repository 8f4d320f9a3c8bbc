//! Axis tick selection.

use ph_core::units::Pressure;

/// A tick: axis value in SI and its screen coordinate along that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
}

/// `count` evenly spaced values from `min` to `max`, both included.
pub fn linear(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        n => {
            let step = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

/// Candidates inside `[min, max]`, in ascending order.
pub fn within(candidates: &[Pressure], min: Pressure, max: Pressure) -> Vec<Pressure> {
    let mut kept: Vec<Pressure> = candidates
        .iter()
        .copied()
        .filter(|p| *p >= min && *p <= max)
        .collect();
    kept.sort_by(|a, b| a.value.total_cmp(&b.value));
    kept
}
