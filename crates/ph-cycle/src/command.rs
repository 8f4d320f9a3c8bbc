//! Control commands accepted by the cycle model.

use crate::fault::Fault;
use ph_core::units::display::{delta_fahrenheit, psia};
use ph_core::units::{Pressure, TempInterval};

/// A discrete user action. Every command triggers exactly one recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    AdjustEvaporatingPressure(Pressure),
    AdjustCondensingPressure(Pressure),
    AdjustSuperheat(TempInterval),
    AdjustSubcooling(TempInterval),
    AdjustEfficiency(f64),
    SelectFault(Fault),
    /// Restore default parameters and clear the fault.
    Reset,
}

/// An adjustable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Knob {
    EvaporatingPressure,
    CondensingPressure,
    Superheat,
    Subcooling,
    Efficiency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn sign(&self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Step size per knob for one key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentSteps {
    pub evaporating_pressure: Pressure,
    pub condensing_pressure: Pressure,
    pub superheat: TempInterval,
    pub subcooling: TempInterval,
    pub efficiency: f64,
}

impl Default for AdjustmentSteps {
    fn default() -> Self {
        Self {
            evaporating_pressure: psia(1.0),
            condensing_pressure: psia(2.0),
            superheat: delta_fahrenheit(1.0),
            subcooling: delta_fahrenheit(1.0),
            efficiency: 0.01,
        }
    }
}

impl AdjustmentSteps {
    /// The command that moves `knob` one step in `direction`.
    pub fn command(&self, knob: Knob, direction: Direction) -> Command {
        let sign = direction.sign();
        match knob {
            Knob::EvaporatingPressure => {
                Command::AdjustEvaporatingPressure(self.evaporating_pressure * sign)
            }
            Knob::CondensingPressure => {
                Command::AdjustCondensingPressure(self.condensing_pressure * sign)
            }
            Knob::Superheat => Command::AdjustSuperheat(self.superheat * sign),
            Knob::Subcooling => Command::AdjustSubcooling(self.subcooling * sign),
            Knob::Efficiency => Command::AdjustEfficiency(self.efficiency * sign),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::display::to_psia;

    #[test]
    fn down_step_is_negative() {
        let steps = AdjustmentSteps::default();
        match steps.command(Knob::CondensingPressure, Direction::Down) {
            Command::AdjustCondensingPressure(dp) => assert!((to_psia(dp) + 2.0).abs() < 1e-9),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(
            steps.command(Knob::Efficiency, Direction::Up),
            Command::AdjustEfficiency(0.01)
        );
    }
}
