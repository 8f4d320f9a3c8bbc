//! Keyboard bindings.

use egui::Key;
use ph_cycle::{AdjustmentSteps, Command, Direction, Fault, Knob};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Model(Command),
    ToggleFullscreen,
    /// Leave fullscreen, or quit when windowed
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Binding {
    Step(Knob, Direction),
    Fault(Fault),
    Reset,
    ToggleFullscreen,
    Escape,
}

const BINDINGS: &[(Key, Binding)] = &[
    (Key::ArrowRight, Binding::Step(Knob::EvaporatingPressure, Direction::Up)),
    (Key::ArrowLeft, Binding::Step(Knob::EvaporatingPressure, Direction::Down)),
    (Key::ArrowUp, Binding::Step(Knob::CondensingPressure, Direction::Up)),
    (Key::ArrowDown, Binding::Step(Knob::CondensingPressure, Direction::Down)),
    (Key::S, Binding::Step(Knob::Superheat, Direction::Up)),
    (Key::X, Binding::Step(Knob::Superheat, Direction::Down)),
    (Key::A, Binding::Step(Knob::Subcooling, Direction::Up)),
    (Key::Z, Binding::Step(Knob::Subcooling, Direction::Down)),
    (Key::E, Binding::Step(Knob::Efficiency, Direction::Up)),
    (Key::D, Binding::Step(Knob::Efficiency, Direction::Down)),
    (Key::L, Binding::Fault(Fault::LowCharge)),
    (Key::H, Binding::Fault(Fault::HighCharge)),
    (Key::C, Binding::Fault(Fault::DirtyCondenser)),
    (Key::V, Binding::Fault(Fault::DirtyEvaporator)),
    (Key::N, Binding::Fault(Fault::None)),
    (Key::R, Binding::Reset),
    (Key::F, Binding::ToggleFullscreen),
    (Key::F11, Binding::ToggleFullscreen),
    (Key::Escape, Binding::Escape),
];

/// Key help shown in the info panel, two columns.
pub const HELP: &[&str] = &[
    "[←/→] P_evap -/+",
    "[↓/↑] P_cond -/+",
    "[S/X] Superheat +/-",
    "[A/Z] Subcool +/-",
    "[E/D] Comp Eff +/-",
    "[R] Reset",
    "[L] Low Charge",
    "[H] High Charge",
    "[C] Dirty Cond.",
    "[V] Dirty Evap.",
    "[N] Clear Fault",
    "[F] Fullscreen",
    "[Esc] Exit",
];

/// Turns key presses into model commands using the configured step sizes.
#[derive(Debug, Clone)]
pub struct InputController {
    steps: AdjustmentSteps,
}

impl InputController {
    pub fn new(steps: AdjustmentSteps) -> Self {
        Self { steps }
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        let (_, binding) = BINDINGS.iter().find(|(bound, _)| *bound == key)?;
        Some(match *binding {
            Binding::Step(knob, direction) => Action::Model(self.steps.command(knob, direction)),
            Binding::Fault(fault) => Action::Model(Command::SelectFault(fault)),
            Binding::Reset => Action::Model(Command::Reset),
            Binding::ToggleFullscreen => Action::ToggleFullscreen,
            Binding::Escape => Action::Escape,
        })
    }

    /// Actions for the keys pressed this frame, in binding order.
    pub fn poll(&self, ctx: &egui::Context) -> Vec<Action> {
        let pressed: Vec<Key> = ctx.input(|i| {
            BINDINGS
                .iter()
                .map(|(key, _)| *key)
                .filter(|key| i.key_pressed(*key))
                .collect()
        });
        pressed.into_iter().filter_map(|key| self.action_for(key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::display::{delta_fahrenheit, psia};

    fn controller() -> InputController {
        InputController::new(AdjustmentSteps::default())
    }

    #[test]
    fn arrows_step_pressures() {
        let input = controller();
        assert_eq!(
            input.action_for(Key::ArrowRight),
            Some(Action::Model(Command::AdjustEvaporatingPressure(psia(1.0))))
        );
        assert_eq!(
            input.action_for(Key::ArrowDown),
            Some(Action::Model(Command::AdjustCondensingPressure(psia(-2.0))))
        );
    }

    #[test]
    fn letter_keys_step_offsets_and_efficiency() {
        let input = controller();
        assert_eq!(
            input.action_for(Key::X),
            Some(Action::Model(Command::AdjustSuperheat(delta_fahrenheit(-1.0))))
        );
        assert_eq!(
            input.action_for(Key::A),
            Some(Action::Model(Command::AdjustSubcooling(delta_fahrenheit(1.0))))
        );
        assert_eq!(
            input.action_for(Key::D),
            Some(Action::Model(Command::AdjustEfficiency(-0.01)))
        );
    }

    #[test]
    fn fault_keys_select_faults() {
        let input = controller();
        assert_eq!(
            input.action_for(Key::L),
            Some(Action::Model(Command::SelectFault(Fault::LowCharge)))
        );
        assert_eq!(
            input.action_for(Key::N),
            Some(Action::Model(Command::SelectFault(Fault::None)))
        );
        assert_eq!(input.action_for(Key::R), Some(Action::Model(Command::Reset)));
    }

    #[test]
    fn window_keys_do_not_reach_the_model() {
        let input = controller();
        assert_eq!(input.action_for(Key::F11), Some(Action::ToggleFullscreen));
        assert_eq!(input.action_for(Key::Escape), Some(Action::Escape));
        assert_eq!(input.action_for(Key::Q), None);
    }

    #[test]
    fn every_key_is_bound_once() {
        for (i, (key, _)) in BINDINGS.iter().enumerate() {
            assert!(
                BINDINGS[i + 1..].iter().all(|(other, _)| other != key),
                "{key:?} bound twice"
            );
        }
    }
}
