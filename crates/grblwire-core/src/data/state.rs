//! Machine state and coordinate mode tags carried by status reports

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine state reported in the first field of a status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MachineState {
    /// Ready, no motion
    Idle,
    /// Executing motion
    Run,
    /// Feed hold in progress or complete
    Hold,
    /// Jogging
    Jog,
    /// Alarm lock active
    Alarm,
    /// Safety door open
    Door,
    /// Check G-code mode
    Check,
    /// Homing cycle
    Home,
    /// Sleep mode
    Sleep,
    /// Token did not match any known state
    #[default]
    Unknown,
}

impl MachineState {
    /// Wire names, in declaration order
    const NAMES: [(&'static str, MachineState); 9] = [
        ("Idle", MachineState::Idle),
        ("Run", MachineState::Run),
        ("Hold", MachineState::Hold),
        ("Jog", MachineState::Jog),
        ("Alarm", MachineState::Alarm),
        ("Door", MachineState::Door),
        ("Check", MachineState::Check),
        ("Home", MachineState::Home),
        ("Sleep", MachineState::Sleep),
    ];

    /// Resolve a wire token; exact, case-sensitive match
    pub fn from_token(token: &str) -> MachineState {
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, state)| *state)
            .unwrap_or(MachineState::Unknown)
    }

    /// Wire token for this state, `None` for `Unknown`
    pub fn token(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(_, state)| *state == self)
            .map(|(name, _)| *name)
    }

    pub fn is_idle(self) -> bool {
        self == MachineState::Idle
    }

    pub fn is_running(self) -> bool {
        matches!(self, MachineState::Run | MachineState::Jog | MachineState::Home)
    }

    /// Alarm, door and check states need operator attention
    pub fn is_fault(self) -> bool {
        matches!(self, MachineState::Alarm | MachineState::Door | MachineState::Check)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token().unwrap_or("Unknown"))
    }
}

/// Frame a reported position list is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoordinateMode {
    /// `MPos`
    Machine,
    /// `WPos`
    Work,
    /// `WCO`
    WorkCoordinateOffset,
    /// Token did not match any known mode
    #[default]
    Unknown,
}

impl CoordinateMode {
    /// Resolve a wire token (`MPos`, `WPos`, `WCO`)
    pub fn from_token(token: &str) -> CoordinateMode {
        match token {
            "MPos" => CoordinateMode::Machine,
            "WPos" => CoordinateMode::Work,
            "WCO" => CoordinateMode::WorkCoordinateOffset,
            _ => CoordinateMode::Unknown,
        }
    }

    /// Wire token for this mode, `None` for `Unknown`
    pub fn token(self) -> Option<&'static str> {
        match self {
            CoordinateMode::Machine => Some("MPos"),
            CoordinateMode::Work => Some("WPos"),
            CoordinateMode::WorkCoordinateOffset => Some("WCO"),
            CoordinateMode::Unknown => None,
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token().unwrap_or("Unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_state_parse() {
        assert_eq!(MachineState::from_token("Idle"), MachineState::Idle);
        assert_eq!(MachineState::from_token("Run"), MachineState::Run);
        assert_eq!(MachineState::from_token("Sleep"), MachineState::Sleep);
        assert_eq!(MachineState::from_token("idle"), MachineState::Unknown);
        assert_eq!(MachineState::from_token("Foo"), MachineState::Unknown);
        assert_eq!(MachineState::Unknown.token(), None);
    }

    #[test]
    fn test_state_round_trip_names() {
        for (name, state) in MachineState::NAMES {
            assert_eq!(state.token(), Some(name));
        }
    }

    #[test]
    fn test_coordinate_mode_parse() {
        assert_eq!(CoordinateMode::from_token("MPos"), CoordinateMode::Machine);
        assert_eq!(CoordinateMode::from_token("WPos"), CoordinateMode::Work);
        assert_eq!(
            CoordinateMode::from_token("WCO"),
            CoordinateMode::WorkCoordinateOffset
        );
        assert_eq!(CoordinateMode::from_token("Pos"), CoordinateMode::Unknown);
    }
}
