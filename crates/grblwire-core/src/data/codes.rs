//! GRBL alarm and error codes
//!
//! Converts the numeric codes carried by `ALARM:n` and `error:n` lines into
//! closed enums with human-readable descriptions. Numbering follows GRBL 1.1,
//! which leaves gaps (there are no error codes 18 and 19).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alarm raised by the controller (`ALARM:n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alarm {
    HardLimit = 1,
    SoftLimit = 2,
    AbortCycle = 3,
    ProbeFailInitial = 4,
    ProbeFailContact = 5,
    HomingFailReset = 6,
    HomingFailDoor = 7,
    HomingFailPulloff = 8,
    HomingFailApproach = 9,
}

impl Alarm {
    /// Look up an alarm by its wire code
    pub fn from_code(code: u8) -> Option<Self> {
        let alarm = match code {
            1 => Alarm::HardLimit,
            2 => Alarm::SoftLimit,
            3 => Alarm::AbortCycle,
            4 => Alarm::ProbeFailInitial,
            5 => Alarm::ProbeFailContact,
            6 => Alarm::HomingFailReset,
            7 => Alarm::HomingFailDoor,
            8 => Alarm::HomingFailPulloff,
            9 => Alarm::HomingFailApproach,
            _ => return None,
        };
        Some(alarm)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            Alarm::HardLimit => "Hard limit triggered. Machine position is likely lost due to sudden and immediate halt. Re-homing is highly recommended.",
            Alarm::SoftLimit => "Soft limit: G-code motion target exceeds machine travel. Machine position safely retained. Alarm may be unlocked.",
            Alarm::AbortCycle => "Reset while in motion. Grbl cannot guarantee position. Lost steps are likely. Re-homing is highly recommended.",
            Alarm::ProbeFailInitial => "Probe fail. The probe is not in the expected initial state before starting probe cycle.",
            Alarm::ProbeFailContact => "Probe fail. Probe did not contact the workpiece within the programmed travel for G38.2 and G38.4.",
            Alarm::HomingFailReset => "Homing fail. Reset during active homing cycle.",
            Alarm::HomingFailDoor => {
                "Homing fail. Safety door was opened during active homing cycle."
            }
            Alarm::HomingFailPulloff => {
                "Homing fail. Cycle failed to clear limit switch when pulling off."
            }
            Alarm::HomingFailApproach => {
                "Homing fail. Could not find limit switch within search distance."
            }
        }
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALARM:{} - {}", self.code(), self.description())
    }
}

/// Error returned in place of `ok` when a line is rejected (`error:n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    ExpectedCommandLetter = 1,
    BadNumberFormat = 2,
    InvalidStatement = 3,
    NegativeValue = 4,
    SettingDisabled = 5,
    SettingStepPulseMin = 6,
    SettingReadFail = 7,
    IdleError = 8,
    SystemGcLock = 9,
    SoftLimitError = 10,
    Overflow = 11,
    MaxStepRateExceeded = 12,
    CheckDoor = 13,
    LineLengthExceeded = 14,
    TravelExceeded = 15,
    InvalidJogCommand = 16,
    SettingDisabledLaser = 17,
    GcodeUnsupportedCommand = 20,
    GcodeModalGroupViolation = 21,
    GcodeUndefinedFeedRate = 22,
    GcodeCommandValueNotInteger = 23,
    GcodeAxisCommandConflict = 24,
    GcodeWordRepeated = 25,
    GcodeNoAxisWords = 26,
    GcodeInvalidLineNumber = 27,
    GcodeValueWordMissing = 28,
    GcodeUnsupportedCoordSys = 29,
    GcodeG53InvalidMotionMode = 30,
    GcodeAxisWordsExist = 31,
    GcodeNoAxisWordsInPlane = 32,
    GcodeInvalidTarget = 33,
    GcodeArcRadiusError = 34,
    GcodeNoOffsetsInPlane = 35,
    GcodeUnusedWords = 36,
    GcodeG43DynamicAxisError = 37,
    GcodeMaxValueExceeded = 38,
}

impl ErrorCode {
    const ALL: [ErrorCode; 36] = [
        ErrorCode::ExpectedCommandLetter,
        ErrorCode::BadNumberFormat,
        ErrorCode::InvalidStatement,
        ErrorCode::NegativeValue,
        ErrorCode::SettingDisabled,
        ErrorCode::SettingStepPulseMin,
        ErrorCode::SettingReadFail,
        ErrorCode::IdleError,
        ErrorCode::SystemGcLock,
        ErrorCode::SoftLimitError,
        ErrorCode::Overflow,
        ErrorCode::MaxStepRateExceeded,
        ErrorCode::CheckDoor,
        ErrorCode::LineLengthExceeded,
        ErrorCode::TravelExceeded,
        ErrorCode::InvalidJogCommand,
        ErrorCode::SettingDisabledLaser,
        ErrorCode::GcodeUnsupportedCommand,
        ErrorCode::GcodeModalGroupViolation,
        ErrorCode::GcodeUndefinedFeedRate,
        ErrorCode::GcodeCommandValueNotInteger,
        ErrorCode::GcodeAxisCommandConflict,
        ErrorCode::GcodeWordRepeated,
        ErrorCode::GcodeNoAxisWords,
        ErrorCode::GcodeInvalidLineNumber,
        ErrorCode::GcodeValueWordMissing,
        ErrorCode::GcodeUnsupportedCoordSys,
        ErrorCode::GcodeG53InvalidMotionMode,
        ErrorCode::GcodeAxisWordsExist,
        ErrorCode::GcodeNoAxisWordsInPlane,
        ErrorCode::GcodeInvalidTarget,
        ErrorCode::GcodeArcRadiusError,
        ErrorCode::GcodeNoOffsetsInPlane,
        ErrorCode::GcodeUnusedWords,
        ErrorCode::GcodeG43DynamicAxisError,
        ErrorCode::GcodeMaxValueExceeded,
    ];

    /// Look up an error by its wire code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::ExpectedCommandLetter => {
                "G-code words consist of a letter and a value. Letter was not found."
            }
            ErrorCode::BadNumberFormat => {
                "Numeric value format is not valid or missing an expected value."
            }
            ErrorCode::InvalidStatement => {
                "Grbl '$' system command was not recognized or supported."
            }
            ErrorCode::NegativeValue => "Negative value received for an expected positive value.",
            ErrorCode::SettingDisabled => "Homing cycle is not enabled via settings.",
            ErrorCode::SettingStepPulseMin => "Minimum step pulse time must be greater than 3usec.",
            ErrorCode::SettingReadFail => {
                "EEPROM read failed. Reset and restored to default values."
            }
            ErrorCode::IdleError => "Grbl '$' command cannot be used unless Grbl is IDLE.",
            ErrorCode::SystemGcLock => "G-code locked out during alarm or jog state.",
            ErrorCode::SoftLimitError => {
                "Soft limits cannot be enabled without homing also enabled."
            }
            ErrorCode::Overflow => {
                "Max characters per line exceeded. Line was not processed and executed."
            }
            ErrorCode::MaxStepRateExceeded => {
                "Grbl '$' setting value exceeds the maximum step rate supported."
            }
            ErrorCode::CheckDoor => "Safety door detected as opened and door state initiated.",
            ErrorCode::LineLengthExceeded => {
                "Build info or startup line exceeded EEPROM line length limit."
            }
            ErrorCode::TravelExceeded => "Jog target exceeds machine travel. Command ignored.",
            ErrorCode::InvalidJogCommand => {
                "Jog command with no '=' or contains prohibited g-code."
            }
            ErrorCode::SettingDisabledLaser => "Laser mode requires PWM output.",
            ErrorCode::GcodeUnsupportedCommand => {
                "Unsupported or invalid g-code command found in block."
            }
            ErrorCode::GcodeModalGroupViolation => {
                "More than one g-code command from same modal group found in block."
            }
            ErrorCode::GcodeUndefinedFeedRate => "Feed rate has not yet been set or is undefined.",
            ErrorCode::GcodeCommandValueNotInteger => {
                "G-code command in block requires an integer value."
            }
            ErrorCode::GcodeAxisCommandConflict => "Two G-code commands that both require the use of the XYZ axis words were detected in the block.",
            ErrorCode::GcodeWordRepeated => "A G-code word was repeated in the block.",
            ErrorCode::GcodeNoAxisWords => {
                "A G-code command requires XYZ axis words in the block, but none were detected."
            }
            ErrorCode::GcodeInvalidLineNumber => {
                "N line number value is not within the valid range of 1 - 9,999,999."
            }
            ErrorCode::GcodeValueWordMissing => "A G-code command was sent, but is missing some required P or L value words in the line.",
            ErrorCode::GcodeUnsupportedCoordSys => "Grbl supports six work coordinate systems G54-G59. G59.1, G59.2, and G59.3 are not supported.",
            ErrorCode::GcodeG53InvalidMotionMode => "The G53 G-code command requires either a G0 seek or G1 feed motion mode to be active.",
            ErrorCode::GcodeAxisWordsExist => {
                "There are unused axis words in the block and G80 motion mode cancel is active."
            }
            ErrorCode::GcodeNoAxisWordsInPlane => "A G2 or G3 arc was commanded but there are no XYZ axis words in the selected plane to trace the arc.",
            ErrorCode::GcodeInvalidTarget => "The motion command has an invalid target.",
            ErrorCode::GcodeArcRadiusError => "A G2 or G3 arc, traced with the radius definition, had a mathematical error when computing the arc geometry.",
            ErrorCode::GcodeNoOffsetsInPlane => "A G2 or G3 arc, traced with the offset definition, is missing the IJK offset word in the selected plane.",
            ErrorCode::GcodeUnusedWords => "There are unused, leftover G-code words that aren't used by any command in the block.",
            ErrorCode::GcodeG43DynamicAxisError => "The G43.1 dynamic tool length offset command cannot apply an offset to an axis other than its configured axis.",
            ErrorCode::GcodeMaxValueExceeded => "Tool number greater than max supported value.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error:{} - {}", self.code(), self.description())
    }
}
