//! GRBL command catalog
//!
//! Every command the engine can put on the wire, each mapped one-to-one to
//! its token. Parameters are appended by the encoder.

use std::fmt;

/// Wire commands understood by GRBL 1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Motion
    /// G0 rapid positioning
    RapidMove,
    /// G1 linear interpolation
    LinearMove,
    /// G2 clockwise arc
    ArcClockwise,
    /// G3 counter-clockwise arc
    ArcCounterClockwise,
    /// G4 dwell
    Dwell,
    /// G38.2 probe toward workpiece, error on failure
    ProbeToward,
    /// G38.3 probe toward workpiece
    ProbeTowardNoError,
    /// G38.4 probe away from workpiece, error on failure
    ProbeAway,
    /// G38.5 probe away from workpiece
    ProbeAwayNoError,
    /// G80 cancel motion mode
    MotionCancel,

    // Plane
    /// G17
    PlaneXY,
    /// G18
    PlaneZX,
    /// G19
    PlaneYZ,

    // Units
    /// G20
    UnitsInches,
    /// G21
    UnitsMillimeters,

    // Distance mode
    /// G90
    DistanceAbsolute,
    /// G91
    DistanceIncremental,
    /// G91.1 incremental arc centers
    ArcDistanceIncremental,

    // Predefined positions
    /// G28
    GoPredefinedPosition1,
    /// G28.1
    SetPredefinedPosition1,
    /// G30
    GoPredefinedPosition2,
    /// G30.1
    SetPredefinedPosition2,

    /// G53 move in machine coordinates
    MachineCoordinates,

    // Coordinate systems
    /// G54
    CoordinateSystem1,
    /// G55
    CoordinateSystem2,
    /// G56
    CoordinateSystem3,
    /// G57
    CoordinateSystem4,
    /// G58
    CoordinateSystem5,
    /// G59
    CoordinateSystem6,
    /// G59.1
    CoordinateSystem7,
    /// G59.2
    CoordinateSystem8,
    /// G59.3
    CoordinateSystem9,

    // Offsets
    /// G10 L2 set coordinate system offset
    SetCoordinateOffset,
    /// G10 L20 set coordinate system so the current position reads as given
    SetCoordinateOffsetRelative,
    /// G92 set axis offset
    SetAxisOffset,
    /// G92.1 clear axis offset
    ClearAxisOffset,
    /// G43.1 dynamic tool length offset
    ToolLengthOffset,
    /// G49 cancel tool length offset
    ToolLengthOffsetCancel,

    // Feed rate mode
    /// G93
    FeedInverseTime,
    /// G94
    FeedUnitsPerMinute,

    // Program flow
    /// M0
    ProgramPause,
    /// M1
    ProgramOptionalStop,
    /// M2
    ProgramEnd,
    /// M30
    ProgramEndRewind,

    // Spindle
    /// M3
    SpindleClockwise,
    /// M4
    SpindleCounterClockwise,
    /// M5
    SpindleStop,

    /// M6
    ToolChange,

    // Coolant
    /// M7
    CoolantMist,
    /// M8
    CoolantFlood,
    /// M9
    CoolantOff,

    // Realtime
    /// `?` status report query
    StatusQuery,
    /// `!` feed hold
    FeedHold,
    /// `~` cycle start / resume
    CycleStart,
    /// Ctrl-X soft reset
    SoftReset,

    // System
    /// `$` help
    Help,
    /// `$$` view settings
    ViewSettings,
    /// `$#` view coordinate parameters
    ViewParameters,
    /// `$G` view parser state
    ViewParserState,
    /// `$I` view build info
    ViewBuildInfo,
    /// `$N` view startup blocks
    ViewStartupBlocks,
    /// `$C` toggle check mode
    CheckMode,
    /// `$X` kill alarm lock
    KillAlarmLock,
    /// `$H` run homing cycle
    Home,
    /// `$J=` jog
    Jog,
    /// `$RST=$` restore settings
    RestoreSettings,
    /// `$RST=#` clear coordinate parameters
    RestoreParameters,
    /// `$RST=*` restore everything
    RestoreAll,
    /// `$SLP` sleep
    Sleep,
}

impl Command {
    /// Token written on the wire for this command
    pub fn token(self) -> &'static str {
        match self {
            Command::RapidMove => "G0",
            Command::LinearMove => "G1",
            Command::ArcClockwise => "G2",
            Command::ArcCounterClockwise => "G3",
            Command::Dwell => "G4",
            Command::ProbeToward => "G38.2",
            Command::ProbeTowardNoError => "G38.3",
            Command::ProbeAway => "G38.4",
            Command::ProbeAwayNoError => "G38.5",
            Command::MotionCancel => "G80",
            Command::PlaneXY => "G17",
            Command::PlaneZX => "G18",
            Command::PlaneYZ => "G19",
            Command::UnitsInches => "G20",
            Command::UnitsMillimeters => "G21",
            Command::DistanceAbsolute => "G90",
            Command::DistanceIncremental => "G91",
            Command::ArcDistanceIncremental => "G91.1",
            Command::GoPredefinedPosition1 => "G28",
            Command::SetPredefinedPosition1 => "G28.1",
            Command::GoPredefinedPosition2 => "G30",
            Command::SetPredefinedPosition2 => "G30.1",
            Command::MachineCoordinates => "G53",
            Command::CoordinateSystem1 => "G54",
            Command::CoordinateSystem2 => "G55",
            Command::CoordinateSystem3 => "G56",
            Command::CoordinateSystem4 => "G57",
            Command::CoordinateSystem5 => "G58",
            Command::CoordinateSystem6 => "G59",
            Command::CoordinateSystem7 => "G59.1",
            Command::CoordinateSystem8 => "G59.2",
            Command::CoordinateSystem9 => "G59.3",
            Command::SetCoordinateOffset => "G10 L2",
            Command::SetCoordinateOffsetRelative => "G10 L20",
            Command::SetAxisOffset => "G92",
            Command::ClearAxisOffset => "G92.1",
            Command::ToolLengthOffset => "G43.1",
            Command::ToolLengthOffsetCancel => "G49",
            Command::FeedInverseTime => "G93",
            Command::FeedUnitsPerMinute => "G94",
            Command::ProgramPause => "M0",
            Command::ProgramOptionalStop => "M1",
            Command::ProgramEnd => "M2",
            Command::ProgramEndRewind => "M30",
            Command::SpindleClockwise => "M3",
            Command::SpindleCounterClockwise => "M4",
            Command::SpindleStop => "M5",
            Command::ToolChange => "M6",
            Command::CoolantMist => "M7",
            Command::CoolantFlood => "M8",
            Command::CoolantOff => "M9",
            Command::StatusQuery => "?",
            Command::FeedHold => "!",
            Command::CycleStart => "~",
            Command::SoftReset => "\x18",
            Command::Help => "$",
            Command::ViewSettings => "$$",
            Command::ViewParameters => "$#",
            Command::ViewParserState => "$G",
            Command::ViewBuildInfo => "$I",
            Command::ViewStartupBlocks => "$N",
            Command::CheckMode => "$C",
            Command::KillAlarmLock => "$X",
            Command::Home => "$H",
            Command::Jog => "$J=",
            Command::RestoreSettings => "$RST=$",
            Command::RestoreParameters => "$RST=#",
            Command::RestoreAll => "$RST=*",
            Command::Sleep => "$SLP",
        }
    }

    /// Byte for realtime commands, which bypass the line protocol
    ///
    /// These are sent alone without a terminator and never acknowledged.
    pub fn realtime_byte(self) -> Option<u8> {
        match self {
            Command::StatusQuery => Some(b'?'),
            Command::FeedHold => Some(b'!'),
            Command::CycleStart => Some(b'~'),
            Command::SoftReset => Some(0x18),
            _ => None,
        }
    }

    pub fn is_realtime(self) -> bool {
        self.realtime_byte().is_some()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SoftReset => write!(f, "^X"),
            _ => write!(f, "{}", self.token()),
        }
    }
}
