//! Modal parameters selected by G/M-code commands

use serde::{Deserialize, Serialize};

/// Unit of measurement (G20/G21)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Inches,
    Millimeters,
}

/// Distance mode (G90/G91)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMode {
    Absolute,
    Incremental,
}

/// Arc plane (G17/G18/G19)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plane {
    XY,
    ZX,
    YZ,
}

/// Arc direction (G2/G3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

/// How G10 interprets the supplied position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetMode {
    /// `G10 L2`: the values are the offset itself
    Absolute,
    /// `G10 L20`: the values are the desired current work position
    Relative,
}

/// Work coordinate system slot addressed by `G10 P<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
}

impl CoordinateSystem {
    /// 1-based index used on the wire
    pub fn index(self) -> u8 {
        match self {
            CoordinateSystem::P1 => 1,
            CoordinateSystem::P2 => 2,
            CoordinateSystem::P3 => 3,
            CoordinateSystem::P4 => 4,
            CoordinateSystem::P5 => 5,
            CoordinateSystem::P6 => 6,
        }
    }
}

/// Spindle rotation (M3/M4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpindleDirection {
    Clockwise,
    CounterClockwise,
}

/// Coolant control (M7/M8/M9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coolant {
    Mist,
    Flood,
    Off,
}
