//! Data models for axes, coordinates, and reported machine state
//!
//! This module provides:
//! - Axis identifiers with fixed slot indices (X, Y, Z, A, B, C)
//! - Fixed-length coordinates indexed by axis
//! - Frame conversion between machine and work coordinates
//! - Machine state and coordinate mode tags from status reports
//! - Alarm and error codes reported by the controller
//! - Modal parameter enums used when building commands

pub mod codes;
pub mod modal;
pub mod state;

pub use codes::{Alarm, ErrorCode};
pub use modal::{
    ArcDirection, Coolant, CoordinateSystem, DistanceMode, OffsetMode, Plane, SpindleDirection,
    Units,
};
pub use state::{CoordinateMode, MachineState};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of axis slots in every coordinate.
pub const MAX_AXES: usize = 6;

/// Machine axis
///
/// The ordinal of each real axis is its slot in a [`Coordinate`].
/// `Unknown` is only ever returned from a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
    /// A (4th) axis
    A,
    /// B (5th) axis
    B,
    /// C (6th) axis
    C,
    /// No such axis
    Unknown,
}

impl Axis {
    /// The real axes in slot order
    pub const ALL: [Axis; MAX_AXES] = [Axis::X, Axis::Y, Axis::Z, Axis::A, Axis::B, Axis::C];

    /// Slot index of this axis, `None` for `Unknown`
    pub fn index(self) -> Option<usize> {
        match self {
            Axis::X => Some(0),
            Axis::Y => Some(1),
            Axis::Z => Some(2),
            Axis::A => Some(3),
            Axis::B => Some(4),
            Axis::C => Some(5),
            Axis::Unknown => None,
        }
    }

    /// Wire letter of this axis, `None` for `Unknown`
    pub fn letter(self) -> Option<char> {
        match self {
            Axis::X => Some('X'),
            Axis::Y => Some('Y'),
            Axis::Z => Some('Z'),
            Axis::A => Some('A'),
            Axis::B => Some('B'),
            Axis::C => Some('C'),
            Axis::Unknown => None,
        }
    }

    /// Look up an axis by its wire letter (case-insensitive)
    pub fn from_letter(letter: char) -> Axis {
        match letter.to_ascii_uppercase() {
            'X' => Axis::X,
            'Y' => Axis::Y,
            'Z' => Axis::Z,
            'A' => Axis::A,
            'B' => Axis::B,
            'C' => Axis::C,
            _ => Axis::Unknown,
        }
    }

    /// Axis stored at the given slot
    pub fn from_index(index: usize) -> Axis {
        Self::ALL.get(index).copied().unwrap_or(Axis::Unknown)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter() {
            Some(letter) => write!(f, "{}", letter),
            None => write!(f, "?"),
        }
    }
}

/// Convert a machine-frame value to work frame: `WPos = MPos - WCO`
pub fn to_work(machine: f64, offset: f64) -> f64 {
    machine - offset
}

/// Convert a work-frame value to machine frame: `MPos = WPos + WCO`
pub fn to_machine(work: f64, offset: f64) -> f64 {
    work + offset
}

/// Position with one value per axis slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate([f64; MAX_AXES]);

impl Coordinate {
    /// All axes at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from raw slot values
    pub fn from_array(values: [f64; MAX_AXES]) -> Self {
        Self(values)
    }

    /// Value for an axis; `Unknown` reads as zero
    pub fn get(&self, axis: Axis) -> f64 {
        axis.index().map_or(0.0, |i| self.0[i])
    }

    /// Set the value for an axis; `Unknown` is ignored
    pub fn set(&mut self, axis: Axis, value: f64) {
        if let Some(i) = axis.index() {
            self.0[i] = value;
        }
    }

    /// Raw slot values
    pub fn as_array(&self) -> &[f64; MAX_AXES] {
        &self.0
    }

    /// Per-axis `to_work(self, offset)`
    pub fn to_work(&self, offset: &Coordinate) -> Coordinate {
        let mut out = *self;
        for (value, o) in out.0.iter_mut().zip(offset.0.iter()) {
            *value = to_work(*value, *o);
        }
        out
    }

    /// Per-axis `to_machine(self, offset)`
    pub fn to_machine(&self, offset: &Coordinate) -> Coordinate {
        let mut out = *self;
        for (value, o) in out.0.iter_mut().zip(offset.0.iter()) {
            *value = to_machine(*value, *o);
        }
        out
    }

    /// Iterate `(axis, value)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<usize> for Coordinate {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Coordinate {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl From<[f64; MAX_AXES]> for Coordinate {
    fn from(values: [f64; MAX_AXES]) -> Self {
        Self(values)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (axis, value) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}:{:.3}", axis, value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_lookup() {
        assert_eq!(Axis::from_letter('z'), Axis::Z);
        assert_eq!(Axis::from_letter('Q'), Axis::Unknown);
        assert_eq!(Axis::C.index(), Some(5));
        assert_eq!(Axis::Unknown.index(), None);
        assert_eq!(Axis::from_index(6), Axis::Unknown);
    }

    #[test]
    fn test_coordinate_unknown_axis() {
        let mut coord = Coordinate::zero();
        coord.set(Axis::Unknown, 5.0);
        assert_eq!(coord, Coordinate::zero());
        assert_eq!(coord.get(Axis::Unknown), 0.0);
    }

    #[test]
    fn test_frame_conversion() {
        let work = Coordinate::from_array([1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        let offset = Coordinate::from_array([10.0, -5.0, 0.5, 0.0, 0.0, 0.0]);
        let machine = work.to_machine(&offset);
        assert_eq!(machine.get(Axis::X), 11.0);
        assert_eq!(machine.get(Axis::Y), -3.0);
        assert_eq!(machine.to_work(&offset), work);
    }

    #[test]
    fn test_display() {
        let coord = Coordinate::from_array([1.0, 2.5, -3.0, 0.0, 0.0, 0.0]);
        assert!(coord.to_string().starts_with("X:1.000 Y:2.500 Z:-3.000"));
    }
}
