//! Position tracking across coordinate frames
//!
//! The work coordinate and the work coordinate offset are stored. The
//! machine coordinate is derived from them on every read and never stored.

use super::status_parser::AxisValues;
use grblwire_core::{Axis, Coordinate, CoordinateMode};

/// Work position and offset as last reported by the controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTracker {
    work: Coordinate,
    offset: Coordinate,
}

impl CoordinateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn work_coordinate(&self) -> Coordinate {
        self.work
    }

    pub fn work_coordinate_axis(&self, axis: Axis) -> f64 {
        self.work.get(axis)
    }

    pub fn work_coordinate_offset(&self) -> Coordinate {
        self.offset
    }

    pub fn work_coordinate_offset_axis(&self, axis: Axis) -> f64 {
        self.offset.get(axis)
    }

    /// `work + offset`, recomputed on each call
    pub fn machine_coordinate(&self) -> Coordinate {
        self.work.to_machine(&self.offset)
    }

    pub fn machine_coordinate_axis(&self, axis: Axis) -> f64 {
        grblwire_core::to_machine(self.work.get(axis), self.offset.get(axis))
    }

    /// Store reported offset values, leaving unreported slots untouched
    pub(crate) fn apply_offset(&mut self, values: &AxisValues) {
        for (i, value) in values.iter().enumerate() {
            if let Some(value) = value {
                self.offset[i] = *value;
            }
        }
    }

    /// Store a reported position given in the frame named by `mode`
    ///
    /// Machine positions are converted to work frame with the current
    /// offset. A position reported as `WCO` is an offset and goes there.
    pub(crate) fn apply_position(&mut self, mode: CoordinateMode, values: &AxisValues) {
        match mode {
            CoordinateMode::Work => {
                for (i, value) in values.iter().enumerate() {
                    if let Some(value) = value {
                        self.work[i] = *value;
                    }
                }
            }
            CoordinateMode::Machine => {
                for (i, value) in values.iter().enumerate() {
                    if let Some(value) = value {
                        self.work[i] = grblwire_core::to_work(*value, self.offset[i]);
                    }
                }
            }
            CoordinateMode::WorkCoordinateOffset => self.apply_offset(values),
            CoordinateMode::Unknown => {}
        }
    }
}
