//! Command line encoding
//!
//! Builds wire lines from a [`Command`] and its parameters. Fields always
//! appear in the same order after the token:
//!
//! 1. `P` (coordinate system index or dwell seconds)
//! 2. axis words in slot order (X Y Z A B C)
//! 3. `R` (arc radius)
//! 4. `I` `J` (arc center)
//! 5. `F` (feed rate)
//! 6. `S` (spindle speed)
//!
//! Every field is a letter followed by its value with three decimals.
//! Fields are separated by single spaces; jog lines have no space after
//! `$J=`. No trailing separator and no terminator: the transport appends
//! the line ending.

use super::commands::Command;
use grblwire_core::{
    ArcDirection, Axis, CoordinateSystem, OffsetMode, SpindleDirection, MAX_AXES,
};
use std::fmt::Write;
use std::time::Duration;

/// Optional fields appended after a command token
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommandParams {
    /// `P` word for G10
    pub coordinate_system: Option<CoordinateSystem>,
    /// `P` word for G4, in seconds on the wire
    pub dwell: Option<Duration>,
    /// Axis words, only set slots are emitted
    pub axes: [Option<f64>; MAX_AXES],
    /// `R` word
    pub radius: Option<f64>,
    /// `I` and `J` words
    pub center: Option<(f64, f64)>,
    /// `F` word
    pub feed_rate: Option<f64>,
    /// `S` word
    pub spindle_speed: Option<f64>,
}

impl CommandParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one axis word; `Axis::Unknown` is ignored
    pub fn axis(mut self, axis: Axis, value: f64) -> Self {
        if let Some(i) = axis.index() {
            self.axes[i] = Some(value);
        }
        self
    }

    /// Set several axis words
    pub fn axes(self, position: &[(Axis, f64)]) -> Self {
        position
            .iter()
            .fold(self, |params, &(axis, value)| params.axis(axis, value))
    }

    pub fn coordinate_system(mut self, system: CoordinateSystem) -> Self {
        self.coordinate_system = Some(system);
        self
    }

    pub fn dwell(mut self, duration: Duration) -> Self {
        self.dwell = Some(duration);
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn center(mut self, i: f64, j: f64) -> Self {
        self.center = Some((i, j));
        self
    }

    pub fn feed_rate(mut self, feed_rate: f64) -> Self {
        self.feed_rate = Some(feed_rate);
        self
    }

    pub fn spindle_speed(mut self, speed: f64) -> Self {
        self.spindle_speed = Some(speed);
        self
    }
}

/// Encode a command and its parameters into one wire line
pub fn encode(command: Command, params: &CommandParams) -> String {
    let mut line = String::from(command.token());
    let mut fields = FieldWriter {
        line: &mut line,
        separate: command != Command::Jog,
    };

    if let Some(system) = params.coordinate_system {
        fields.push('P', f64::from(system.index()));
    }
    if let Some(duration) = params.dwell {
        fields.push('P', duration.as_secs_f64());
    }
    for (axis, value) in Axis::ALL.iter().zip(params.axes.iter()) {
        if let (Some(letter), Some(value)) = (axis.letter(), value) {
            fields.push(letter, *value);
        }
    }
    if let Some(radius) = params.radius {
        fields.push('R', radius);
    }
    if let Some((i, j)) = params.center {
        fields.push('I', i);
        fields.push('J', j);
    }
    if let Some(feed_rate) = params.feed_rate {
        fields.push('F', feed_rate);
    }
    if let Some(speed) = params.spindle_speed {
        fields.push('S', speed);
    }

    line
}

struct FieldWriter<'a> {
    line: &'a mut String,
    separate: bool,
}

impl FieldWriter<'_> {
    fn push(&mut self, letter: char, value: f64) {
        if !value.is_finite() {
            tracing::debug!("Skipping non-finite {} word", letter);
            return;
        }
        if self.separate {
            self.line.push(' ');
        }
        self.separate = true;
        let _ = write!(self.line, "{}{}", letter, format_value(value));
    }
}

/// Format a value with three decimals, never as `-0.000`
pub fn format_value(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

/// `G0` to the given position
pub fn rapid(position: &[(Axis, f64)]) -> String {
    encode(Command::RapidMove, &CommandParams::new().axes(position))
}

/// `G1` to the given position, optionally setting the feed rate
pub fn linear(position: &[(Axis, f64)], feed_rate: Option<f64>) -> String {
    let mut params = CommandParams::new().axes(position);
    params.feed_rate = feed_rate;
    encode(Command::LinearMove, &params)
}

/// `G53` move in machine coordinates
pub fn machine_move(position: &[(Axis, f64)]) -> String {
    encode(Command::MachineCoordinates, &CommandParams::new().axes(position))
}

fn arc_command(direction: ArcDirection) -> Command {
    match direction {
        ArcDirection::Clockwise => Command::ArcClockwise,
        ArcDirection::CounterClockwise => Command::ArcCounterClockwise,
    }
}

/// `G2`/`G3` radius-format arc
pub fn arc_radius(
    direction: ArcDirection,
    end: &[(Axis, f64)],
    radius: f64,
    feed_rate: Option<f64>,
) -> String {
    let mut params = CommandParams::new().axes(end).radius(radius);
    params.feed_rate = feed_rate;
    encode(arc_command(direction), &params)
}

/// `G2`/`G3` center-format arc, `center` given as I/J offsets
pub fn arc_center(
    direction: ArcDirection,
    end: &[(Axis, f64)],
    center: (f64, f64),
    feed_rate: Option<f64>,
) -> String {
    let mut params = CommandParams::new().axes(end).center(center.0, center.1);
    params.feed_rate = feed_rate;
    encode(arc_command(direction), &params)
}

/// `G4` dwell
pub fn dwell(duration: Duration) -> String {
    encode(Command::Dwell, &CommandParams::new().dwell(duration))
}

/// `G10 L2`/`G10 L20` for a coordinate system
pub fn set_coordinate_origin(
    mode: OffsetMode,
    system: CoordinateSystem,
    position: &[(Axis, f64)],
) -> String {
    let command = match mode {
        OffsetMode::Absolute => Command::SetCoordinateOffset,
        OffsetMode::Relative => Command::SetCoordinateOffsetRelative,
    };
    encode(
        command,
        &CommandParams::new().coordinate_system(system).axes(position),
    )
}

/// `G92` axis offset
pub fn coordinate_offset(position: &[(Axis, f64)]) -> String {
    encode(Command::SetAxisOffset, &CommandParams::new().axes(position))
}

/// `$J=` jog
pub fn jog(position: &[(Axis, f64)], feed_rate: f64) -> String {
    encode(
        Command::Jog,
        &CommandParams::new().axes(position).feed_rate(feed_rate),
    )
}

/// `M3`/`M4` with spindle speed
pub fn spindle(direction: SpindleDirection, speed: f64) -> String {
    let command = match direction {
        SpindleDirection::Clockwise => Command::SpindleClockwise,
        SpindleDirection::CounterClockwise => Command::SpindleCounterClockwise,
    };
    encode(command, &CommandParams::new().spindle_speed(speed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_command() {
        assert_eq!(encode(Command::UnitsMillimeters, &CommandParams::new()), "G21");
    }

    #[test]
    fn test_sparse_axes() {
        assert_eq!(rapid(&[(Axis::Z, 5.0)]), "G0 Z5.000");
        assert_eq!(rapid(&[(Axis::Y, 2.0), (Axis::X, 1.0)]), "G0 X1.000 Y2.000");
    }

    #[test]
    fn test_unknown_axis_skipped() {
        assert_eq!(rapid(&[(Axis::Unknown, 3.0), (Axis::X, 1.0)]), "G0 X1.000");
    }

    #[test]
    fn test_field_order() {
        assert_eq!(
            linear(&[(Axis::X, 10.0), (Axis::Y, -2.5)], Some(500.0)),
            "G1 X10.000 Y-2.500 F500.000"
        );
        assert_eq!(
            arc_radius(ArcDirection::Clockwise, &[(Axis::X, 10.0)], 5.0, Some(100.0)),
            "G2 X10.000 R5.000 F100.000"
        );
        assert_eq!(
            arc_center(
                ArcDirection::CounterClockwise,
                &[(Axis::X, 0.0), (Axis::Y, 10.0)],
                (0.0, 5.0),
                None
            ),
            "G3 X0.000 Y10.000 I0.000 J5.000"
        );
    }

    #[test]
    fn test_coordinate_system_first() {
        assert_eq!(
            set_coordinate_origin(OffsetMode::Relative, CoordinateSystem::P1, &[(Axis::Z, 0.0)]),
            "G10 L20 P1.000 Z0.000"
        );
    }

    #[test]
    fn test_dwell_seconds() {
        assert_eq!(dwell(Duration::from_millis(1500)), "G4 P1.500");
    }

    #[test]
    fn test_jog_has_no_space_after_token() {
        assert_eq!(jog(&[(Axis::X, 1.0)], 200.0), "$J=X1.000 F200.000");
    }

    #[test]
    fn test_spindle_speed() {
        assert_eq!(spindle(SpindleDirection::Clockwise, 12000.0), "M3 S12000.000");
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(format_value(-0.0), "0.000");
        assert_eq!(format_value(-0.0004), "0.000");
        assert_eq!(format_value(-0.5), "-0.500");
    }

    #[test]
    fn test_non_finite_skipped() {
        assert_eq!(rapid(&[(Axis::X, f64::NAN), (Axis::Y, 1.0)]), "G0 Y1.000");
    }
}
