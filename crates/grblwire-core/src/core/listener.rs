//! Controller listener interface
//!
//! Defines the listener trait for protocol notifications

use crate::data::{Alarm, CoordinateMode, ErrorCode, MachineState};
use std::sync::Arc;

/// Listener trait for protocol notifications
///
/// Implement this trait to receive notifications from the controller.
/// Every method has an empty default, so implementors only override what
/// they care about. Calls happen synchronously on the thread driving the
/// controller.
pub trait GrblListener: Send + Sync {
    /// A status report was accepted and the tracked position updated
    fn on_position_update(&self, _state: MachineState, _mode: CoordinateMode) {}

    /// A line is about to be written to the transport (without terminator)
    fn on_before_send(&self, _line: &str) {}

    /// A pending acknowledgement resolved; `false` for `error:n`
    fn on_acknowledgement(&self, _success: bool) {}

    /// Called when an alarm occurs
    fn on_alarm(&self, _alarm: Alarm) {}

    /// Called when the controller rejects a line
    fn on_error(&self, _error: ErrorCode) {}
}

impl<T: GrblListener + ?Sized> GrblListener for Arc<T> {
    fn on_position_update(&self, state: MachineState, mode: CoordinateMode) {
        (**self).on_position_update(state, mode)
    }

    fn on_before_send(&self, line: &str) {
        (**self).on_before_send(line)
    }

    fn on_acknowledgement(&self, success: bool) {
        (**self).on_acknowledgement(success)
    }

    fn on_alarm(&self, alarm: Alarm) {
        (**self).on_alarm(alarm)
    }

    fn on_error(&self, error: ErrorCode) {
        (**self).on_error(error)
    }
}
