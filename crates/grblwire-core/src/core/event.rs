//! Event system for controller notifications
//!
//! Provides:
//! - Event types mirroring the [`GrblListener`] callbacks
//! - Event dispatcher that publishes them to any number of subscribers

use crate::core::listener::GrblListener;
use crate::data::{Alarm, CoordinateMode, ErrorCode, MachineState};
use tokio::sync::broadcast;

/// Controller event types
#[derive(Debug, Clone, PartialEq)]
pub enum GrblEvent {
    /// Status report accepted
    PositionUpdated {
        /// Reported machine state
        state: MachineState,
        /// Frame the report was expressed in
        mode: CoordinateMode,
    },
    /// Line about to be sent
    Sending(String),
    /// Acknowledgement resolved
    Acknowledged(bool),
    /// Alarm occurred
    Alarm(Alarm),
    /// Command rejected
    Error(ErrorCode),
}

impl std::fmt::Display for GrblEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrblEvent::PositionUpdated { state, mode } => {
                write!(f, "Position update: {} ({})", state, mode)
            }
            GrblEvent::Sending(line) => write!(f, "Sending: {}", line),
            GrblEvent::Acknowledged(ok) => write!(f, "Acknowledged: {}", ok),
            GrblEvent::Alarm(alarm) => write!(f, "{}", alarm),
            GrblEvent::Error(error) => write!(f, "{}", error),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
///
/// Register a clone with the controller as its listener; every callback is
/// republished as a [`GrblEvent`]. Events published with no subscriber are
/// dropped.
#[derive(Clone)]
pub struct EventDispatcher {
    /// Broadcast sender channel for controller events.
    tx: broadcast::Sender<GrblEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<GrblEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers, returning how many received it
    pub fn publish(&self, event: GrblEvent) -> usize {
        match self.tx.send(event) {
            Ok(count) => count,
            Err(_) => {
                tracing::trace!("Dropped event with no subscribers");
                0
            }
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}

impl GrblListener for EventDispatcher {
    fn on_position_update(&self, state: MachineState, mode: CoordinateMode) {
        self.publish(GrblEvent::PositionUpdated { state, mode });
    }

    fn on_before_send(&self, line: &str) {
        self.publish(GrblEvent::Sending(line.to_string()));
    }

    fn on_acknowledgement(&self, success: bool) {
        self.publish(GrblEvent::Acknowledged(success));
    }

    fn on_alarm(&self, alarm: Alarm) {
        self.publish(GrblEvent::Alarm(alarm));
    }

    fn on_error(&self, error: ErrorCode) {
        self.publish(GrblEvent::Error(error));
    }
}
