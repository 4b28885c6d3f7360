//! GRBL Controller Implementation
//!
//! Drives the line protocol over a [`Transport`]: frames incoming bytes,
//! applies parsed lines to the tracked machine state, polls for status
//! reports at a bounded rate and correlates sent lines with their
//! acknowledgement.
//!
//! The controller is single-threaded and cooperative. Nothing happens in
//! the background; the caller drives it by calling [`GrblController::update`]
//! regularly, and [`GrblController::send_blocking`] pumps the same input
//! path while it waits for `ok`.

use super::commands::Command;
use super::config::GrblConfig;
use super::encoder::{self, CommandParams};
use super::status_parser::{Response, StatusParser, StatusReport};
use super::tracker::CoordinateTracker;
use crate::communication::{LineBuffer, Transport};
use grblwire_core::{
    Alarm, ArcDirection, Axis, Clock, Coolant, Coordinate, CoordinateSystem, DistanceMode,
    ErrorCode, GrblListener, MachineState, OffsetMode, Plane, ProtocolError, Result,
    SpindleDirection, SystemClock, Units,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Correlator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// No blocking send in progress
    #[default]
    Idle,
    /// A blocking send is waiting for `ok` or `error:n`
    AwaitingAck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AckOutcome {
    Accepted,
    Rejected(u8),
}

/// Acknowledgement expected by the blocking send in progress
#[derive(Debug, Clone, Copy)]
struct PendingAck {
    deadline: Instant,
    outcome: Option<AckOutcome>,
}

/// GRBL protocol engine over a transport
pub struct GrblController<T: Transport, C: Clock = SystemClock> {
    transport: T,
    clock: C,
    config: GrblConfig,
    line_buffer: LineBuffer,
    tracker: CoordinateTracker,
    machine_state: MachineState,
    sub_state: Option<u8>,
    feed_rate: f64,
    spindle_speed: f64,
    last_alarm: Option<Alarm>,
    last_error: Option<ErrorCode>,
    pending: Option<PendingAck>,
    /// `None` until the first poll, which is sent immediately
    next_poll: Option<Instant>,
    listener: Option<Arc<dyn GrblListener>>,
}

impl<T: Transport> GrblController<T, SystemClock> {
    /// Create a controller with the default configuration
    pub fn new(transport: T) -> Self {
        Self::build(transport, GrblConfig::default(), SystemClock)
    }

    /// Create a controller with a custom configuration
    pub fn with_config(transport: T, config: GrblConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(transport, config, SystemClock))
    }
}

impl<T: Transport, C: Clock> GrblController<T, C> {
    /// Create a controller reading time from `clock`
    pub fn with_clock(transport: T, config: GrblConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(transport, config, clock))
    }

    fn build(transport: T, config: GrblConfig, clock: C) -> Self {
        Self {
            transport,
            clock,
            line_buffer: LineBuffer::new(config.line_buffer_capacity),
            config,
            tracker: CoordinateTracker::new(),
            machine_state: MachineState::Unknown,
            sub_state: None,
            feed_rate: 0.0,
            spindle_speed: 0.0,
            last_alarm: None,
            last_error: None,
            pending: None,
            next_poll: None,
            listener: None,
        }
    }

    /// Register the listener, replacing any previous one
    pub fn set_listener(&mut self, listener: Arc<dyn GrblListener>) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn config(&self) -> &GrblConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the controller, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    // ---------------------------------------------------------------------
    // Driving
    // ---------------------------------------------------------------------

    /// Poll for a status report if due, then process pending input
    ///
    /// Input is drained until no byte is available or the update budget is
    /// spent; a partial line is kept for the next call.
    pub fn update(&mut self) -> Result<()> {
        self.poll_status()?;

        let budget_end = self.clock.now() + self.config.update_budget();
        while self.transport.is_data_available() && self.clock.now() < budget_end {
            self.read_one();
        }

        Ok(())
    }

    /// Write a line without waiting for its acknowledgement
    ///
    /// The `ok` for this line is not tracked; if it arrives while a later
    /// blocking send is waiting, that send treats it as its own.
    pub fn send(&mut self, line: &str) -> Result<()> {
        self.notify(|l| l.on_before_send(line));
        tracing::debug!("Sending: {}", line);
        self.transport.write_line(line.as_bytes())
    }

    /// Encode and send a command, waiting for its acknowledgement
    pub fn send_command(&mut self, command: Command, params: &CommandParams) -> Result<()> {
        if let Some(byte) = command.realtime_byte() {
            return self.send_realtime(command, byte);
        }
        self.send_blocking(&encoder::encode(command, params))
    }

    /// Write a line and wait up to the configured timeout for `ok`
    pub fn send_blocking(&mut self, line: &str) -> Result<()> {
        let timeout = self.config.ack_timeout();
        self.send_blocking_with_timeout(line, timeout)
    }

    /// Write a line and wait up to `timeout` for `ok`
    ///
    /// Returns `ProtocolError::CommandRejected` on `error:n` and
    /// `ProtocolError::Timeout` when the deadline passes. There is no retry.
    /// The controller is back in [`ControllerState::Idle`] on every return.
    pub fn send_blocking_with_timeout(&mut self, line: &str, timeout: Duration) -> Result<()> {
        self.send(line)?;

        self.pending = Some(PendingAck {
            deadline: self.clock.now() + timeout,
            outcome: None,
        });
        let result = self.await_ack(timeout);
        self.pending = None;
        result
    }

    fn await_ack(&mut self, timeout: Duration) -> Result<()> {
        loop {
            let Some(pending) = self.pending else {
                return Ok(());
            };

            match pending.outcome {
                Some(AckOutcome::Accepted) => return Ok(()),
                Some(AckOutcome::Rejected(code)) => {
                    let description = ErrorCode::from_code(code)
                        .map_or("Unknown error code", ErrorCode::description);
                    return Err(ProtocolError::CommandRejected {
                        code,
                        description: description.to_string(),
                    }
                    .into());
                }
                None => {}
            }

            if self.clock.now() >= pending.deadline {
                tracing::warn!("No acknowledgement within {}ms", timeout.as_millis());
                self.notify(|l| l.on_acknowledgement(false));
                return Err(ProtocolError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
                .into());
            }

            self.poll_status()?;

            if self.transport.is_data_available() {
                self.read_one();
            } else {
                std::thread::yield_now();
            }
        }
    }

    fn send_realtime(&mut self, command: Command, byte: u8) -> Result<()> {
        let label = command.to_string();
        self.notify(|l| l.on_before_send(&label));
        tracing::debug!("Sending realtime command {}", label);
        self.transport.write_byte(byte)
    }

    fn poll_status(&mut self) -> Result<()> {
        let now = self.clock.now();
        if self.next_poll.is_some_and(|at| now < at) {
            return Ok(());
        }

        tracing::trace!("Requesting status report");
        self.transport.write_byte(b'?')?;
        self.next_poll = Some(now + self.config.status_poll_interval());
        Ok(())
    }

    fn read_one(&mut self) {
        let Some(byte) = self.transport.read_byte() else {
            return;
        };
        if let Some(line) = self.line_buffer.push(byte) {
            self.handle_line(&line);
        }
    }

    fn handle_line(&mut self, line: &str) {
        tracing::trace!("Received: {}", line);
        let parsed = StatusParser::parse(line);

        if let Some(fs) = parsed.feed_spindle {
            self.feed_rate = fs.feed_rate;
            if let Some(speed) = fs.spindle_speed {
                self.spindle_speed = speed;
            }
        }

        if let Some(offset) = parsed.offset {
            self.tracker.apply_offset(&offset);
        }

        if let Some(report) = parsed.status {
            self.apply_status(report);
        }

        match parsed.response {
            Some(Response::Ok) => self.resolve(AckOutcome::Accepted),
            Some(Response::Error(code)) => {
                match ErrorCode::from_code(code) {
                    Some(error) => {
                        tracing::debug!("Controller rejected line: {}", error);
                        self.last_error = Some(error);
                        self.notify(|l| l.on_error(error));
                    }
                    None => tracing::warn!("Unknown error code {}", code),
                }
                self.resolve(AckOutcome::Rejected(code));
            }
            Some(Response::Alarm(code)) => match Alarm::from_code(code) {
                Some(alarm) => {
                    tracing::warn!("Controller alarm: {}", alarm);
                    self.last_alarm = Some(alarm);
                    self.notify(|l| l.on_alarm(alarm));
                }
                None => tracing::warn!("Unknown alarm code {}", code),
            },
            None => {}
        }
    }

    fn apply_status(&mut self, report: StatusReport) {
        self.tracker.apply_position(report.mode, &report.position);
        self.machine_state = report.state;
        self.sub_state = report.sub_state;
        self.notify(|l| l.on_position_update(report.state, report.mode));
    }

    fn resolve(&mut self, outcome: AckOutcome) {
        match self.pending.as_mut() {
            Some(pending) if pending.outcome.is_none() => {
                pending.outcome = Some(outcome);
                let success = outcome == AckOutcome::Accepted;
                self.notify(|l| l.on_acknowledgement(success));
            }
            _ => tracing::trace!("Acknowledgement with nothing pending"),
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn GrblListener)) {
        if let Some(listener) = &self.listener {
            f(listener.as_ref());
        }
    }

    // ---------------------------------------------------------------------
    // Reported state
    // ---------------------------------------------------------------------

    pub fn state(&self) -> ControllerState {
        if self.pending.is_some() {
            ControllerState::AwaitingAck
        } else {
            ControllerState::Idle
        }
    }

    /// Last reported machine state; `Unknown` until the first report
    pub fn machine_state(&self) -> MachineState {
        self.machine_state
    }

    /// Sub-state code of the last report, e.g. `0` for `Hold:0`
    pub fn sub_state(&self) -> Option<u8> {
        self.sub_state
    }

    pub fn feed_rate(&self) -> f64 {
        self.feed_rate
    }

    pub fn spindle_speed(&self) -> f64 {
        self.spindle_speed
    }

    pub fn work_coordinate(&self) -> Coordinate {
        self.tracker.work_coordinate()
    }

    pub fn work_coordinate_axis(&self, axis: Axis) -> f64 {
        self.tracker.work_coordinate_axis(axis)
    }

    pub fn machine_coordinate(&self) -> Coordinate {
        self.tracker.machine_coordinate()
    }

    pub fn machine_coordinate_axis(&self, axis: Axis) -> f64 {
        self.tracker.machine_coordinate_axis(axis)
    }

    pub fn work_coordinate_offset(&self) -> Coordinate {
        self.tracker.work_coordinate_offset()
    }

    pub fn work_coordinate_offset_axis(&self, axis: Axis) -> f64 {
        self.tracker.work_coordinate_offset_axis(axis)
    }

    pub fn last_alarm(&self) -> Option<Alarm> {
        self.last_alarm
    }

    pub fn last_error(&self) -> Option<ErrorCode> {
        self.last_error
    }

    /// Number of overlong incoming lines discarded
    pub fn overflow_count(&self) -> u64 {
        self.line_buffer.overflow_count()
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    pub fn set_units(&mut self, units: Units) -> Result<()> {
        let command = match units {
            Units::Inches => Command::UnitsInches,
            Units::Millimeters => Command::UnitsMillimeters,
        };
        self.send_command(command, &CommandParams::new())
    }

    pub fn set_distance_mode(&mut self, mode: DistanceMode) -> Result<()> {
        let command = match mode {
            DistanceMode::Absolute => Command::DistanceAbsolute,
            DistanceMode::Incremental => Command::DistanceIncremental,
        };
        self.send_command(command, &CommandParams::new())
    }

    pub fn set_plane(&mut self, plane: Plane) -> Result<()> {
        let command = match plane {
            Plane::XY => Command::PlaneXY,
            Plane::ZX => Command::PlaneZX,
            Plane::YZ => Command::PlaneYZ,
        };
        self.send_command(command, &CommandParams::new())
    }

    /// `G92`: make the current position read as `position`
    pub fn set_coordinate_offset(&mut self, position: &[(Axis, f64)]) -> Result<()> {
        self.send_blocking(&encoder::coordinate_offset(position))
    }

    /// `G92.1`
    pub fn clear_coordinate_offset(&mut self) -> Result<()> {
        self.send_command(Command::ClearAxisOffset, &CommandParams::new())
    }

    pub fn rapid_move(&mut self, position: &[(Axis, f64)]) -> Result<()> {
        self.send_blocking(&encoder::rapid(position))
    }

    pub fn linear_move(&mut self, position: &[(Axis, f64)], feed_rate: f64) -> Result<()> {
        self.send_blocking(&encoder::linear(position, Some(feed_rate)))
    }

    /// `G53` move, positions in machine coordinates
    pub fn machine_move(&mut self, position: &[(Axis, f64)]) -> Result<()> {
        self.send_blocking(&encoder::machine_move(position))
    }

    pub fn arc_move_radius(
        &mut self,
        direction: ArcDirection,
        end: &[(Axis, f64)],
        radius: f64,
        feed_rate: f64,
    ) -> Result<()> {
        self.send_blocking(&encoder::arc_radius(direction, end, radius, Some(feed_rate)))
    }

    /// Arc with center given as I/J offsets from the start point
    pub fn arc_move_center(
        &mut self,
        direction: ArcDirection,
        end: &[(Axis, f64)],
        center: (f64, f64),
        feed_rate: f64,
    ) -> Result<()> {
        self.send_blocking(&encoder::arc_center(direction, end, center, Some(feed_rate)))
    }

    pub fn dwell(&mut self, duration: Duration) -> Result<()> {
        self.send_blocking(&encoder::dwell(duration))
    }

    /// `G10 L2`/`G10 L20` for one of the work coordinate systems
    pub fn set_coordinate_system_origin(
        &mut self,
        mode: OffsetMode,
        system: CoordinateSystem,
        position: &[(Axis, f64)],
    ) -> Result<()> {
        self.send_blocking(&encoder::set_coordinate_origin(mode, system, position))
    }

    /// Make `system` (G54..G59) the active work coordinate system
    pub fn select_coordinate_system(&mut self, system: CoordinateSystem) -> Result<()> {
        let command = match system {
            CoordinateSystem::P1 => Command::CoordinateSystem1,
            CoordinateSystem::P2 => Command::CoordinateSystem2,
            CoordinateSystem::P3 => Command::CoordinateSystem3,
            CoordinateSystem::P4 => Command::CoordinateSystem4,
            CoordinateSystem::P5 => Command::CoordinateSystem5,
            CoordinateSystem::P6 => Command::CoordinateSystem6,
        };
        self.send_command(command, &CommandParams::new())
    }

    pub fn jog(&mut self, position: &[(Axis, f64)], feed_rate: f64) -> Result<()> {
        self.send_blocking(&encoder::jog(position, feed_rate))
    }

    pub fn spindle_on(&mut self, direction: SpindleDirection, speed: f64) -> Result<()> {
        self.send_blocking(&encoder::spindle(direction, speed))
    }

    pub fn spindle_off(&mut self) -> Result<()> {
        self.send_command(Command::SpindleStop, &CommandParams::new())
    }

    pub fn coolant(&mut self, coolant: Coolant) -> Result<()> {
        let command = match coolant {
            Coolant::Mist => Command::CoolantMist,
            Coolant::Flood => Command::CoolantFlood,
            Coolant::Off => Command::CoolantOff,
        };
        self.send_command(command, &CommandParams::new())
    }

    /// Run the homing cycle
    ///
    /// GRBL acknowledges `$H` only once the cycle finishes, so the wait is
    /// bounded by `timeout` rather than the configured ack timeout.
    pub fn home(&mut self, timeout: Duration) -> Result<()> {
        self.send_blocking_with_timeout(Command::Home.token(), timeout)
    }

    /// `$X`: clear the alarm lock
    pub fn unlock(&mut self) -> Result<()> {
        self.send_command(Command::KillAlarmLock, &CommandParams::new())
    }

    pub fn feed_hold(&mut self) -> Result<()> {
        self.send_command(Command::FeedHold, &CommandParams::new())
    }

    pub fn cycle_start(&mut self) -> Result<()> {
        self.send_command(Command::CycleStart, &CommandParams::new())
    }

    /// Ctrl-X: abort everything; any partial input line is dropped
    pub fn soft_reset(&mut self) -> Result<()> {
        self.send_command(Command::SoftReset, &CommandParams::new())?;
        self.line_buffer.clear();
        Ok(())
    }
}
