use grblwire_communication::{
    ControllerState, GrblConfig, GrblController, MemoryTransport, Transport,
};
use grblwire_core::{
    Alarm, Axis, CoordinateMode, ErrorCode, EventDispatcher, GrblEvent, GrblListener,
    MachineState, ManualClock, Units,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Records every callback in order
#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl GrblListener for RecordingListener {
    fn on_position_update(&self, state: MachineState, mode: CoordinateMode) {
        self.events
            .lock()
            .unwrap()
            .push(format!("position {} {}", state, mode));
    }

    fn on_before_send(&self, line: &str) {
        self.events.lock().unwrap().push(format!("send {}", line));
    }

    fn on_acknowledgement(&self, success: bool) {
        self.events.lock().unwrap().push(format!("ack {}", success));
    }

    fn on_alarm(&self, alarm: Alarm) {
        self.events
            .lock()
            .unwrap()
            .push(format!("alarm {}", alarm.code()));
    }

    fn on_error(&self, error: ErrorCode) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error {}", error.code()));
    }
}

fn simulated(
    step: Duration,
) -> (
    MemoryTransport,
    ManualClock,
    GrblController<MemoryTransport, ManualClock>,
) {
    let transport = MemoryTransport::new();
    let clock = ManualClock::with_auto_advance(step);
    let controller =
        GrblController::with_clock(transport.clone(), GrblConfig::default(), clock.clone())
            .unwrap();
    (transport, clock, controller)
}

fn count_polls(transport: &MemoryTransport) -> usize {
    transport
        .written_bytes()
        .iter()
        .filter(|&&b| b == b'?')
        .count()
}

#[test]
fn test_ack_resolves_before_deadline() {
    let (transport, clock, mut controller) = simulated(Duration::from_millis(1));
    transport.push_incoming_after(3, b"ok\r\n");

    let start = clock.peek();
    controller.send_blocking("G21").unwrap();
    let elapsed = clock.peek() - start;

    assert!(elapsed < Duration::from_millis(100));
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(transport.written_lines(), vec!["G21"]);
}

#[test]
fn test_timeout_without_response() {
    let (_transport, clock, mut controller) = simulated(Duration::from_millis(1));
    let listener = Arc::new(RecordingListener::default());
    controller.set_listener(listener.clone());

    let start = clock.peek();
    let err = controller.send_blocking("G21").unwrap_err();
    let elapsed = clock.peek() - start;

    assert!(err.is_timeout());
    assert!(elapsed >= Duration::from_millis(100));
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(listener.events(), vec!["send G21", "ack false"]);
}

#[test]
fn test_custom_timeout() {
    let (transport, _clock, mut controller) = simulated(Duration::from_millis(1));
    // Arrives well after the default 100ms deadline
    transport.push_incoming_after(200, b"ok\r\n");
    controller
        .send_blocking_with_timeout("$H", Duration::from_secs(5))
        .unwrap();
}

#[test]
fn test_polling_continues_while_awaiting_ack() {
    let (transport, _clock, mut controller) = simulated(Duration::from_millis(1));

    let err = controller
        .send_blocking_with_timeout("G21", Duration::from_secs(1))
        .unwrap_err();

    assert!(err.is_timeout());
    let polls = count_polls(&transport);
    assert!((4..=6).contains(&polls), "polls: {}", polls);
    assert_eq!(transport.written_lines(), vec!["G21"]);
}

#[test]
fn test_zero_update_budget_rejected() {
    let config = GrblConfig {
        update_budget_ms: 0,
        ..GrblConfig::default()
    };
    let result = GrblController::with_clock(MemoryTransport::new(), config, ManualClock::new());
    assert!(result.is_err());
}

#[test]
fn test_status_poll_rate_limited() {
    let (transport, clock, mut controller) = simulated(Duration::ZERO);

    for _ in 0..100 {
        controller.update().unwrap();
        clock.advance(Duration::from_millis(10));
    }

    // One second at a 200ms interval
    assert_eq!(count_polls(&transport), 5);
}

#[test]
fn test_poll_interval_from_config() {
    let transport = MemoryTransport::new();
    let clock = ManualClock::new();
    let config = GrblConfig {
        status_poll_interval_ms: 50,
        ..GrblConfig::default()
    };
    let mut controller =
        GrblController::with_clock(transport.clone(), config, clock.clone()).unwrap();

    for _ in 0..10 {
        controller.update().unwrap();
        clock.advance(Duration::from_millis(10));
    }

    assert_eq!(count_polls(&transport), 2);
}

#[test]
fn test_status_report_updates_position() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);
    let listener = Arc::new(RecordingListener::default());
    controller.set_listener(listener.clone());

    transport.push_incoming("<Jog|WPos:1.500,-2.000,3.250|FS:800,0>\r\n");
    controller.update().unwrap();

    assert_eq!(controller.machine_state(), MachineState::Jog);
    assert_eq!(controller.work_coordinate_axis(Axis::X), 1.5);
    assert_eq!(controller.work_coordinate_axis(Axis::Y), -2.0);
    assert_eq!(controller.work_coordinate_axis(Axis::Z), 3.25);
    assert_eq!(controller.feed_rate(), 800.0);
    assert_eq!(controller.spindle_speed(), 0.0);
    assert_eq!(listener.events(), vec!["position Jog WPos"]);
}

#[test]
fn test_unknown_state_discarded() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);
    let listener = Arc::new(RecordingListener::default());
    controller.set_listener(listener.clone());

    transport.push_incoming("<Idle|WPos:1.000,1.000,1.000>\r\n");
    controller.update().unwrap();
    transport.push_incoming("<Bogus|WPos:9.000,9.000,9.000>\r\n");
    controller.update().unwrap();

    assert_eq!(controller.machine_state(), MachineState::Idle);
    assert_eq!(controller.work_coordinate_axis(Axis::X), 1.0);
    assert_eq!(listener.events().len(), 1);
}

#[test]
fn test_machine_position_uses_same_line_offset() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);

    transport.push_incoming("<Idle|MPos:10.000,20.000,30.000|WCO:1.000,2.000,3.000>\r\n");
    controller.update().unwrap();

    assert_eq!(controller.work_coordinate_axis(Axis::X), 9.0);
    assert_eq!(controller.work_coordinate_axis(Axis::Y), 18.0);
    assert_eq!(controller.work_coordinate_axis(Axis::Z), 27.0);
    assert_eq!(controller.work_coordinate_offset_axis(Axis::Z), 3.0);
    assert_eq!(controller.machine_coordinate_axis(Axis::Y), 20.0);
}

#[test]
fn test_oversized_offset_ignored() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);

    transport.push_incoming("<Idle|WPos:0,0,0|WCO:1,2,3>\r\n");
    controller.update().unwrap();
    transport.push_incoming("<Idle|WPos:0,0,0|WCO:9,9,9,9,9,9,9>\r\n");
    controller.update().unwrap();

    assert_eq!(controller.work_coordinate_offset_axis(Axis::X), 1.0);
    assert_eq!(controller.work_coordinate_offset_axis(Axis::Z), 3.0);
}

#[test]
fn test_error_response() {
    let (transport, _clock, mut controller) = simulated(Duration::from_millis(1));
    let listener = Arc::new(RecordingListener::default());
    controller.set_listener(listener.clone());
    transport.set_auto_reply(Some(b"error:22\r\n"));

    let err = controller.linear_move(&[(Axis::X, 1.0)], 0.0).unwrap_err();

    assert!(err.is_rejected());
    assert!(err.to_string().contains("error:22"));
    assert_eq!(controller.last_error(), ErrorCode::from_code(22));
    assert_eq!(
        listener.events(),
        vec!["send G1 X1.000 F0.000", "error 22", "ack false"]
    );
}

#[test]
fn test_unknown_error_code_still_rejects() {
    let (transport, _clock, mut controller) = simulated(Duration::from_millis(1));
    transport.set_auto_reply(Some(b"error:99\r\n"));

    let err = controller.send_blocking("G21").unwrap_err();

    assert!(err.is_rejected());
    assert!(controller.last_error().is_none());
}

#[test]
fn test_alarm_recorded() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);
    let listener = Arc::new(RecordingListener::default());
    controller.set_listener(listener.clone());

    transport.push_incoming("ALARM:2\r\n");
    controller.update().unwrap();

    assert_eq!(controller.last_alarm(), Some(Alarm::SoftLimit));
    assert_eq!(listener.events(), vec!["alarm 2"]);
}

#[test]
fn test_high_level_commands_encode() {
    let (transport, _clock, mut controller) = simulated(Duration::from_millis(1));
    transport.set_auto_reply(Some(b"ok\r\n"));

    controller.set_units(Units::Inches).unwrap();
    controller.rapid_move(&[(Axis::Z, 5.0)]).unwrap();
    controller.clear_coordinate_offset().unwrap();
    controller.jog(&[(Axis::X, -1.0)], 300.0).unwrap();
    controller.unlock().unwrap();

    assert_eq!(
        transport.written_lines(),
        vec!["G20", "G0 Z5.000", "G92.1", "$J=X-1.000 F300.000", "$X"]
    );
}

#[test]
fn test_unsolicited_ok_is_harmless() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);
    let listener = Arc::new(RecordingListener::default());
    controller.set_listener(listener.clone());

    transport.push_incoming("ok\r\nok\r\n");
    controller.update().unwrap();

    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(listener.events().is_empty());
}

#[test]
fn test_fire_and_forget_does_not_wait() {
    let (transport, clock, mut controller) = simulated(Duration::from_millis(1));
    let start = clock.peek();

    controller.send("M8").unwrap();

    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(clock.peek() - start < Duration::from_millis(10));
    assert_eq!(transport.written_lines(), vec!["M8"]);
}

#[test]
fn test_overlong_line_counted() {
    let transport = MemoryTransport::new();
    let config = GrblConfig {
        line_buffer_capacity: 24,
        ..GrblConfig::default()
    };
    let mut controller =
        GrblController::with_clock(transport.clone(), config, ManualClock::new()).unwrap();

    transport.push_incoming("[MSG:this line is much longer than twenty-four bytes]\r\n");
    transport.push_incoming("<Idle|WPos:2,0,0>\r\n");
    controller.update().unwrap();

    assert_eq!(controller.overflow_count(), 1);
    assert_eq!(controller.machine_state(), MachineState::Idle);
    assert_eq!(controller.work_coordinate_axis(Axis::X), 2.0);
}

#[test]
fn test_line_split_across_updates() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);

    transport.push_incoming("<Run|WPos:4.0");
    controller.update().unwrap();
    assert_eq!(controller.machine_state(), MachineState::Unknown);

    transport.push_incoming("00,0,0>\r\n");
    controller.update().unwrap();
    assert_eq!(controller.machine_state(), MachineState::Run);
    assert_eq!(controller.work_coordinate_axis(Axis::X), 4.0);
}

#[test]
fn test_event_dispatcher_as_listener() {
    let (transport, _clock, mut controller) = simulated(Duration::ZERO);
    let dispatcher = EventDispatcher::new(16);
    let mut rx = dispatcher.subscribe();
    controller.set_listener(Arc::new(dispatcher));

    transport.push_incoming("<Idle|MPos:0,0,0>\r\n");
    controller.update().unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        GrblEvent::PositionUpdated {
            state: MachineState::Idle,
            mode: CoordinateMode::Machine,
        }
    );
}

#[test]
fn test_update_budget_bounds_draining() {
    let transport = MemoryTransport::new();
    let config = GrblConfig {
        update_budget_ms: 5,
        ..GrblConfig::default()
    };
    let clock = ManualClock::with_auto_advance(Duration::from_millis(1));
    let mut controller = GrblController::with_clock(transport.clone(), config, clock).unwrap();

    transport.push_incoming("<Idle|WPos:1,1,1>\r\n");
    controller.update().unwrap();

    // Budget ran out before the line was complete
    assert_eq!(controller.machine_state(), MachineState::Unknown);
    let mut handle = transport.clone();
    assert!(handle.is_data_available());

    for _ in 0..10 {
        controller.update().unwrap();
    }
    assert_eq!(controller.machine_state(), MachineState::Idle);
}

#[test]
fn test_system_clock_controller() {
    let transport = MemoryTransport::new();
    transport.push_incoming("<Check|WPos:0,0,0>\r\n");
    let mut controller = GrblController::new(transport);
    controller.update().unwrap();
    assert_eq!(controller.machine_state(), MachineState::Check);
}
