//! # grblwire
//!
//! A client-side engine for the GRBL 1.1 serial protocol:
//! - Resumable line framing of the controller's byte stream
//! - Status report parsing (state, position, offsets, feed and spindle)
//! - Work/machine coordinate tracking
//! - Command encoding with fixed numeric formatting
//! - Send/acknowledge correlation with rate-limited status polling
//!
//! ## Architecture
//!
//! 1. **grblwire-core** - Data model, errors, listener trait, events, clock
//! 2. **grblwire-communication** - Transports, parser, encoder, controller
//! 3. **grblwire** - This facade
//!
//! ## Example
//!
//! ```no_run
//! use grblwire::{Axis, GrblController, SerialParams, SerialTransport};
//!
//! # fn main() -> grblwire::Result<()> {
//! let transport = SerialTransport::open(&SerialParams::new("/dev/ttyUSB0"))?;
//! let mut controller = GrblController::new(transport);
//! controller.rapid_move(&[(Axis::Z, 5.0)])?;
//! loop {
//!     controller.update()?;
//!     println!("{}", controller.machine_coordinate());
//! }
//! # }
//! ```

pub use grblwire_communication::{communication, firmware};
pub use grblwire_core::data;

pub use grblwire_core::{
    to_machine, to_work, Alarm, ArcDirection, Axis, Clock, ConfigError, ConnectionError, Coolant,
    Coordinate, CoordinateMode, CoordinateSystem, DistanceMode, Error, ErrorCode, EventDispatcher,
    GrblEvent, GrblListener, MachineState, ManualClock, OffsetMode, Plane, ProtocolError, Result,
    SpindleDirection, SystemClock, Units, MAX_AXES,
};

pub use grblwire_communication::{
    encode, encoder, list_ports, Command, CommandParams, ControllerState, CoordinateTracker,
    GrblConfig, GrblController, LineBuffer, MemoryTransport, ParsedLine, Response, SerialParams,
    SerialTransport, StatusParser, StatusReport, Transport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
