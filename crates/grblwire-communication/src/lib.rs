//! # grblwire Communication
//!
//! The GRBL protocol engine: byte transports, line framing, command
//! encoding, status report parsing and the send/acknowledge correlator.

pub mod communication;
pub mod firmware;

pub use communication::{
    list_ports, LineBuffer, Lines, MemoryTransport, SerialParams, SerialTransport, Transport, EOL,
};

pub use firmware::grbl::{
    encode, encoder, Command, CommandParams, ControllerState, CoordinateTracker, GrblConfig,
    GrblController, ParsedLine, Response, StatusParser, StatusReport,
};
