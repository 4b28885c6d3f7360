//! GRBL 1.1 protocol implementation
//!
//! - [`commands`]: the command catalog and wire tokens
//! - [`encoder`]: parameterized command lines
//! - [`status_parser`]: field extraction from received lines
//! - [`tracker`]: work/machine coordinate bookkeeping
//! - [`controller`]: polling and acknowledgement correlation
//! - [`config`]: engine configuration

pub mod commands;
pub mod config;
pub mod controller;
pub mod encoder;
pub mod status_parser;
pub mod tracker;

pub use commands::Command;
pub use config::GrblConfig;
pub use controller::{ControllerState, GrblController};
pub use encoder::{encode, CommandParams};
pub use status_parser::{
    AxisValues, FeedSpindle, ParsedLine, Response, StatusParser, StatusReport,
};
pub use tracker::CoordinateTracker;
