//! # grblwire Core
//!
//! Core types, traits, and utilities for grblwire.
//! Provides the data model shared by the protocol engine (axes, coordinates,
//! machine states, fault codes), error types, the listener interface,
//! event dispatch, and the clock abstraction.

pub mod core;
pub mod data;
pub mod error;

pub use crate::core::{Clock, EventDispatcher, GrblEvent, GrblListener, ManualClock, SystemClock};

pub use data::{
    to_machine, to_work, Alarm, ArcDirection, Axis, Coolant, Coordinate, CoordinateMode,
    CoordinateSystem, DistanceMode, ErrorCode, MachineState, OffsetMode, Plane, SpindleDirection,
    Units, MAX_AXES,
};

pub use error::{ConfigError, ConnectionError, Error, ProtocolError, Result};
