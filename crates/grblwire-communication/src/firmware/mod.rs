//! Firmware protocol implementations
//!
//! Only GRBL 1.1 is supported.

pub mod grbl;
