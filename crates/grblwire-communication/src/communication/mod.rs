//! Byte transport underneath the protocol engine
//!
//! The engine talks to the controller through [`Transport`], a small
//! non-blocking byte stream contract. Implementations:
//! - [`serial::SerialTransport`]: a real serial port via the `serialport` crate
//! - [`memory::MemoryTransport`]: an in-memory stream for simulation and tests
//!
//! [`line_buffer::LineBuffer`] frames the incoming byte stream into lines.

pub mod line_buffer;
pub mod memory;
pub mod serial;

pub use line_buffer::{LineBuffer, Lines, EOL};
pub use memory::MemoryTransport;
pub use serial::{list_ports, SerialParams, SerialTransport};

use grblwire_core::Result;

/// Non-blocking duplex byte stream to the controller
pub trait Transport {
    /// Whether at least one byte can be read without blocking
    fn is_data_available(&mut self) -> bool;

    /// Read one byte, `None` if nothing is available
    fn read_byte(&mut self) -> Option<u8>;

    /// Write one line; the implementation appends the [`EOL`] terminator
    fn write_line(&mut self, line: &[u8]) -> Result<()>;

    /// Write a single unterminated byte (realtime commands such as `?`)
    fn write_byte(&mut self, byte: u8) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn is_data_available(&mut self) -> bool {
        (**self).is_data_available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        (**self).write_line(line)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn is_data_available(&mut self) -> bool {
        (**self).is_data_available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        (**self).write_line(line)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }
}
