//! Serial port transport
//!
//! Adapts a `serialport` handle to the non-blocking [`Transport`] contract:
//! availability is answered from the driver's input queue, reads never wait
//! longer than the configured read timeout.

use super::{Transport, EOL};
use grblwire_core::{ConnectionError, Error, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::time::Duration;

/// Serial connection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialParams {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port: String,
    /// Baud rate, 115200 for GRBL 1.1
    pub baud_rate: u32,
    /// Upper bound for a single read
    pub read_timeout_ms: u64,
}

impl SerialParams {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }
}

impl Default for SerialParams {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 115_200,
            read_timeout_ms: 10,
        }
    }
}

/// List serial ports that look like CNC controllers
///
/// Keeps COM ports on Windows, USB/ACM devices on Linux and USB serial
/// or modem devices on macOS.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports().map_err(|e| {
        tracing::error!("Failed to enumerate serial ports: {}", e);
        ConnectionError::SerialError {
            reason: e.to_string(),
        }
    })?;

    Ok(ports
        .into_iter()
        .map(|port| port.port_name)
        .filter(|name| is_controller_port(name))
        .collect())
}

fn is_controller_port(name: &str) -> bool {
    if let Some(number) = name.strip_prefix("COM") {
        return !number.is_empty() && number.chars().all(|c| c.is_ascii_digit());
    }

    ["/dev/ttyUSB", "/dev/ttyACM", "/dev/cu.usbserial-", "/dev/cu.usbmodem"]
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Transport over a serial port
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open a serial port with the given parameters
    pub fn open(params: &SerialParams) -> Result<Self> {
        let port = serialport::new(&params.port, params.baud_rate)
            .timeout(Duration::from_millis(params.read_timeout_ms))
            .open()
            .map_err(|e| {
                tracing::warn!("Failed to open serial port {}: {}", params.port, e);
                ConnectionError::FailedToOpen {
                    port: params.port.clone(),
                    reason: e.to_string(),
                }
            })?;

        tracing::info!("Opened {} at {} baud", params.port, params.baud_rate);
        Ok(Self::from_port(port))
    }

    /// Wrap an already opened port
    pub fn from_port(port: Box<dyn serialport::SerialPort>) -> Self {
        Self { port }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data).map_err(Error::from)?;
        self.port.flush().map_err(Error::from)
    }
}

impl Transport for SerialTransport {
    fn is_data_available(&mut self) -> bool {
        match self.port.bytes_to_read() {
            Ok(count) => count > 0,
            Err(e) => {
                tracing::warn!("Failed to query serial input queue: {}", e);
                false
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            Ok(_) => None,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => None,
            Err(e) => {
                tracing::warn!("Serial read failed: {}", e);
                None
            }
        }
    }

    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line);
        data.push(EOL);
        self.write_all(&data)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_all(&[byte])
    }
}
