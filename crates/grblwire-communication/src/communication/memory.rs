//! In-memory transport
//!
//! A loopback stand-in for a serial port. Clones share the same streams, so
//! one handle can be given to the controller while another scripts the
//! controller's replies and inspects what was written.

use super::Transport;
use grblwire_core::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    incoming: VecDeque<u8>,
    /// Bytes released after a number of availability checks
    scheduled: VecDeque<(usize, Vec<u8>)>,
    auto_reply: Option<Vec<u8>>,
    written_lines: Vec<String>,
    written_bytes: Vec<u8>,
}

/// Shared in-memory byte stream
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the engine to read
    pub fn push_incoming(&self, data: impl AsRef<[u8]>) {
        self.state.lock().incoming.extend(data.as_ref());
    }

    /// Queue bytes that become readable after `checks` availability polls
    pub fn push_incoming_after(&self, checks: usize, data: impl AsRef<[u8]>) {
        self.state
            .lock()
            .scheduled
            .push_back((checks, data.as_ref().to_vec()));
    }

    /// Reply with `data` every time a line is written
    pub fn set_auto_reply(&self, data: Option<&[u8]>) {
        self.state.lock().auto_reply = data.map(<[u8]>::to_vec);
    }

    /// Lines written so far, without terminators
    pub fn written_lines(&self) -> Vec<String> {
        self.state.lock().written_lines.clone()
    }

    /// Unterminated bytes written so far
    pub fn written_bytes(&self) -> Vec<u8> {
        self.state.lock().written_bytes.clone()
    }

    /// Forget everything written so far
    pub fn clear_written(&self) {
        let mut state = self.state.lock();
        state.written_lines.clear();
        state.written_bytes.clear();
    }
}

impl Transport for MemoryTransport {
    fn is_data_available(&mut self) -> bool {
        let mut state = self.state.lock();
        if let Some((remaining, _)) = state.scheduled.front_mut() {
            if *remaining == 0 {
                if let Some((_, data)) = state.scheduled.pop_front() {
                    state.incoming.extend(data);
                }
            } else {
                *remaining -= 1;
            }
        }
        !state.incoming.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.state.lock().incoming.pop_front()
    }

    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let mut state = self.state.lock();
        state
            .written_lines
            .push(String::from_utf8_lossy(line).into_owned());
        if let Some(reply) = state.auto_reply.clone() {
            state.incoming.extend(reply);
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.state.lock().written_bytes.push(byte);
        Ok(())
    }
}
