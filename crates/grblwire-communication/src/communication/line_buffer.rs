//! Line framing for the incoming byte stream
//!
//! GRBL terminates every line with `\r\n`. The carriage return ends a line;
//! line feeds and blank lines are dropped. Partial lines are kept across
//! calls, so bytes can be fed as they trickle in from the port.
//!
//! # Overflow
//!
//! The accumulator never grows past its configured capacity. When a byte
//! arrives that would push a partial line past the limit, the partial line
//! is discarded, [`LineBuffer::overflow_count`] is incremented, and every
//! byte up to the next terminator is skipped. The tail of an overlong line
//! is therefore never mistaken for a line of its own.

/// Line terminator
pub const EOL: u8 = b'\r';

/// Default accumulator capacity, matching GRBL's own line limit
pub const DEFAULT_CAPACITY: usize = 128;

/// Bounded, resumable line accumulator
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buf: Vec<u8>,
    capacity: usize,
    discarding: bool,
    overflow_count: u64,
}

impl LineBuffer {
    /// Create a buffer holding at most `capacity` bytes of a partial line
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            discarding: false,
            overflow_count: 0,
        }
    }

    /// Accept one byte, returning a line when it completes one
    pub fn push(&mut self, byte: u8) -> Option<String> {
        match byte {
            EOL => {
                if self.discarding {
                    self.discarding = false;
                    return None;
                }
                let line = std::mem::take(&mut self.buf);
                Self::finish(&line)
            }
            b'\n' => None,
            _ if self.discarding => None,
            _ => {
                if self.buf.len() >= self.capacity {
                    self.overflow_count += 1;
                    self.buf.clear();
                    self.discarding = true;
                    tracing::warn!(
                        "Line exceeded {} bytes, discarding until next terminator",
                        self.capacity
                    );
                    return None;
                }
                self.buf.push(byte);
                None
            }
        }
    }

    /// Feed a chunk of bytes, yielding each line it completes
    ///
    /// The iterator is lazy: bytes are consumed only as it is advanced, so
    /// it must be driven to the end for the whole chunk to be taken in.
    #[must_use = "bytes are only consumed as the iterator is advanced"]
    pub fn feed<'a>(&'a mut self, bytes: &'a [u8]) -> Lines<'a> {
        Lines {
            buffer: self,
            bytes: bytes.iter(),
        }
    }

    /// Number of overlong lines discarded so far
    pub fn overflow_count(&self) -> u64 {
        self.overflow_count
    }

    /// Bytes of the current partial line
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop any partial line and leave discard mode
    pub fn clear(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }

    fn finish(raw: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Lines completed by one [`LineBuffer::feed`] call
pub struct Lines<'a> {
    buffer: &'a mut LineBuffer,
    bytes: std::slice::Iter<'a, u8>,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for &byte in self.bytes.by_ref() {
            if let Some(line) = self.buffer.push(byte) {
                return Some(line);
            }
        }
        None
    }
}
