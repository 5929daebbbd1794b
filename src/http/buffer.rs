use std::collections::TryReserveError;

/// Initial capacity of a connection's receive buffer.
pub const INITIAL_CAPACITY: usize = 1024;

/// Growable receive buffer for one connection.
///
/// Incoming bytes are appended in arrival order and kept until the
/// connection is torn down. Capacity at least doubles whenever an append
/// would not fit, so appends stay amortized O(1). The buffer never
/// shrinks; it is released with the connection.
///
/// This is the one place attacker-controlled bytes live. Everything that
/// indexes into it goes through [`as_slice`](RecvBuffer::as_slice), so
/// offsets are checked against the current length rather than trusted.
#[derive(Debug)]
pub struct RecvBuffer {
    bytes: Vec<u8>,
}

impl RecvBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends `chunk` to the end of the buffer, growing if needed.
    ///
    /// Growth reserves at least double the current capacity. A failed
    /// reservation is reported to the caller instead of aborting; the
    /// connection treats it as fatal, the process does not.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), TryReserveError> {
        let needed = self.bytes.len() + chunk.len();
        if needed > self.bytes.capacity() {
            let target = needed.max(self.bytes.capacity() * 2);
            self.bytes.try_reserve_exact(target - self.bytes.len())?;
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    /// All bytes received so far, in arrival order.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}

impl Default for RecvBuffer {
    fn default() -> Self {
        Self::new()
    }
}
