//! Growable text accumulator used to assemble wire responses. Capacity
//! doubles on demand up to a hard byte ceiling set at construction; hitting
//! the ceiling is a recoverable error, not an abort.

use thiserror::Error;

pub const DEFAULT_CAPACITY_LIMIT: usize = 4096;

const INITIAL_CAPACITY: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("appending {requested} byte(s) to {held} held would exceed the {limit}-byte limit")]
    CapacityExceeded {
        requested: usize,
        held: usize,
        limit: usize,
    },
}

#[derive(Debug)]
pub struct ResponseBuffer {
    text: String,
    limit: usize,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_CAPACITY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            text: String::with_capacity(INITIAL_CAPACITY.min(limit)),
            limit,
        }
    }

    /// Fails without modifying the buffer when the result would exceed the
    /// ceiling.
    pub fn append(&mut self, piece: &str) -> Result<(), BufferError> {
        let needed = self.text.len() + piece.len();
        if needed > self.limit {
            return Err(BufferError::CapacityExceeded {
                requested: piece.len(),
                held: self.text.len(),
                limit: self.limit,
            });
        }
        if needed > self.text.capacity() {
            let mut target = self.text.capacity().max(INITIAL_CAPACITY);
            while target < needed {
                target *= 2;
            }
            self.text
                .reserve_exact(target.min(self.limit) - self.text.len());
        }
        self.text.push_str(piece);
        Ok(())
    }

    // Reassignment rather than String::clear so held storage is released.
    pub fn clear(&mut self) {
        self.text = String::new();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new()
    }
}
