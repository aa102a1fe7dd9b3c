//! Directional byte cursor over a fixed-size scratch buffer.

use std::fmt;

use crate::error::{NamespaceError, Result};

/// Which end of the buffer a [`PathCursor`] writes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Writes append after the current content.
    Forward,
    /// Writes prepend before the current content; the buffer fills from the
    /// high end.
    Backward,
}

/// A fixed-capacity byte buffer written in one direction.
///
/// Namespace paths are discovered leaf first but read root first, so the
/// builder writes through a [`Direction::Backward`] cursor: each write lands
/// in front of the previous one without moving any bytes.
///
/// The capacity never grows. Running out of space is reported as
/// [`NamespaceError::BufferTooSmall`].
#[derive(Clone, PartialEq, Eq)]
pub struct PathCursor {
    buf: Box<[u8]>,
    direction: Direction,
    /// Forward: one past the last written byte. Backward: first written byte.
    index: usize,
}

impl PathCursor {
    /// Create a cursor that appends.
    pub fn forward(capacity: usize) -> Result<Self> {
        Self::with_direction(Direction::Forward, capacity)
    }

    /// Create a cursor that prepends.
    pub fn backward(capacity: usize) -> Result<Self> {
        Self::with_direction(Direction::Backward, capacity)
    }

    /// Create an empty cursor writing in `direction`.
    pub fn with_direction(direction: Direction, capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity).map_err(|err| {
            NamespaceError::OutOfResources(format!("scratch cursor of {capacity} bytes: {err}"))
        })?;
        buf.resize(capacity, 0);
        let index = match direction {
            Direction::Forward => 0,
            Direction::Backward => capacity,
        };
        Ok(Self {
            buf: buf.into_boxed_slice(),
            direction,
            index,
        })
    }

    /// The direction this cursor writes in.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Total buffer size.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn written(&self) -> usize {
        match self.direction {
            Direction::Forward => self.index,
            Direction::Backward => self.buf.len() - self.index,
        }
    }

    /// Bytes still available for writing.
    #[inline]
    pub fn free_space(&self) -> usize {
        self.capacity() - self.written()
    }

    /// Current write index into the underlying buffer.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check whether nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written() == 0
    }

    /// The written content, in buffer (root to leaf) order.
    pub fn as_bytes(&self) -> &[u8] {
        match self.direction {
            Direction::Forward => &self.buf[..self.index],
            Direction::Backward => &self.buf[self.index..],
        }
    }

    /// Write `bytes` as one block.
    ///
    /// A backward cursor places the block in front of everything written
    /// before; the block itself keeps its byte order.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let available = self.free_space();
        if bytes.len() > available {
            return Err(NamespaceError::BufferTooSmall {
                needed: bytes.len(),
                available,
            });
        }
        match self.direction {
            Direction::Forward => {
                self.buf[self.index..self.index + bytes.len()].copy_from_slice(bytes);
                self.index += bytes.len();
            }
            Direction::Backward => {
                self.index -= bytes.len();
                self.buf[self.index..self.index + bytes.len()].copy_from_slice(bytes);
            }
        }
        Ok(())
    }

    /// Un-write the `count` most recently written bytes.
    ///
    /// On a backward cursor these are the leading bytes of the content.
    pub fn rewind(&mut self, count: usize) -> Result<()> {
        if count > self.written() {
            return Err(NamespaceError::invalid_parameter(format!(
                "cannot rewind {count} bytes, only {} written",
                self.written()
            )));
        }
        match self.direction {
            Direction::Forward => self.index -= count,
            Direction::Backward => self.index += count,
        }
        Ok(())
    }

    /// Compare the next `count` bytes of two cursors.
    pub fn starts_with_same(&self, other: &PathCursor, count: usize) -> bool {
        match (self.as_bytes().get(..count), other.as_bytes().get(..count)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Drop all content, keeping the allocation.
    pub fn reset(&mut self) {
        self.index = match self.direction {
            Direction::Forward => 0,
            Direction::Backward => self.buf.len(),
        };
    }

    /// Copy the content out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl fmt::Debug for PathCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathCursor")
            .field("direction", &self.direction)
            .field("written", &self.written())
            .field("capacity", &self.capacity())
            .finish()
    }
}
