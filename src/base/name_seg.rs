//! Fixed-width name segments.

use std::fmt;
use std::str::FromStr;

use crate::error::{NamespaceError, Result};

/// Size in bytes of one name segment.
pub const NAME_SEG_SIZE: usize = 4;

/// A single 4-byte name segment, e.g. `_SB_` or `MET0`.
///
/// `NameSeg` is the atomic unit of every namespace path. Segments compare by
/// their fixed-width bytes, never as strings, so `AB` and `AB__` are the same
/// segment once parsed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NameSeg([u8; NAME_SEG_SIZE]);

impl NameSeg {
    /// Build a segment from raw bytes, validating the character rules.
    pub fn from_bytes(bytes: [u8; NAME_SEG_SIZE]) -> Result<Self> {
        if !is_lead_char(bytes[0]) || !bytes[1..].iter().all(|&b| is_name_char(b)) {
            return Err(NamespaceError::invalid_encoding(format!(
                "invalid name segment bytes {bytes:02X?}"
            )));
        }
        Ok(Self(bytes))
    }

    /// Read the segment at the start of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let chunk: [u8; NAME_SEG_SIZE] = bytes
            .get(..NAME_SEG_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| NamespaceError::invalid_encoding("truncated name segment"))?;
        Self::from_bytes(chunk)
    }

    /// The raw bytes of this segment.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; NAME_SEG_SIZE] {
        &self.0
    }

    /// The segment as text. Always four characters; padding is kept.
    pub fn as_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl FromStr for NameSeg {
    type Err = NamespaceError;

    /// Parse an ASL segment: 1-4 characters, padded with `_`, case-folded.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > NAME_SEG_SIZE {
            return Err(NamespaceError::invalid_encoding(format!(
                "name segment '{s}' must be 1 to {NAME_SEG_SIZE} characters"
            )));
        }
        let mut bytes = [b'_'; NAME_SEG_SIZE];
        for (slot, b) in bytes.iter_mut().zip(s.bytes()) {
            *slot = b.to_ascii_uppercase();
        }
        Self::from_bytes(bytes).map_err(|_| {
            NamespaceError::invalid_encoding(format!("invalid name segment '{s}'"))
        })
    }
}

impl fmt::Debug for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameSeg({})", self.as_str())
    }
}

impl fmt::Display for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
fn is_lead_char(b: u8) -> bool {
    b.is_ascii_uppercase() || b == b'_'
}

#[inline]
fn is_name_char(b: u8) -> bool {
    is_lead_char(b) || b.is_ascii_digit()
}

/// Number of whole segments shared at the start of two raw paths, in bytes.
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.chunks_exact(NAME_SEG_SIZE)
        .zip(b.chunks_exact(NAME_SEG_SIZE))
        .take_while(|(x, y)| x == y)
        .count()
        * NAME_SEG_SIZE
}
