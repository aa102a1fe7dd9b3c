//! Binary name prefixes: root, parent-indirection, dual and multi-name markers.
//!
//! An encoded name is laid out as
//!
//! ```text
//! [ '\' | '^'* ] [ NUL | DUAL | MULTI count ]? segment*
//! ```
//!
//! where the root marker and parent markers are mutually exclusive, a single
//! segment has no marker at all, and an empty segment list is written as a
//! null name byte.

use crate::base::{Direction, NAME_SEG_SIZE, PathCursor};
use crate::error::{NamespaceError, Result};

/// Root marker `\`.
pub const ROOT_PREFIX: u8 = 0x5C;
/// Parent-indirection marker `^`.
pub const PARENT_PREFIX: u8 = 0x5E;
/// Two segments follow.
pub const DUAL_NAME_PREFIX: u8 = 0x2E;
/// A count byte and that many segments follow.
pub const MULTI_NAME_PREFIX: u8 = 0x2F;
/// Zero segments.
pub const NULL_NAME: u8 = 0x00;

/// Most segments a single name can carry.
pub const MAX_SEGMENTS: usize = u8::MAX as usize;
/// Most parent-indirection markers a single name can carry.
pub const MAX_PARENT_LEVELS: usize = u8::MAX as usize;
/// Upper bound on the encoded size of any name.
pub const MAX_ENCODED_NAME_LEN: usize = 1 + MAX_PARENT_LEVELS + 2 + MAX_SEGMENTS * NAME_SEG_SIZE;

/// The addressing prefix of an encoded name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NamePrefix {
    /// The name starts at the root.
    pub has_root: bool,
    /// Number of `^` markers.
    pub parent_levels: usize,
    /// Number of 4-byte segments.
    pub segment_count: usize,
}

impl NamePrefix {
    /// Relative with no parent markers: subject to scope search.
    #[inline]
    pub fn is_bare(&self) -> bool {
        !self.has_root && self.parent_levels == 0
    }
}

/// Decode the prefix of an encoded name.
pub fn decode(name: &[u8]) -> Result<NamePrefix> {
    let (prefix, marker_len) = decode_with_len(name)?;
    let available = name.len() - marker_len;
    let needed = prefix.segment_count * NAME_SEG_SIZE;
    if available < needed {
        return Err(NamespaceError::invalid_encoding(format!(
            "name declares {} segment(s) but only {available} byte(s) follow the prefix",
            prefix.segment_count
        )));
    }
    Ok(prefix)
}

/// Decode the prefix and report how many marker bytes it spans.
fn decode_with_len(name: &[u8]) -> Result<(NamePrefix, usize)> {
    let mut prefix = NamePrefix::default();
    let mut pos = 0;

    if name.first() == Some(&ROOT_PREFIX) {
        prefix.has_root = true;
        pos = 1;
        if name.get(pos) == Some(&PARENT_PREFIX) {
            return Err(NamespaceError::invalid_encoding(
                "root marker followed by parent-indirection marker",
            ));
        }
    } else {
        while name.get(pos) == Some(&PARENT_PREFIX) {
            pos += 1;
        }
        prefix.parent_levels = pos;
        if prefix.parent_levels > MAX_PARENT_LEVELS {
            return Err(NamespaceError::invalid_encoding(format!(
                "{} parent-indirection markers exceed the limit of {MAX_PARENT_LEVELS}",
                prefix.parent_levels
            )));
        }
    }

    let rest = &name[pos..];
    let marker_len = match rest.first() {
        None => 0,
        Some(&NULL_NAME) => 1,
        Some(&DUAL_NAME_PREFIX) => {
            prefix.segment_count = 2;
            1
        }
        Some(&MULTI_NAME_PREFIX) => {
            let count = rest
                .get(1)
                .ok_or_else(|| NamespaceError::invalid_encoding("multi-name marker without count"))?;
            prefix.segment_count = usize::from(*count);
            2
        }
        Some(_) if rest.len() >= NAME_SEG_SIZE => {
            prefix.segment_count = 1;
            0
        }
        Some(_) => {
            return Err(NamespaceError::invalid_encoding(format!(
                "{} trailing byte(s) do not form a name segment",
                rest.len()
            )));
        }
    };

    Ok((prefix, pos + marker_len))
}

/// The bytes of `name` just past its root/parent and segment-count markers.
pub fn first_segment(name: &[u8], has_root: bool, parent_levels: usize) -> &[u8] {
    let markers = if has_root { 1 } else { parent_levels };
    let pos = markers.min(name.len());
    let rest = &name[pos..];
    let skip = match rest.first() {
        Some(&NULL_NAME) | Some(&DUAL_NAME_PREFIX) => 1,
        Some(&MULTI_NAME_PREFIX) => 2,
        _ => 0,
    };
    &rest[skip.min(rest.len())..]
}

/// The concatenated segment bytes of an encoded name.
pub fn raw_segments(name: &[u8]) -> Result<&[u8]> {
    let prefix = decode(name)?;
    let segments = first_segment(name, prefix.has_root, prefix.parent_levels);
    Ok(&segments[..prefix.segment_count * NAME_SEG_SIZE])
}

/// Encoded size of a name with the given prefix.
pub fn encoded_size(has_root: bool, parent_levels: usize, segment_count: usize) -> Result<usize> {
    if segment_count > MAX_SEGMENTS {
        return Err(NamespaceError::invalid_encoding(format!(
            "{segment_count} segments exceed the limit of {MAX_SEGMENTS}"
        )));
    }
    if has_root && parent_levels != 0 {
        return Err(NamespaceError::invalid_encoding(
            "a name cannot be both absolute and parent-relative",
        ));
    }
    if parent_levels > MAX_PARENT_LEVELS {
        return Err(NamespaceError::invalid_encoding(format!(
            "{parent_levels} parent levels exceed the limit of {MAX_PARENT_LEVELS}"
        )));
    }
    let markers = usize::from(has_root) + parent_levels;
    Ok(markers + count_marker(segment_count).len() + segment_count * NAME_SEG_SIZE)
}

/// Encode a complete name from its prefix and raw segment bytes.
pub fn encode_name(has_root: bool, parent_levels: usize, segments: &[u8]) -> Result<Vec<u8>> {
    if segments.len() % NAME_SEG_SIZE != 0 {
        return Err(NamespaceError::invalid_encoding(format!(
            "{} segment bytes is not a whole number of segments",
            segments.len()
        )));
    }
    let segment_count = segments.len() / NAME_SEG_SIZE;
    let mut out = Vec::with_capacity(encoded_size(has_root, parent_levels, segment_count)?);
    if has_root {
        out.push(ROOT_PREFIX);
    }
    out.extend(std::iter::repeat_n(PARENT_PREFIX, parent_levels));
    out.extend_from_slice(&count_marker(segment_count));
    out.extend_from_slice(segments);
    Ok(out)
}

/// Prepend the root marker and segment-count marker to a backward cursor
/// that holds raw segments.
pub fn add_absolute_prefix(cursor: &mut PathCursor) -> Result<()> {
    if cursor.direction() != Direction::Backward {
        return Err(NamespaceError::invalid_parameter(
            "absolute prefix needs a backward cursor",
        ));
    }
    let written = cursor.written();
    if written % NAME_SEG_SIZE != 0 {
        return Err(NamespaceError::invalid_encoding(format!(
            "cursor holds {written} bytes, not a whole number of segments"
        )));
    }
    let segment_count = written / NAME_SEG_SIZE;
    if segment_count > MAX_SEGMENTS {
        return Err(NamespaceError::invalid_encoding(format!(
            "{segment_count} segments exceed the limit of {MAX_SEGMENTS}"
        )));
    }
    let marker = count_marker(segment_count);
    let mut prefix = Vec::with_capacity(1 + marker.len());
    prefix.push(ROOT_PREFIX);
    prefix.extend_from_slice(&marker);
    cursor.write(&prefix)
}

/// Remove the leading markers from a backward cursor holding an encoded name,
/// leaving only its segments. Returns the decoded prefix.
pub fn strip_prefix(cursor: &mut PathCursor) -> Result<NamePrefix> {
    if cursor.direction() != Direction::Backward {
        return Err(NamespaceError::invalid_parameter(
            "prefix stripping needs a backward cursor",
        ));
    }
    let content = cursor.as_bytes();
    let prefix = decode(content)?;
    let (_, marker_len) = decode_with_len(content)?;
    cursor.rewind(marker_len)?;
    if cursor.written() != prefix.segment_count * NAME_SEG_SIZE {
        return Err(NamespaceError::invalid_encoding(format!(
            "{} byte(s) after the prefix, expected {} segment(s)",
            cursor.written(),
            prefix.segment_count
        )));
    }
    Ok(prefix)
}

/// Marker bytes announcing `segment_count` segments.
fn count_marker(segment_count: usize) -> Vec<u8> {
    match segment_count {
        0 => vec![NULL_NAME],
        1 => Vec::new(),
        2 => vec![DUAL_NAME_PREFIX],
        // Callers bound the count to MAX_SEGMENTS.
        n => vec![MULTI_NAME_PREFIX, n as u8],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"MET0".as_slice(), false, 0, 1)]
    #[case(b"\\MET0".as_slice(), true, 0, 1)]
    #[case(b"^^MET0".as_slice(), false, 2, 1)]
    #[case(b"\\\x2EAAAABBBB".as_slice(), true, 0, 2)]
    #[case(b"^\x2F\x03AAAABBBBCCCC".as_slice(), false, 1, 3)]
    #[case(b"\\\x00".as_slice(), true, 0, 0)]
    #[case(b"\\".as_slice(), true, 0, 0)]
    #[case(b"^^".as_slice(), false, 2, 0)]
    #[case(b"".as_slice(), false, 0, 0)]
    fn test_decode(
        #[case] name: &[u8],
        #[case] has_root: bool,
        #[case] parent_levels: usize,
        #[case] segment_count: usize,
    ) {
        let prefix = decode(name).unwrap();
        assert_eq!(
            prefix,
            NamePrefix {
                has_root,
                parent_levels,
                segment_count
            }
        );
    }

    #[rstest]
    #[case(b"\\^MET0".as_slice())]
    #[case(b"\\\x2EAAAA".as_slice())]
    #[case(b"\x2F".as_slice())]
    #[case(b"\x2F\x03AAAABBBB".as_slice())]
    #[case(b"ME".as_slice())]
    fn test_decode_rejects(#[case] name: &[u8]) {
        assert!(matches!(
            decode(name),
            Err(NamespaceError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_first_segment_skips_markers() {
        assert_eq!(first_segment(b"\\\x2EAAAABBBB", true, 0), b"AAAABBBB");
        assert_eq!(first_segment(b"^^\x2F\x03AAAABBBBCCCC", false, 2), b"AAAABBBBCCCC");
        assert_eq!(first_segment(b"MET0", false, 0), b"MET0");
        assert_eq!(first_segment(b"\\\x00", true, 0), b"");
    }

    #[test]
    fn test_raw_segments_ignores_trailing_bytes() {
        assert_eq!(raw_segments(b"^MET0").unwrap(), b"MET0");
        assert_eq!(raw_segments(b"\x2EAAAABBBBXX").unwrap(), b"AAAABBBB");
    }

    #[test]
    fn test_encoded_size() {
        assert_eq!(encoded_size(true, 0, 0).unwrap(), 2);
        assert_eq!(encoded_size(false, 0, 1).unwrap(), 4);
        assert_eq!(encoded_size(false, 3, 2).unwrap(), 3 + 1 + 8);
        assert_eq!(encoded_size(true, 0, 5).unwrap(), 1 + 2 + 20);
        assert!(encoded_size(false, 0, 256).is_err());
        assert!(encoded_size(true, 1, 1).is_err());
    }

    #[test]
    fn test_encode_then_decode_matches_size() {
        let name = encode_name(false, 2, b"AAAABBBBCCCC").unwrap();
        assert_eq!(name.len(), encoded_size(false, 2, 3).unwrap());
        let prefix = decode(&name).unwrap();
        assert_eq!(prefix.parent_levels, 2);
        assert_eq!(prefix.segment_count, 3);
    }

    #[rstest]
    #[case(b"".as_slice(), b"\\\x00".as_slice())]
    #[case(b"AAAA".as_slice(), b"\\AAAA".as_slice())]
    #[case(b"AAAABBBB".as_slice(), b"\\\x2EAAAABBBB".as_slice())]
    #[case(b"AAAABBBBCCCC".as_slice(), b"\\\x2F\x03AAAABBBBCCCC".as_slice())]
    fn test_add_absolute_prefix(#[case] raw: &[u8], #[case] expected: &[u8]) {
        let mut cursor = PathCursor::backward(32).unwrap();
        cursor.write(raw).unwrap();
        add_absolute_prefix(&mut cursor).unwrap();
        assert_eq!(cursor.as_bytes(), expected);

        strip_prefix(&mut cursor).unwrap();
        assert_eq!(cursor.as_bytes(), raw);
    }

    #[test]
    fn test_add_absolute_prefix_without_room() {
        let mut cursor = PathCursor::backward(8).unwrap();
        cursor.write(b"AAAABBBB").unwrap();
        assert!(matches!(
            add_absolute_prefix(&mut cursor),
            Err(NamespaceError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_strip_prefix_reports_parent_levels() {
        let mut cursor = PathCursor::backward(16).unwrap();
        cursor.write(b"^^CCCC").unwrap();
        let prefix = strip_prefix(&mut cursor).unwrap();
        assert_eq!(prefix.parent_levels, 2);
        assert!(!prefix.is_bare());
        assert_eq!(cursor.as_bytes(), b"CCCC");
    }

    #[test]
    fn test_strip_prefix_rejects_forward_cursor() {
        let mut cursor = PathCursor::forward(8).unwrap();
        cursor.write(b"\\AAAA").unwrap();
        assert!(strip_prefix(&mut cursor).is_err());
    }
}
