//! Conversion between ASL path text (`\_SB.PCI0`, `^^FOO`) and encoded names.

use smol_str::SmolStr;

use crate::base::{NAME_SEG_SIZE, NameSeg};
use crate::error::{NamespaceError, Result};

use super::codec::{self, MAX_PARENT_LEVELS};

/// Encode an ASL path as a binary name.
pub fn asl_to_aml(text: &str) -> Result<Vec<u8>> {
    let (has_root, rest) = match text.strip_prefix('\\') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let parent_levels = rest.bytes().take_while(|&b| b == b'^').count();
    if has_root && parent_levels != 0 {
        return Err(NamespaceError::invalid_encoding(format!(
            "'{text}' mixes root and parent prefixes"
        )));
    }
    if parent_levels > MAX_PARENT_LEVELS {
        return Err(NamespaceError::invalid_encoding(format!(
            "'{text}' has more than {MAX_PARENT_LEVELS} parent prefixes"
        )));
    }
    let rest = &rest[parent_levels..];

    let mut segments = Vec::with_capacity(rest.len());
    if !rest.is_empty() {
        for part in rest.split('.') {
            let seg: NameSeg = part.parse()?;
            segments.extend_from_slice(seg.as_bytes());
        }
    }

    codec::encode_name(has_root, parent_levels, &segments)
}

/// Render a binary name as ASL text.
pub fn aml_to_asl(name: &[u8]) -> Result<SmolStr> {
    let prefix = codec::decode(name)?;
    let segments = codec::raw_segments(name)?;

    let mut text = String::with_capacity(1 + prefix.parent_levels + segments.len() * 5 / 4);
    if prefix.has_root {
        text.push('\\');
    }
    text.extend(std::iter::repeat_n('^', prefix.parent_levels));
    for (i, chunk) in segments.chunks_exact(NAME_SEG_SIZE).enumerate() {
        if i > 0 {
            text.push('.');
        }
        text.push_str(NameSeg::read(chunk)?.as_str());
    }
    Ok(SmolStr::from(text))
}
