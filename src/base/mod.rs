//! Foundation types for namespace paths.
//!
//! This module provides the primitives every other layer builds on:
//! - [`NameSeg`] - Fixed 4-byte name segments
//! - [`PathCursor`], [`Direction`] - Directional scratch buffers for paths
//!
//! This module has NO dependencies on other amlns modules except errors.

mod cursor;
mod name_seg;

pub use cursor::{Direction, PathCursor};
pub use name_seg::{NAME_SEG_SIZE, NameSeg, common_prefix_len};
