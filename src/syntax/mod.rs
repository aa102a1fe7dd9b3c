//! Name syntax: the binary prefix codec and ASL text conversion.

pub mod codec;
pub mod text;

pub use codec::{NamePrefix, add_absolute_prefix, decode, encoded_size, strip_prefix};
pub use text::{aml_to_asl, asl_to_aml};
