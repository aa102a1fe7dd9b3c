//! Resolver tunables.

use crate::syntax::codec::MAX_ENCODED_NAME_LEN;

/// Limits used by the path builder, finder and invocation resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolveConfig {
    /// Size in bytes of each scratch path cursor.
    pub scratch_capacity: usize,
    /// Maximum number of alias hops followed before giving up.
    pub max_alias_depth: usize,
}

impl ResolveConfig {
    /// Default scratch cursor size: room for the largest encoded name.
    pub const DEFAULT_SCRATCH: usize = MAX_ENCODED_NAME_LEN;

    /// Default alias hop limit.
    pub const DEFAULT_ALIAS_DEPTH: usize = 32;

    /// Override the scratch cursor size.
    pub fn with_scratch_capacity(mut self, capacity: usize) -> Self {
        self.scratch_capacity = capacity;
        self
    }

    /// Override the alias hop limit.
    pub fn with_max_alias_depth(mut self, depth: usize) -> Self {
        self.max_alias_depth = depth;
        self
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            scratch_capacity: Self::DEFAULT_SCRATCH,
            max_alias_depth: Self::DEFAULT_ALIAS_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fits_largest_name() {
        let config = ResolveConfig::default();
        assert_eq!(config.scratch_capacity, 1 + 255 + 2 + 255 * 4);
        assert_eq!(config.max_alias_depth, 32);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ResolveConfig::default()
            .with_scratch_capacity(64)
            .with_max_alias_depth(2);
        assert_eq!(config.scratch_capacity, 64);
        assert_eq!(config.max_alias_depth, 2);
    }
}
