//! Package configuration.

use stepwire_arena::ArenaConfig;

use crate::error::PackageError;

/// Configuration for a [`StepPackage`](crate::StepPackage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageConfig {
    /// Arena tiers, growth policy, and block limit.
    pub arena: ArenaConfig,
    /// Record slots reserved up front. Default: 128.
    pub record_capacity: usize,
    /// Bytes reserved for the record under construction. Default: 1024.
    pub build_buffer_capacity: usize,
}

impl PackageConfig {
    /// Default number of reserved record slots.
    pub const DEFAULT_RECORD_CAPACITY: usize = 128;

    /// Default build buffer reservation in bytes.
    pub const DEFAULT_BUILD_BUFFER_CAPACITY: usize = 1024;

    /// Create a config around the given arena settings.
    pub fn new(arena: ArenaConfig) -> Self {
        Self {
            arena,
            record_capacity: Self::DEFAULT_RECORD_CAPACITY,
            build_buffer_capacity: Self::DEFAULT_BUILD_BUFFER_CAPACITY,
        }
    }

    /// A config whose arena uses uniform blocks of `block_size` bytes.
    ///
    /// Every record is then limited to `block_size` bytes, and
    /// `set_field_value` clamps rebuilt records to `block_size - 1`.
    pub fn uniform(block_size: usize) -> Self {
        Self::new(ArenaConfig::uniform(block_size))
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), PackageError> {
        self.arena.validate()?;
        Ok(())
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}
