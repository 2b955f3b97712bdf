//! Error types for package decode, build, and mutation.

use std::error::Error;
use std::fmt;

use stepwire_arena::ArenaError;

/// Errors returned by [`StepPackage`](crate::StepPackage) operations.
///
/// Field lookups never fail; a missing field is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackageError {
    /// `set_package` was given an empty message.
    EmptyPackage,
    /// `set_package_head` input has no line terminator after the header.
    MissingHeaderTerminator,
    /// No current record, or the current record is empty.
    NoCurrentRecord,
    /// The arena could not store a record. The message should be
    /// discarded rather than retried in place.
    Arena(ArenaError),
}

impl fmt::Display for PackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPackage => write!(f, "package is empty"),
            Self::MissingHeaderTerminator => write!(f, "header line is not terminated"),
            Self::NoCurrentRecord => write!(f, "no current record"),
            Self::Arena(e) => write!(f, "arena: {e}"),
        }
    }
}

impl Error for PackageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for PackageError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
