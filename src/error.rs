//! Error types for `bst_symtab`.

use thiserror::Error;

/// Result type alias using our [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// The failures a [`BstMap`](crate::BstMap) reports as errors.
///
/// Lookups that find nothing return `None` instead.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// [`select`](crate::BstMap::select) was given an index outside `0..len`.
    #[error("index {index} out of range for map of length {len}")]
    OutOfRange {
        /// The requested rank.
        index: usize,
        /// The map's length at the time of the call.
        len: usize,
    },
}
