/// An error representation for mesh and raster operations.
///
/// Indexed access has exactly one way to fail: the index lies outside the
/// valid range. Such a failure is always loud; nothing in this crate clamps
/// an index or silently skips the access.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// The given index is outside the valid range for its subject.
    #[error("{what} {index} out of range, valid range is 0..{len}")]
    OutOfRange {
        /// What was being indexed, e.g. "vertex index" or "raster column".
        what: &'static str,
        /// The offending index.
        index: usize,
        /// The exclusive upper bound of the valid range.
        len: usize,
    },
}

pub type MeshResult<T> = Result<T, MeshError>;
