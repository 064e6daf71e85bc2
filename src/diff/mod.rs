//! Diff algorithm

use bytes::Bytes;
use thiserror::Error;

pub mod align;
pub mod binary;
pub mod cost;
pub mod levenshtein;
pub mod path;

pub use align::AlignmentTable;
pub use binary::{EditOperation, PatchCodec, path_cost};
pub use cost::{Cost, CostModel, TieBreak};
pub use levenshtein::LevenshteinDiffEngine;

/// Errors that can occur during diff operations
#[derive(Debug, Error)]
pub enum DiffError {
    /// Patch stream could not be decoded or replayed
    #[error("Malformed patch: {0}")]
    MalformedPatch(String),

    /// Edit location does not fit the 4-byte location field
    #[error("Edit location {location} does not fit in 32 bits")]
    LocationOverflow {
        /// Offending location
        location: usize,
    },

    /// Alignment table would exceed the configured bound
    #[error("Inputs too large to align: {cells} table cells (max: {max_cells})")]
    InputTooLarge {
        /// Cells required, saturated on overflow
        cells: usize,
        /// Configured maximum
        max_cells: usize,
    },
}

/// Trait for diff engines that can compute and apply binary patches
pub trait DiffEngine: Send + Sync {
    /// Compute the edit operations turning `old` into `new`
    ///
    /// # Errors
    /// Returns [`DiffError`] if the inputs cannot be aligned
    fn compute_edits(&self, old: &[u8], new: &[u8]) -> Result<Vec<EditOperation>, DiffError>;

    /// Prices this engine aligns with
    fn costs(&self) -> &CostModel;

    /// Compute binary patch between old and new versions
    ///
    /// # Arguments
    /// * `old` - Original bytes
    /// * `new` - Target bytes
    ///
    /// # Returns
    /// Binary patch that can be applied to transform `old` into `new`
    ///
    /// # Errors
    /// Returns [`DiffError`] if diff computation or encoding fails
    fn compute_diff(&self, old: &[u8], new: &[u8]) -> Result<Bytes, DiffError>;

    /// Apply binary patch to base content
    ///
    /// # Arguments
    /// * `base` - Original bytes the patch was computed against
    /// * `diff` - Binary patch to apply
    ///
    /// # Returns
    /// Result of applying the patch to base content
    ///
    /// # Errors
    /// Returns [`DiffError::MalformedPatch`] if the patch cannot be decoded or replayed
    fn apply_diff(&self, base: &[u8], diff: &[u8]) -> Result<Bytes, DiffError>;
}
