//! Weighted edit-distance diff engine producing single-byte edit patches

use super::{
    DiffEngine, DiffError,
    align::AlignmentTable,
    binary::{EditOperation, PatchCodec},
    cost::{CostModel, TieBreak},
    path,
};
use crate::PatchConfig;
use bytes::Bytes;

/// Diff engine computing a minimal-cost byte edit script
pub struct LevenshteinDiffEngine {
    costs: CostModel,
    tie_break: TieBreak,
    codec: PatchCodec,
    max_table_cells: usize,
}

impl LevenshteinDiffEngine {
    /// Create new diff engine with default settings
    pub fn new() -> Self {
        Self::from_config(&PatchConfig::default())
    }

    /// Create new diff engine from configuration
    pub fn from_config(config: &PatchConfig) -> Self {
        Self {
            costs: config.costs,
            tie_break: config.tie_break,
            codec: PatchCodec::new(config.byte_order),
            max_table_cells: config.max_table_cells,
        }
    }

    /// Codec used for the patch stream
    pub fn codec(&self) -> &PatchCodec {
        &self.codec
    }

    /// Fill the alignment table, refusing inputs over the configured bound
    pub fn align(&self, old: &[u8], new: &[u8]) -> Result<AlignmentTable, DiffError> {
        let cells = AlignmentTable::cell_count(old.len(), new.len()).unwrap_or(usize::MAX);
        if cells > self.max_table_cells {
            return Err(DiffError::InputTooLarge {
                cells,
                max_cells: self.max_table_cells,
            });
        }

        Ok(AlignmentTable::compute(old, new, &self.costs, self.tie_break))
    }
}

impl Default for LevenshteinDiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine for LevenshteinDiffEngine {
    fn compute_edits(&self, old: &[u8], new: &[u8]) -> Result<Vec<EditOperation>, DiffError> {
        if old == new {
            return Ok(Vec::new());
        }

        let table = self.align(old, new)?;
        let edits = path::reconstruct(&table, old, new);
        tracing::debug!(
            old_len = old.len(),
            new_len = new.len(),
            cost = table.total_cost(),
            edits = edits.len(),
            "aligned inputs"
        );
        Ok(edits)
    }

    fn costs(&self) -> &CostModel {
        &self.costs
    }

    fn compute_diff(&self, old: &[u8], new: &[u8]) -> Result<Bytes, DiffError> {
        let edits = self.compute_edits(old, new)?;
        self.codec.encode(&edits)
    }

    fn apply_diff(&self, base: &[u8], diff: &[u8]) -> Result<Bytes, DiffError> {
        self.codec.apply_patch(base, diff)
    }
}
