//! # bpatch
//!
//! Byte-level delta tool: computes a minimal-cost script of single-byte inserts,
//! deletes and replaces turning one byte sequence into another, serializes it as
//! a compact binary patch, and replays the patch against the original bytes to
//! rebuild the target.
//!
//! ## Core Components
//!
//! - [`AlignmentTable`] - Weighted edit-distance table between two inputs
//! - [`diff::path::reconstruct`] - Backtracking the table into [`EditOperation`]s
//! - [`PatchCodec`] - 6-byte record encoding and patch replay
//! - [`DiffEngine`] - Trait tying alignment, codec and replay together
//! - [`Patcher`] - File-level driver
//! - [`PatchConfig`] - Configuration options
//!
//! ## Example Usage
//!
//! ```rust
//! use bpatch::{DiffEngine, LevenshteinDiffEngine};
//!
//! let engine = LevenshteinDiffEngine::new();
//! let patch = engine.compute_diff(b"abc", b"axc").unwrap();
//! assert_eq!(patch.len(), 6);
//!
//! let rebuilt = engine.apply_diff(b"abc", &patch).unwrap();
//! assert_eq!(rebuilt.as_ref(), b"axc");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

pub mod diff;
pub mod fs;
pub mod protocol;

pub use diff::{
    AlignmentTable, Cost, CostModel, DiffEngine, DiffError, EditOperation, LevenshteinDiffEngine,
    PatchCodec, TieBreak,
};
pub use protocol::{ByteOrder, OpCode};

/// Configuration shared by patch producers and consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Operation prices used for alignment
    pub costs: CostModel,
    /// Preference among equally cheap transitions
    pub tie_break: TieBreak,
    /// Byte order of the location field
    pub byte_order: ByteOrder,
    /// Largest alignment table to build, in cells
    pub max_table_cells: usize,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            costs: CostModel::default(),
            tie_break: TieBreak::default(),
            byte_order: ByteOrder::default(),
            max_table_cells: 64 * 1024 * 1024, // ~1 GiB of table
        }
    }
}

impl PatchConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let raw = fs::read_input(path)?;
        let config: Self = serde_json::from_slice(&raw)
            .map_err(|e| PatchError::Config(format!("{}: {}", path.display(), e)))?;
        config
            .validate()
            .map_err(|e| PatchError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Reject settings the aligner cannot honour
    pub fn validate(&self) -> Result<(), String> {
        self.costs.validate()
    }
}

/// Main patch errors
#[derive(Debug, Error)]
pub enum PatchError {
    /// Diff computation, decoding or replay failed
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Summary of a computed patch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Number of insert records
    pub inserts: usize,
    /// Number of delete records
    pub deletes: usize,
    /// Number of replace records
    pub replaces: usize,
    /// Total cost of the edit script
    pub cost: Cost,
    /// Encoded patch size in bytes
    pub patch_len: usize,
}

impl PatchStats {
    /// Tally an edit script
    pub fn from_edits(edits: &[EditOperation], costs: &CostModel, patch_len: usize) -> Self {
        let mut stats = Self {
            cost: diff::path_cost(edits, costs),
            patch_len,
            ..Self::default()
        };
        for edit in edits {
            match edit {
                EditOperation::Insert { .. } => stats.inserts += 1,
                EditOperation::Delete { .. } => stats.deletes += 1,
                EditOperation::Replace { .. } => stats.replaces += 1,
            }
        }
        stats
    }

    /// Total number of records
    pub fn edits(&self) -> usize {
        self.inserts + self.deletes + self.replaces
    }
}

/// Computes patches between files and applies them
pub struct Patcher {
    config: PatchConfig,
    codec: PatchCodec,
    diff_engine: Arc<dyn DiffEngine>,
}

impl Patcher {
    /// Create a new patcher builder
    pub fn builder() -> PatcherBuilder {
        PatcherBuilder::new()
    }

    /// Get patcher configuration
    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Get diff engine reference
    pub fn diff_engine(&self) -> &Arc<dyn DiffEngine> {
        &self.diff_engine
    }

    /// Compute and encode the patch turning `old` into `new`
    pub fn diff(&self, old: &[u8], new: &[u8]) -> Result<(Bytes, PatchStats), PatchError> {
        let edits = self.diff_engine.compute_edits(old, new)?;
        let patch = self.codec.encode(&edits)?;
        let stats = PatchStats::from_edits(&edits, self.diff_engine.costs(), patch.len());
        Ok((patch, stats))
    }

    /// Replay `patch` against `old`
    pub fn apply(&self, old: &[u8], patch: &[u8]) -> Result<Bytes, PatchError> {
        let edits = self.codec.decode(patch)?;
        Ok(PatchCodec::apply_operations(old, &edits)?)
    }

    /// Decode a patch without applying it
    pub fn inspect(&self, patch: &[u8]) -> Result<Vec<EditOperation>, PatchError> {
        Ok(self.codec.decode(patch)?)
    }

    /// Diff two files and write the patch to `patch_path`
    pub fn diff_files(
        &self,
        old_path: &Path,
        new_path: &Path,
        patch_path: &Path,
    ) -> Result<PatchStats, PatchError> {
        let old = fs::read_input(old_path)?;
        let new = fs::read_input(new_path)?;

        let (patch, stats) = self.diff(&old, &new)?;
        fs::write_atomic(patch_path, &patch)?;

        tracing::info!(
            old = %old_path.display(),
            new = %new_path.display(),
            patch = %patch_path.display(),
            edits = stats.edits(),
            cost = stats.cost,
            bytes = stats.patch_len,
            "patch written"
        );
        Ok(stats)
    }

    /// Apply the patch at `patch_path` to `old_path` and write the result to `out_path`
    pub fn apply_files(
        &self,
        old_path: &Path,
        patch_path: &Path,
        out_path: &Path,
    ) -> Result<usize, PatchError> {
        let old = fs::read_input(old_path)?;
        let patch = fs::read_input(patch_path)?;

        let output = self.apply(&old, &patch)?;
        fs::write_atomic(out_path, &output)?;

        tracing::info!(
            old = %old_path.display(),
            patch = %patch_path.display(),
            out = %out_path.display(),
            bytes = output.len(),
            "patch applied"
        );
        Ok(output.len())
    }

    /// Decode the patch file at `patch_path`
    pub fn inspect_file(&self, patch_path: &Path) -> Result<Vec<EditOperation>, PatchError> {
        let patch = fs::read_input(patch_path)?;
        self.inspect(&patch)
    }
}

/// Builder for configuring a [`Patcher`]
pub struct PatcherBuilder {
    config: Option<PatchConfig>,
    diff_engine: Option<Arc<dyn DiffEngine>>,
}

impl PatcherBuilder {
    fn new() -> Self {
        Self {
            config: None,
            diff_engine: None,
        }
    }

    /// Set patcher configuration
    pub fn config(mut self, config: PatchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set diff engine implementation
    ///
    /// Defaults to a [`LevenshteinDiffEngine`] built from the configuration.
    pub fn diff_engine(mut self, diff_engine: Arc<dyn DiffEngine>) -> Self {
        self.diff_engine = Some(diff_engine);
        self
    }

    /// Build the patcher
    pub fn build(self) -> Patcher {
        let config = self.config.unwrap_or_default();
        let diff_engine = self
            .diff_engine
            .unwrap_or_else(|| Arc::new(LevenshteinDiffEngine::from_config(&config)) as Arc<dyn DiffEngine>);

        Patcher {
            codec: PatchCodec::new(config.byte_order),
            config,
            diff_engine,
        }
    }
}
