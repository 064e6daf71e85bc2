//! Edit cost model

use serde::{Deserialize, Serialize};

/// Cost of a sequence of edits
pub type Cost = u64;

/// Default price of inserting one byte
pub const INSERT_COST: Cost = 3;
/// Default price of deleting one byte
pub const DELETE_COST: Cost = 3;
/// Default price of replacing one byte; cheaper than a delete plus an insert
pub const REPLACE_COST: Cost = 2;

/// Largest accepted price for a single edit
///
/// Keeps `cost * (n + m)` well inside `Cost` for any table that fits in memory.
pub const MAX_COST: Cost = u32::MAX as Cost;

/// Relative prices of the three edit operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    /// Price of one insert
    pub insert: Cost,
    /// Price of one delete
    pub delete: Cost,
    /// Price of one replace
    pub replace: Cost,
}

impl CostModel {
    /// Check every price against [`MAX_COST`]
    ///
    /// # Errors
    /// Returns a description of the first out-of-range price
    pub fn validate(&self) -> Result<(), String> {
        for (name, cost) in [
            ("insert", self.insert),
            ("delete", self.delete),
            ("replace", self.replace),
        ] {
            if cost > MAX_COST {
                return Err(format!("{name} cost {cost} exceeds maximum {MAX_COST}"));
            }
        }
        Ok(())
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            insert: INSERT_COST,
            delete: DELETE_COST,
            replace: REPLACE_COST,
        }
    }
}

/// Transition chosen when several reach a cell with the same minimal cost.
///
/// Different orders produce different, equally minimal, patches. Two tools only
/// produce byte-identical patches for the same inputs if they share the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Prefer delete, then insert, then replace
    #[default]
    DeleteInsertReplace,
    /// Prefer replace, then delete, then insert
    ReplaceDeleteInsert,
}
