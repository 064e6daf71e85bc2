//! Weighted edit-distance table between two byte sequences
//!
//! Cell `(i, j)` holds the minimal cost of turning the first `i` bytes of the
//! original into the first `j` bytes of the target, and the step that reached it.
//! The table is `O(n * m)` in both time and memory. Costs saturate at
//! `Cost::MAX` rather than wrapping.

use super::cost::{Cost, CostModel, TieBreak};

/// How a cell was reached from its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Cell `(0, 0)`, no predecessor
    Start,
    /// From `(i - 1, j)`: original byte `i - 1` dropped
    Delete,
    /// From `(i, j - 1)`: target byte `j - 1` inserted
    Insert,
    /// From `(i - 1, j - 1)`: match or replace
    Diagonal,
}

/// One entry of the alignment table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Minimal cost of this prefix pair
    pub cost: Cost,
    /// Transition that achieved `cost`
    pub step: Step,
}

/// Dynamic-programming table for two byte sequences
#[derive(Debug, Clone)]
pub struct AlignmentTable {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl AlignmentTable {
    /// Number of cells needed to align sequences of the given lengths, `None` on overflow
    pub fn cell_count(original_len: usize, target_len: usize) -> Option<usize> {
        original_len
            .checked_add(1)?
            .checked_mul(target_len.checked_add(1)?)
    }

    /// Fill the table for `original` and `target`
    pub fn compute(
        original: &[u8],
        target: &[u8],
        costs: &CostModel,
        tie_break: TieBreak,
    ) -> Self {
        let rows = original.len() + 1;
        let cols = target.len() + 1;
        let mut cells = Vec::with_capacity(rows * cols);

        cells.push(Cell {
            cost: 0,
            step: Step::Start,
        });
        for j in 1..cols {
            let cost = cells[j - 1].cost.saturating_add(costs.insert);
            cells.push(Cell {
                cost,
                step: Step::Insert,
            });
        }

        for i in 1..rows {
            let up = (i - 1) * cols;
            let here = i * cols;

            let cost = cells[up].cost.saturating_add(costs.delete);
            cells.push(Cell {
                cost,
                step: Step::Delete,
            });

            for j in 1..cols {
                let diagonal = cells[up + j - 1].cost;
                let cell = if original[i - 1] == target[j - 1] {
                    Cell {
                        cost: diagonal,
                        step: Step::Diagonal,
                    }
                } else {
                    let delete = Cell {
                        cost: cells[up + j].cost.saturating_add(costs.delete),
                        step: Step::Delete,
                    };
                    let insert = Cell {
                        cost: cells[here + j - 1].cost.saturating_add(costs.insert),
                        step: Step::Insert,
                    };
                    let replace = Cell {
                        cost: diagonal.saturating_add(costs.replace),
                        step: Step::Diagonal,
                    };
                    match tie_break {
                        TieBreak::DeleteInsertReplace => cheapest([delete, insert, replace]),
                        TieBreak::ReplaceDeleteInsert => cheapest([replace, delete, insert]),
                    }
                };
                cells.push(cell);
            }
        }

        Self { rows, cols, cells }
    }

    /// Length of the original sequence
    pub fn original_len(&self) -> usize {
        self.rows - 1
    }

    /// Length of the target sequence
    pub fn target_len(&self) -> usize {
        self.cols - 1
    }

    /// Cell at `(i, j)`
    ///
    /// # Panics
    /// Panics if `i > original_len()` or `j > target_len()`
    pub fn cell(&self, i: usize, j: usize) -> Cell {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of range");
        self.cells[i * self.cols + j]
    }

    /// Predecessor coordinates of `(i, j)`, `None` for `(0, 0)`
    pub fn predecessor(&self, i: usize, j: usize) -> Option<(usize, usize)> {
        match self.cell(i, j).step {
            Step::Start => None,
            Step::Delete => Some((i - 1, j)),
            Step::Insert => Some((i, j - 1)),
            Step::Diagonal => Some((i - 1, j - 1)),
        }
    }

    /// Minimal cost of the whole transformation
    pub fn total_cost(&self) -> Cost {
        self.cell(self.original_len(), self.target_len()).cost
    }
}

/// First candidate with the lowest cost; later candidates win only when strictly cheaper
fn cheapest(candidates: [Cell; 3]) -> Cell {
    let [first, rest @ ..] = candidates;
    rest.into_iter()
        .fold(first, |best, next| if next.cost < best.cost { next } else { best })
}
