//! The coverage matrix: one row per module, one cell per coverage column.

mod column;
pub mod overlay;
pub mod seed;

pub use column::{Cell, Column, COLUMN_COUNT, MODULE_HEADER};
pub use overlay::{apply_overlay, build_module_classifications, ModuleClassifications};
pub use seed::seed_matrix;

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRow {
    pub module: String,
    pub cells: [Cell; COLUMN_COUNT],
}

impl CoverageRow {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            cells: [Cell::Empty; COLUMN_COUNT],
        }
    }

    pub fn cell(&self, column: Column) -> Cell {
        self.cells[column.index()]
    }

    /// Raises `column` to at least `state`. Returns whether it changed.
    pub fn raise(&mut self, column: Column, state: Cell) -> bool {
        let cell = &mut self.cells[column.index()];
        if state > *cell {
            *cell = state;
            true
        } else {
            false
        }
    }

    /// Per-column maximum of both rows.
    pub fn merge(&mut self, other: &CoverageRow) {
        for column in Column::ALL {
            self.raise(column, other.cell(column));
        }
    }

    /// CSV fields, `Module` first.
    pub fn fields(&self) -> Vec<&str> {
        std::iter::once(self.module.as_str())
            .chain(self.cells.iter().map(|cell| cell.as_str()))
            .collect()
    }
}

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixSummary {
    pub modules: usize,
    pub tested: usize,
    pub untested: usize,
}

/// Rows in first-seen order with a name index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageMatrix {
    rows: Vec<CoverageRow>,
    index: HashMap<String, usize>,
}

impl CoverageMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header() -> Vec<&'static str> {
        Column::header()
    }

    pub fn rows(&self) -> &[CoverageRow] {
        &self.rows
    }

    pub fn row(&self, module: &str) -> Option<&CoverageRow> {
        self.index.get(module).map(|&i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `module`, appended empty if not yet present.
    pub fn ensure_row(&mut self, module: &str) -> &mut CoverageRow {
        let position = match self.index.get(module) {
            Some(&position) => position,
            None => {
                self.rows.push(CoverageRow::new(module));
                self.index.insert(module.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[position]
    }

    /// Adds `row`, merging into an existing row of the same module.
    pub fn merge_row(&mut self, row: CoverageRow) {
        match self.index.get(&row.module) {
            Some(&position) => self.rows[position].merge(&row),
            None => {
                self.index.insert(row.module.clone(), self.rows.len());
                self.rows.push(row);
            }
        }
    }

    /// Marks `column` as applicable but untested for `module`.
    pub fn seed(&mut self, module: &str, column: Column) {
        self.ensure_row(module).raise(column, Cell::Untested);
    }

    /// Flips an untested cell to tested. Missing modules and empty or
    /// already tested cells are left alone.
    pub fn mark_tested(&mut self, module: &str, column: Column) -> bool {
        let Some(&position) = self.index.get(module) else {
            return false;
        };
        let row = &mut self.rows[position];
        if row.cell(column) == Cell::Untested {
            row.raise(column, Cell::Tested)
        } else {
            false
        }
    }

    pub fn summary(&self) -> MatrixSummary {
        let cells = self.rows.iter().flat_map(|row| row.cells.iter());
        let (tested, untested) = cells.fold((0, 0), |(t, u), cell| match cell {
            Cell::Tested => (t + 1, u),
            Cell::Untested => (t, u + 1),
            Cell::Empty => (t, u),
        });
        MatrixSummary {
            modules: self.rows.len(),
            tested,
            untested,
        }
    }
}
