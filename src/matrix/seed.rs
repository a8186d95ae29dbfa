use super::{Cell, CoverageMatrix};
use crate::discovery::ModuleInventory;

/// Builds the untested matrix from discovery: every applicable
/// (module, column) cell starts as `FALSE`.
///
/// A module found under several categories lands in a single row. A
/// compiler-split MPI module with no recognised compiler sub-path still
/// gets a row, with all cells empty.
pub fn seed_matrix(inventory: &ModuleInventory) -> CoverageMatrix {
    let mut matrix = CoverageMatrix::new();

    for (category, module) in inventory.iter() {
        let row = matrix.ensure_row(&module.name);
        for column in category.seed_columns(&module.compilers) {
            row.raise(column, Cell::Untested);
        }
    }

    tracing::debug!("Seeded {} module rows", matrix.len());
    matrix
}
