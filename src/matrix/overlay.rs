use std::collections::{BTreeMap, BTreeSet};

use super::{Column, CoverageMatrix};
use crate::describe::TestRecord;
use crate::environment::EnvironmentTable;

/// Module name → columns some test covers it in.
pub type ModuleClassifications = BTreeMap<String, BTreeSet<Column>>;

/// Collects, for every module a test declares, the columns of that test's
/// valid environments. Unrecognized environments are dropped; a module
/// whose tests only list unrecognized environments keeps an empty set.
pub fn build_module_classifications(
    records: &[TestRecord],
    table: &EnvironmentTable,
) -> ModuleClassifications {
    let mut classifications = ModuleClassifications::new();

    for record in records {
        let columns: Vec<Column> = record
            .valid_environments
            .iter()
            .filter_map(|environment| table.classify(environment).column())
            .collect();

        for module in &record.modules {
            classifications
                .entry(module.clone())
                .or_default()
                .extend(columns.iter().copied());
        }
    }

    for (module, columns) in &classifications {
        let names: Vec<_> = columns.iter().map(Column::as_str).collect();
        tracing::debug!("Tests exist for module: {module}, classifications: {names:?}");
    }

    classifications
}

/// Flips `FALSE` to `TRUE` for every classified (module, column) pair.
/// Returns the number of cells flipped.
pub fn apply_overlay(
    matrix: &mut CoverageMatrix,
    classifications: &ModuleClassifications,
) -> usize {
    let mut flipped = 0;
    for (module, columns) in classifications {
        if matrix.row(module).is_none() {
            tracing::debug!("Tested module {module} was not discovered");
            continue;
        }
        for column in columns {
            if matrix.mark_tested(module, *column) {
                flipped += 1;
            }
        }
    }
    flipped
}
