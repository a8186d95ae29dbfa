//! Classification of ReFrame programming environment names into report
//! columns.

mod table;

pub use table::EnvironmentTable;

use std::fmt;

use crate::matrix::Column;

/// Rendering of an environment name missing from the table.
pub const UNKNOWN: &str = "UNKNOWN";

/// Built-in environment names of the reference deployment.
pub const BUILTIN_ENVIRONMENTS: &[(&str, Column)] = &[
    ("gcc-12", Column::Gcc),
    ("intel-2021", Column::Intel),
    ("intel-2021-mva2-2.3.7-1", Column::IntelMva2),
    ("intel-2021-ompi-4.1.5", Column::IntelOmpi),
    ("gcc-12-ompi-4.1.5", Column::GccOmpi),
    ("gcc-12-mva2-2.3.7-1", Column::GccMva2),
    ("core", Column::Core),
    ("nvhpc-24.5", Column::Nvhpc),
    ("nvhpc-24.5-hpcx-2.19", Column::NvhpcHpcx),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentClass {
    Known(Column),
    Unknown,
}

impl EnvironmentClass {
    pub fn column(self) -> Option<Column> {
        match self {
            Self::Known(column) => Some(column),
            Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Known(column) => column.as_str(),
            Self::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for EnvironmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
