use std::collections::BTreeSet;
use std::fmt;

use crate::matrix::Column;

/// Toolchain or MPI family a module file is filed under. Declaration
/// order is the order categories are seeded into the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Core,
    Gcc,
    Intel,
    Mvapich2,
    Openmpi,
    Nvhpc,
    Hpcx,
}

/// Compiler sub-path an MPI module was built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Compiler {
    Gcc,
    Intel,
}

pub type CompilerSet = BTreeSet<Compiler>;

/// Maps the first segment below the system tag to a category and the
/// index of the segment holding the module name.
#[derive(Debug, Clone, Copy)]
pub struct PathRule {
    pub segment: &'static str,
    pub category: Category,
    pub name_index: usize,
}

/// Checked top to bottom; the first matching segment wins.
pub const PATH_RULES: &[PathRule] = &[
    PathRule {
        segment: "Core",
        category: Category::Core,
        name_index: 1,
    },
    PathRule {
        segment: "mvapich2",
        category: Category::Mvapich2,
        name_index: 4,
    },
    PathRule {
        segment: "openmpi",
        category: Category::Openmpi,
        name_index: 4,
    },
    PathRule {
        segment: "hpcx",
        category: Category::Hpcx,
        name_index: 4,
    },
    PathRule {
        segment: "gcc",
        category: Category::Gcc,
        name_index: 2,
    },
    PathRule {
        segment: "intel",
        category: Category::Intel,
        name_index: 2,
    },
    PathRule {
        segment: "nvhpc",
        category: Category::Nvhpc,
        name_index: 2,
    },
];

const COMPILER_SEGMENTS: &[(&str, Compiler)] =
    &[("gcc", Compiler::Gcc), ("intel", Compiler::Intel)];

/// A module file path resolved against the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPath {
    pub category: Category,
    pub module_name: String,
    pub compilers: CompilerSet,
}

/// Classifies the path segments found below the system tag directory.
/// Returns `None` for layouts outside the taxonomy.
pub fn classify_segments(parts: &[&str]) -> Option<ClassifiedPath> {
    let first = parts.first()?;
    let rule = PATH_RULES.iter().find(|rule| rule.segment == *first)?;
    let module_name = parts.get(rule.name_index)?;

    let compilers = parts
        .iter()
        .filter_map(|part| {
            COMPILER_SEGMENTS
                .iter()
                .find(|(segment, _)| segment == part)
                .map(|(_, compiler)| *compiler)
        })
        .collect();

    Some(ClassifiedPath {
        category: rule.category,
        module_name: (*module_name).to_string(),
        compilers,
    })
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Core,
        Category::Gcc,
        Category::Intel,
        Category::Mvapich2,
        Category::Openmpi,
        Category::Nvhpc,
        Category::Hpcx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Gcc => "gcc",
            Category::Intel => "intel",
            Category::Mvapich2 => "mvapich2",
            Category::Openmpi => "openmpi",
            Category::Nvhpc => "nvhpc",
            Category::Hpcx => "hpcx",
        }
    }

    /// MPI families whose column depends on the compiler sub-path.
    pub fn is_compiler_split(&self) -> bool {
        matches!(self, Category::Mvapich2 | Category::Openmpi)
    }

    /// Report columns a module of this category is applicable to.
    pub fn seed_columns(&self, compilers: &CompilerSet) -> Vec<Column> {
        match self {
            Category::Core => vec![Column::Core],
            Category::Gcc => vec![Column::Gcc],
            Category::Intel => vec![Column::Intel],
            Category::Nvhpc => vec![Column::Nvhpc],
            Category::Hpcx => vec![Column::NvhpcHpcx],
            Category::Mvapich2 => compilers
                .iter()
                .map(|compiler| match compiler {
                    Compiler::Gcc => Column::GccMva2,
                    Compiler::Intel => Column::IntelMva2,
                })
                .collect(),
            Category::Openmpi => compilers
                .iter()
                .map(|compiler| match compiler {
                    Compiler::Gcc => Column::GccOmpi,
                    Compiler::Intel => Column::IntelOmpi,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
