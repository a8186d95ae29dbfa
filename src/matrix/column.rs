use std::fmt;
use std::str::FromStr;

/// Header of the first report column.
pub const MODULE_HEADER: &str = "Module";

pub const COLUMN_COUNT: usize = 9;

/// One coverage dimension of the report, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Core,
    Gcc,
    GccMva2,
    GccOmpi,
    Intel,
    IntelMva2,
    IntelOmpi,
    Nvhpc,
    NvhpcHpcx,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Core,
        Column::Gcc,
        Column::GccMva2,
        Column::GccOmpi,
        Column::Intel,
        Column::IntelMva2,
        Column::IntelOmpi,
        Column::Nvhpc,
        Column::NvhpcHpcx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Core => "core",
            Column::Gcc => "gcc",
            Column::GccMva2 => "gcc-mva2",
            Column::GccOmpi => "gcc-ompi",
            Column::Intel => "intel",
            Column::IntelMva2 => "intel-mva2",
            Column::IntelOmpi => "intel-ompi",
            Column::Nvhpc => "nvhpc",
            Column::NvhpcHpcx => "nvhpc-hpcx",
        }
    }

    /// Position among the coverage cells (the Module column excluded).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Full CSV header, `Module` first.
    pub fn header() -> Vec<&'static str> {
        std::iter::once(MODULE_HEADER)
            .chain(Self::ALL.iter().map(Column::as_str))
            .collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| format!("unknown coverage column: {s}"))
    }
}

/// State of one (module, column) cell. Ordering is the only legal
/// direction of change: `Empty < Untested < Tested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Cell {
    #[default]
    Empty,
    Untested,
    Tested,
}

impl Cell {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Untested => "FALSE",
            Cell::Tested => "TRUE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(Cell::Empty),
            "FALSE" => Some(Cell::Untested),
            "TRUE" => Some(Cell::Tested),
            _ => None,
        }
    }
}
