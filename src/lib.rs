/// Coverage Matrix
///
/// Cross-references the modules installed in an Lmod hierarchy with the
/// tests a ReFrame suite declares, and reports per module and
/// compiler/MPI combination whether a test exists.
pub mod cli;
pub mod config;
pub mod describe;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod output;
pub mod pipeline;

pub use describe::{DescribeSource, TestRecord};
pub use error::{Error, Result};
pub use matrix::{Cell, Column, CoverageMatrix};
