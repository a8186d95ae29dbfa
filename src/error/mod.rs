mod describe;
mod io;
mod output;
mod table;

pub use describe::DescribeError;
pub use io::IoError;
pub use output::OutputError;
pub use table::TableError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_transparent() {
        let err: Error = TableError::unsupported_format("toml").into();
        assert_eq!(
            err.to_string(),
            TableError::unsupported_format("toml").to_string()
        );

        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err: Error = OutputError::Io(IoError::write_error("out.csv", denied)).into();
        assert!(matches!(err, Error::Output(_)));
    }
}
