//! CSV serialization of the coverage matrix.

use std::fs::File;
use std::path::Path;

use crate::error::{IoError, OutputError};
use crate::matrix::{Cell, CoverageMatrix, CoverageRow, COLUMN_COUNT};

/// Writes header and rows to `path`, replacing any existing file.
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &CoverageMatrix) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| IoError::write_error(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(CoverageMatrix::header())
        .map_err(|e| OutputError::csv(path, e))?;
    for row in matrix.rows() {
        writer
            .write_record(row.fields())
            .map_err(|e| OutputError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IoError::write_error(path, e))?;

    tracing::debug!(rows = matrix.len(), path = %path.display(), "wrote coverage matrix");
    Ok(())
}

/// Reads a matrix written by [`write_matrix`].
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<CoverageMatrix, OutputError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::read_error(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let header = reader.headers().map_err(|e| OutputError::csv(path, e))?;
    if header.iter().ne(CoverageMatrix::header()) {
        return Err(OutputError::malformed(path, "unexpected header"));
    }

    let mut matrix = CoverageMatrix::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| OutputError::csv(path, e))?;
        if record.len() != COLUMN_COUNT + 1 {
            return Err(OutputError::malformed(
                path,
                format!("row {} has {} fields", line + 2, record.len()),
            ));
        }

        let mut row = CoverageRow::new(&record[0]);
        for (cell, text) in row.cells.iter_mut().zip(record.iter().skip(1)) {
            *cell = Cell::parse(text).ok_or_else(|| {
                OutputError::malformed(path, format!("row {}: invalid cell '{text}'", line + 2))
            })?;
        }
        matrix.merge_row(row);
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Column;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_matrix_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matrix.csv");
        let mut matrix = CoverageMatrix::new();
        matrix.seed("gcc-12", Column::Gcc);
        matrix.seed("openmpi-4.1.5", Column::GccOmpi);
        matrix.mark_tested("gcc-12", Column::Gcc);

        write_matrix(&path, &matrix).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Module,core,gcc,gcc-mva2,gcc-ompi,intel,intel-mva2,intel-ompi,nvhpc,nvhpc-hpcx\n\
             gcc-12,,TRUE,,,,,,,\n\
             openmpi-4.1.5,,,,FALSE,,,,,\n"
        );
    }

    #[test]
    fn test_write_matrix_quotes_special_names() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matrix.csv");
        let mut matrix = CoverageMatrix::new();
        matrix.seed("py,torch \"cuda\"", Column::Core);

        write_matrix(&path, &matrix).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"py,torch \"\"cuda\"\"\",FALSE"));
        assert_eq!(read_matrix(&path).unwrap(), matrix);
    }

    #[test]
    fn test_write_matrix_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matrix.csv");
        fs::write(&path, "stale content that is much longer than the new header\n".repeat(50))
            .unwrap();

        write_matrix(&path, &CoverageMatrix::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("Module,"));
    }

    #[test]
    fn test_write_matrix_invalid_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("matrix.csv");

        let err = write_matrix(&path, &CoverageMatrix::new()).unwrap_err();

        assert!(matches!(err, OutputError::Io(IoError::WriteError { .. })));
    }

    #[test]
    fn test_round_trip_preserves_order_and_cells() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matrix.csv");
        let mut matrix = CoverageMatrix::new();
        matrix.seed("zlib", Column::Core);
        matrix.seed("hdf5", Column::IntelMva2);
        matrix.seed("hdf5", Column::NvhpcHpcx);
        matrix.mark_tested("hdf5", Column::NvhpcHpcx);
        matrix.ensure_row("ucx");

        write_matrix(&path, &matrix).unwrap();
        let reread = read_matrix(&path).unwrap();

        assert_eq!(reread, matrix);
        let names: Vec<_> = reread.rows().iter().map(|r| r.module.as_str()).collect();
        assert_eq!(names, vec!["zlib", "hdf5", "ucx"]);
    }

    #[test]
    fn test_read_matrix_rejects_bad_cells() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matrix.csv");
        fs::write(
            &path,
            "Module,core,gcc,gcc-mva2,gcc-ompi,intel,intel-mva2,intel-ompi,nvhpc,nvhpc-hpcx\ncmake,yes,,,,,,,,\n",
        )
        .unwrap();

        let err = read_matrix(&path).unwrap_err();

        assert!(matches!(err, OutputError::Malformed { .. }));
    }

    #[test]
    fn test_read_matrix_rejects_foreign_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matrix.csv");
        fs::write(&path, "name,status\ncmake,ok\n").unwrap();

        let err = read_matrix(&path).unwrap_err();

        assert!(matches!(err, OutputError::Malformed { .. }));
    }
}
