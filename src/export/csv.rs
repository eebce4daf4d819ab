//! Comma-separated export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::{ResultTable, COLUMNS};

use super::ExportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write a header row plus one row per result, prefixed with a UTF-8 BOM
pub(super) fn write_csv(table: &ResultTable, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut wtr = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    wtr.write_record(COLUMNS)?;
    for row in table.rows() {
        wtr.write_record(row.cells())?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_table;
    use tempfile::tempdir;

    #[test]
    fn test_bom_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&sample_table(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let mut reader = ::csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, COLUMNS);

        let rows: Vec<::csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Learning Diffusion Priors For Images");
        assert_eq!(&rows[0][1], "J. Smith, A. Lee");
        assert_eq!(&rows[0][3], "http://arxiv.org/pdf/2401.01234v2.pdf");
        assert_eq!(&rows[1][2], "Not Found");
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_csv(&ResultTable::default(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_start_matches('\u{feff}').lines().count(), 1);
    }
}
