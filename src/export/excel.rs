//! Excel workbook export.

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::models::{ResultTable, COLUMNS};

use super::ExportError;

const SHEET_NAME: &str = "Papers";

pub(super) fn write_workbook(table: &ResultTable, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, value) in row.cells().iter().enumerate() {
            sheet.write_string(excel_row, col as u16, *value)?;
        }
    }

    sheet.autofit();
    workbook.save(path)?;
    Ok(())
}
