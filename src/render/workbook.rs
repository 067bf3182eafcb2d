//! Spreadsheet form of the assignment table.

use rust_xlsxwriter::{Format, Workbook};

use crate::model::AssignmentRecord;

use super::RenderError;
use super::table::HEADERS;

const SHEET_NAME: &str = "Assignments";

/// Write records as an `.xlsx` workbook: one sheet, the CSV header row in
/// bold, then one row per record in input order.
pub fn workbook(records: &[AssignmentRecord]) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, header) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, header, &bold)?;
    }
    for (row, r) in (1u32..).zip(records) {
        let cells = [
            r.week.as_str(),
            r.section.label(),
            r.order.as_str(),
            r.slot_label.as_str(),
            r.assignee.as_str(),
        ];
        for (col, cell) in (0u16..).zip(cells) {
            sheet.write_string(row, col, cell)?;
        }
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
