//! Flat delimited-text form of the assignment table.

use csv::{ReaderBuilder, WriterBuilder};

use crate::model::{AssignmentRecord, Section};

use super::RenderError;

/// Column headers, in field order.
pub const HEADERS: [&str; 5] = ["week", "section", "order", "slot_label", "assignee"];

/// Serialize records as UTF-8 CSV with a header row.
///
/// Lossless: [`parse`] reconstructs the same records.
pub fn serialize(records: &[AssignmentRecord]) -> Result<Vec<u8>, RenderError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(HEADERS)?;
    for r in records {
        wtr.write_record([
            r.week.as_str(),
            r.section.label(),
            r.order.as_str(),
            r.slot_label.as_str(),
            r.assignee.as_str(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| RenderError::Io(e.into_error()))
}

/// Parse CSV produced by [`serialize`].
pub fn parse(bytes: &[u8]) -> Result<Vec<AssignmentRecord>, RenderError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let mut records = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        let section = Section::parse_lenient(&field(1)).ok_or_else(|| RenderError::UnknownSection {
            line: index + 2,
            section: field(1),
        })?;
        records.push(AssignmentRecord {
            week: field(0),
            section,
            order: field(2),
            slot_label: field(3),
            assignee: field(4),
        });
    }
    Ok(records)
}
