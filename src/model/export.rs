//! Export history entries.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of artifact an export produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    /// Flat delimited table.
    Csv,

    /// Paginated document grouped into week and section bands.
    Pdf,

    /// Paginated document as one flat five-column grid.
    GridPdf,

    /// Spreadsheet workbook with one assignments sheet.
    Xlsx,

    /// The roster table, hidden participants included.
    RosterCsv,

    /// The roster as a paginated document.
    RosterPdf,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv | Self::RosterCsv => "csv",
            Self::Pdf | Self::GridPdf | Self::RosterPdf => "pdf",
            Self::Xlsx => "xlsx",
        }
    }

    /// File name stem; the caller appends a timestamp.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Csv | Self::Pdf | Self::Xlsx => "assignments",
            Self::GridPdf => "assignments_grid",
            Self::RosterCsv | Self::RosterPdf => "roster",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::GridPdf => "grid pdf",
            Self::Xlsx => "xlsx",
            Self::RosterCsv => "roster csv",
            Self::RosterPdf => "roster pdf",
        })
    }
}

/// One line of the append-only export history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub id: Uuid,
    pub kind: ExportKind,
    /// File name inside the exports directory.
    pub file: String,
    /// Hex SHA-256 of the written bytes.
    pub sha256: String,
    /// Rows exported: assignment records, or participants for a roster.
    pub records: usize,
    pub exported_at: Timestamp,
}
