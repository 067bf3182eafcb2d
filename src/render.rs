//! Turning resolved records into shareable output.
//!
//! Three forms: a flat CSV table ([`serialize`] / [`parse`]), a spreadsheet
//! ([`workbook`]) and a paginated PDF document ([`render`]). The roster also
//! renders as a document ([`render_roster`]). All are pure; writing files is
//! the caller's business.

mod filter;
mod layout;
mod pdf;
mod table;
mod workbook;

pub use filter::{RecordFilter, filter};
pub use table::{HEADERS, parse, serialize};
pub use workbook::workbook;

use serde::{Deserialize, Serialize};

use crate::model::{AssignmentRecord, Roster};

/// Errors from reading or writing the CSV table or the workbook.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("line {line}: unknown section '{section}'")]
    UnknownSection { line: usize, section: String },
}

/// Page layout of the PDF document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentStyle {
    /// A filled band per week with section headers beneath.
    #[default]
    Banded,

    /// One flat table with a column per field.
    Grid,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub style: DocumentStyle,
}

/// Render records as an A4 PDF document.
///
/// Identical input always yields identical bytes. Text that does not fit its
/// cell is truncated; characters the standard fonts cannot show print as `?`.
pub fn render(records: &[AssignmentRecord], title: &str, options: RenderOptions) -> Vec<u8> {
    let pages = match options.style {
        DocumentStyle::Banded => layout::banded(records, title),
        DocumentStyle::Grid => layout::grid(records, title),
    };
    tracing::debug!(
        records = records.len(),
        pages = pages.len(),
        style = ?options.style,
        "rendered document"
    );
    pdf::write(&pages, title)
}

/// Render the roster as an A4 PDF table of names and visibility.
pub fn render_roster(roster: &Roster, title: &str) -> Vec<u8> {
    let pages = layout::roster(roster, title);
    tracing::debug!(
        participants = roster.participants().len(),
        pages = pages.len(),
        "rendered roster"
    );
    pdf::write(&pages, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Section, Template};
    use crate::resolve::tests::{full_week, plan_of, sample_roster, sample_weeks};
    use crate::resolve::{Policy, resolve};
    use crate::week::WeekCount;

    fn five_weeks() -> Vec<AssignmentRecord> {
        let weeks = sample_weeks(WeekCount::Five);
        let plan = plan_of(&weeks, &full_week());
        resolve(
            &weeks,
            &sample_roster(),
            &Template::starter(),
            &plan,
            &Policy::default(),
        )
        .unwrap()
        .records
    }

    fn count(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    #[test]
    fn render_is_deterministic() {
        let records = five_weeks();
        let options = RenderOptions::default();
        assert_eq!(
            render(&records, "Assignments", options),
            render(&records, "Assignments", options)
        );
    }

    #[test]
    fn five_week_document_has_a_band_per_week() {
        let records = five_weeks();
        let pages = layout::banded(&records, "Assignments");
        let texts: Vec<&str> = pages
            .iter()
            .flat_map(|p| &p.ops)
            .filter_map(|op| match op {
                pdf::Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        for label in ["01 Sep", "08 Sep", "15 Sep", "22 Sep", "29 Sep"] {
            let at = texts.iter().position(|t| *t == label).unwrap();
            let headers: Vec<&str> = texts[at + 1..]
                .iter()
                .copied()
                .filter(|t| Section::ALL.iter().any(|s| s.label() == *t))
                .take(5)
                .collect();
            assert_eq!(
                headers,
                ["Opening", "Treasures", "Ministry", "Living As", "Closing"]
            );
        }
    }

    #[test]
    fn footer_count_matches_page_count() {
        let bytes = render(&five_weeks(), "Assignments", RenderOptions::default());
        let pages = count(&bytes, "/Type /Page ");
        assert!(pages >= 2);
        for n in 1..=pages {
            assert_eq!(count(&bytes, &format!("(Page {n})")), 1);
        }
        assert_eq!(count(&bytes, &format!("(Page {})", pages + 1)), 0);
    }

    #[test]
    fn grid_style_differs_from_banded() {
        let records = five_weeks();
        let banded = render(&records, "T", RenderOptions::default());
        let grid = render(
            &records,
            "T",
            RenderOptions {
                style: DocumentStyle::Grid,
            },
        );
        assert!(grid.starts_with(b"%PDF-1.4"));
        assert_ne!(banded, grid);
    }

    #[test]
    fn unprintable_and_oversized_text_do_not_panic() {
        let records = vec![AssignmentRecord {
            week: "01 Sep".into(),
            section: Section::Opening,
            order: "1".into(),
            slot_label: "🙂".repeat(5_000),
            assignee: "Łukasz ".repeat(1_000),
        }];
        let bytes = render(&records, "Título 🙂", RenderOptions::default());
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert_eq!(count(&bytes, "🙂"), 0);
    }

    #[test]
    fn roster_document_is_a_pdf() {
        let bytes = render_roster(&sample_roster(), "Roster");
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert_eq!(count(&bytes, "(Roster) Tj"), 1);
        assert_eq!(count(&bytes, "(Page 1)"), 1);
    }

    #[test]
    fn empty_records_render_a_title_page() {
        let bytes = render(&[], "Assignments", RenderOptions::default());
        assert_eq!(count(&bytes, "/Type /Page "), 1);
        assert_eq!(count(&bytes, "(Assignments) Tj"), 1);
    }
}
