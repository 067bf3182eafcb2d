//! Read boundary: typed roster and template rows from loosely-typed CSV tables.
//!
//! Columns are found by header name, ignoring case, accents and punctuation,
//! so `Nome`/`Visível` tables written by older tools load the same as
//! `name`/`visible`. Every gap has one default rule:
//!
//! - missing `visible` column → visible
//! - missing `name` column → empty name (never eligible)
//! - non-numeric duration → 0
//! - `time_max` below `time_min` → raised to `time_min`
//! - unknown section → row dropped with a warning

use std::io;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use super::section::fold_key;
use super::{AgendaTemplateRow, Participant, Roster, Section, Template};

const NAME_HEADERS: &[&str] = &["name", "nome"];
const VISIBLE_HEADERS: &[&str] = &["visible", "visivel", "visibility"];
const SECTION_HEADERS: &[&str] = &["section", "seccao", "secao", "sessao"];
const SLOT_HEADERS: &[&str] = &["slot", "parte", "part"];
const MIN_HEADERS: &[&str] = &["timemin", "tempomin", "tempominimo", "min"];
const MAX_HEADERS: &[&str] = &["timemax", "tempomax", "tempomaximo", "max"];

const TRUTHY: &[&str] = &["true", "t", "1", "yes", "y", "sim", "s", "verdadeiro", "x"];

/// Read a roster table.
pub fn read_roster(reader: impl io::Read) -> csv::Result<Roster> {
    let mut rdr = reader_builder().from_reader(reader);
    let headers = rdr.headers()?.clone();
    let name_col = column(&headers, NAME_HEADERS);
    let visible_col = column(&headers, VISIBLE_HEADERS);

    let mut participants = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let name = cell(&row, name_col).to_string();
        let visible = visible_col.is_none_or(|i| is_truthy(row.get(i).unwrap_or("")));
        participants.push(Participant { name, visible });
    }
    Ok(Roster::new(participants))
}

/// Read an agenda template table.
pub fn read_template(reader: impl io::Read) -> csv::Result<Template> {
    let mut rdr = reader_builder().from_reader(reader);
    let headers = rdr.headers()?.clone();
    let section_col = column(&headers, SECTION_HEADERS);
    let slot_col = column(&headers, SLOT_HEADERS);
    let min_col = column(&headers, MIN_HEADERS);
    let max_col = column(&headers, MAX_HEADERS);

    let mut rows = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = row?;
        let raw_section = cell(&row, section_col);
        let Some(section) = Section::parse_lenient(raw_section) else {
            tracing::warn!(
                line = index + 2,
                section = raw_section,
                "dropping template row with unknown section"
            );
            continue;
        };
        rows.push(AgendaTemplateRow::new(
            section,
            cell(&row, slot_col),
            coerce_minutes(cell(&row, min_col)),
            coerce_minutes(cell(&row, max_col)),
        ));
    }
    Ok(Template::new(rows))
}

/// Write a roster table with canonical headers.
pub fn write_roster(roster: &Roster, writer: impl io::Write) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["name", "visible"])?;
    for p in roster.participants() {
        wtr.write_record([p.name.as_str(), if p.visible { "true" } else { "false" }])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a template table with canonical headers and section labels.
pub fn write_template(template: &Template, writer: impl io::Write) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["section", "slot", "time_min", "time_max"])?;
    for row in template.rows() {
        wtr.write_record([
            row.section.label(),
            row.slot.as_str(),
            &row.time_min.to_string(),
            &row.time_max.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.flexible(true).trim(Trim::All);
    builder
}

/// Index of the first header whose folded form is one of `aliases`.
fn column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&fold_key(h).as_str()))
}

fn cell(row: &StringRecord, col: Option<usize>) -> &str {
    col.and_then(|i| row.get(i)).unwrap_or("")
}

fn is_truthy(raw: &str) -> bool {
    let token = raw.trim().to_lowercase();
    TRUTHY.contains(&token.as_str())
}

/// Parse a duration in whole minutes; anything unusable becomes 0.
///
/// Accepts `"5"` and spreadsheet-style `"5.0"`.
fn coerce_minutes(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX) => f as u32,
        _ => 0,
    }
}
