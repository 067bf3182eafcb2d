//! Output formatting for CLI display.

use crate::model::{AssignmentRecord, ExportEntry, Roster, Template, Warning};
use crate::week::Week;

/// Left-aligned columns separated by two spaces, with a header row.
fn columns<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; N]| -> String {
        let mut out = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i + 1 == N {
                out.push_str(cell);
            } else {
                out.push_str(cell);
                out.push_str(&" ".repeat(width - cell.chars().count() + 2));
            }
        }
        out.trim_end().to_string()
    };

    let mut lines = vec![line(headers)];
    for row in rows {
        lines.push(line(row.each_ref().map(String::as_str)));
    }
    lines.join("\n")
}

pub(super) fn format_records(records: &[AssignmentRecord]) -> String {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.week.clone(),
                r.section.label().to_string(),
                r.order.clone(),
                r.slot_label.clone(),
                r.assignee.clone(),
            ]
        })
        .collect();
    columns(["WEEK", "SECTION", "#", "PART", "ASSIGNEE"], &rows)
}

pub(super) fn format_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| format!("warning: {w}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn format_roster(roster: &Roster) -> String {
    let rows: Vec<[String; 2]> = roster
        .participants()
        .iter()
        .map(|p| {
            let status = if p.visible { "visible" } else { "hidden" };
            [p.name.clone(), status.to_string()]
        })
        .collect();
    columns(["NAME", "STATUS"], &rows)
}

pub(super) fn format_template(template: &Template) -> String {
    let rows: Vec<[String; 3]> = template
        .rows()
        .iter()
        .map(|r| {
            let bounds = if r.time_min == r.time_max {
                format!("{} min", r.time_min)
            } else {
                format!("{}-{} min", r.time_min, r.time_max)
            };
            [r.section.label().to_string(), r.slot.clone(), bounds]
        })
        .collect();
    columns(["SECTION", "SLOT", "DURATION"], &rows)
}

pub(super) fn format_weeks(weeks: &[Week]) -> String {
    weeks
        .iter()
        .map(|w| format!("{}  {}", w.label, w.date))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn format_history(entries: &[ExportEntry]) -> String {
    let rows: Vec<[String; 5]> = entries
        .iter()
        .map(|e| {
            [
                short_id(e),
                e.exported_at.strftime("%Y-%m-%d %H:%M").to_string(),
                e.kind.to_string(),
                e.records.to_string(),
                e.file.clone(),
            ]
        })
        .collect();
    columns(["ID", "EXPORTED (UTC)", "KIND", "RECORDS", "FILE"], &rows)
}

pub(super) fn short_id(entry: &ExportEntry) -> String {
    entry.id.to_string()[..8].to_string()
}
