//! Page layout for the assignment document.
//!
//! Produces [`Page`]s of drawing ops in millimetres. The banded and grid
//! styles and the roster table share one [`Cursor`] that owns pagination:
//! the title on page 1, a `Page n` footer on every page, and the rule that a
//! header never sits alone at the bottom.

use crate::model::{AssignmentRecord, Roster, Section};

use super::pdf::{self, Font, Op, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Page};

const MARGIN: f32 = 10.0;
const BODY_WIDTH: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN;
const BODY_BOTTOM: f32 = PAGE_HEIGHT_MM - 20.0;
const FOOTER_BASELINE: f32 = PAGE_HEIGHT_MM - 10.0;

const TITLE_SIZE: f32 = 14.0;
const TITLE_HEIGHT: f32 = 12.0;
const BAND_HEIGHT: f32 = 8.0;
const BAND_SIZE: f32 = 11.0;
const HEADER_HEIGHT: f32 = 7.0;
const HEADER_SIZE: f32 = 10.0;
const ROW_HEIGHT: f32 = 7.0;
const ROW_SIZE: f32 = 9.5;
const FOOTER_SIZE: f32 = 8.0;

/// Horizontal padding inside a cell.
const PAD: f32 = 1.5;

const BAND_GRAY: f32 = 0.82;
const HEADER_GRAY: f32 = 0.93;

const CONTINUED: &str = " (cont.)";
const ELLIPSIS: &str = "...";

/// Banded cells: order, slot, assignee.
const BANDED_COLUMNS: [f32; 3] = [15.0, 110.0, 65.0];

/// Grid cells: week, section, order, slot, assignee.
const GRID_COLUMNS: [f32; 5] = [25.0, 30.0, 15.0, 75.0, 45.0];
const GRID_HEADERS: [&str; 5] = ["Week", "Section", "#", "Part", "Assignee"];

/// Roster cells: name, status.
const ROSTER_COLUMNS: [f32; 2] = [150.0, 40.0];
const ROSTER_HEADERS: [&str; 2] = ["Name", "Status"];

/// Records grouped by week then section, for the banded style.
struct WeekGroup<'a> {
    label: &'a str,
    sections: Vec<(Section, Vec<&'a AssignmentRecord>)>,
}

/// Week groups in first-appearance order, sections in canonical order,
/// records in input order within each section.
fn group(records: &[AssignmentRecord]) -> Vec<WeekGroup<'_>> {
    let mut weeks: Vec<WeekGroup<'_>> = Vec::new();
    for record in records {
        let index = match weeks.iter().position(|w| w.label == record.week) {
            Some(i) => i,
            None => {
                weeks.push(WeekGroup {
                    label: &record.week,
                    sections: Vec::new(),
                });
                weeks.len() - 1
            }
        };
        let sections = &mut weeks[index].sections;
        match sections.iter_mut().find(|(s, _)| *s == record.section) {
            Some((_, rows)) => rows.push(record),
            None => sections.push((record.section, vec![record])),
        }
    }
    for week in &mut weeks {
        week.sections.sort_by_key(|(section, _)| *section);
    }
    weeks
}

/// Owns the pages being laid out and the vertical position on the current one.
struct Cursor {
    done: Vec<Page>,
    page: Page,
    y: f32,
}

impl Cursor {
    fn new(title: &str) -> Self {
        let mut cursor = Self {
            done: Vec::new(),
            page: Page::default(),
            y: MARGIN,
        };
        let title = pdf::sanitize(title.trim());
        if !title.is_empty() {
            let title = fit(&title, Font::Bold, TITLE_SIZE, BODY_WIDTH);
            let width = pdf::text_width(&title, Font::Bold, TITLE_SIZE);
            cursor.page.ops.push(Op::Text {
                x: (PAGE_WIDTH_MM - width) / 2.0,
                y: MARGIN + 7.0,
                font: Font::Bold,
                size: TITLE_SIZE,
                text: title,
            });
            cursor.y += TITLE_HEIGHT;
        }
        cursor
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= BODY_BOTTOM
    }

    /// Whether nothing has been drawn below the title on this page yet.
    fn at_top(&self) -> bool {
        (self.done.is_empty() && self.y <= MARGIN + TITLE_HEIGHT) || self.y <= MARGIN
    }

    fn break_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        self.done.push(page);
        self.y = MARGIN;
    }

    /// Break unless `height` fits or the page is still empty.
    fn ensure(&mut self, height: f32) -> bool {
        if self.fits(height) || self.at_top() {
            return false;
        }
        self.break_page();
        true
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.page);
        for (i, page) in self.done.iter_mut().enumerate() {
            let text = format!("Page {}", i + 1);
            let width = pdf::text_width(&text, Font::Regular, FOOTER_SIZE);
            page.ops.push(Op::Text {
                x: (PAGE_WIDTH_MM - width) / 2.0,
                y: FOOTER_BASELINE,
                font: Font::Regular,
                size: FOOTER_SIZE,
                text,
            });
        }
        self.done
    }

    fn band(&mut self, label: &str, gray: f32, height: f32, font: Font, size: f32) {
        self.page.ops.push(Op::Fill {
            x: MARGIN,
            y: self.y,
            w: BODY_WIDTH,
            h: height,
            gray,
        });
        self.page.ops.push(Op::Frame {
            x: MARGIN,
            y: self.y,
            w: BODY_WIDTH,
            h: height,
        });
        self.text(MARGIN, BODY_WIDTH, height, label, font, size);
        self.y += height;
    }

    /// A row of bordered cells.
    fn row(&mut self, widths: &[f32], cells: &[&str], font: Font, size: f32, fill: Option<f32>) {
        let mut x = MARGIN;
        for (width, cell) in widths.iter().zip(cells) {
            if let Some(gray) = fill {
                self.page.ops.push(Op::Fill {
                    x,
                    y: self.y,
                    w: *width,
                    h: ROW_HEIGHT,
                    gray,
                });
            }
            self.page.ops.push(Op::Frame {
                x,
                y: self.y,
                w: *width,
                h: ROW_HEIGHT,
            });
            self.text(x, *width, ROW_HEIGHT, cell, font, size);
            x += width;
        }
        self.y += ROW_HEIGHT;
    }

    /// Left-aligned text fitted into a cell, baseline near the cell bottom.
    fn text(&mut self, x: f32, width: f32, height: f32, text: &str, font: Font, size: f32) {
        let text = fit(&pdf::sanitize(text), font, size, width - 2.0 * PAD);
        if text.is_empty() {
            return;
        }
        self.page.ops.push(Op::Text {
            x: x + PAD,
            y: self.y + (height + size * 0.25) / 2.0,
            font,
            size,
            text,
        });
    }
}

/// Truncate `text` with a trailing ellipsis so it fits `max_width` mm.
pub(super) fn fit(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if pdf::text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let budget = max_width - pdf::text_width(ELLIPSIS, font, size);
    if budget <= 0.0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0.0;
    for c in text.chars() {
        let mut buf = [0u8; 4];
        let w = pdf::text_width(c.encode_utf8(&mut buf), font, size);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    let mut out = out.trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

/// One filled band per week, one header per section, bordered rows beneath.
pub(super) fn banded(records: &[AssignmentRecord], title: &str) -> Vec<Page> {
    let mut cursor = Cursor::new(title);
    for week in group(records) {
        let block = BAND_HEIGHT + HEADER_HEIGHT + ROW_HEIGHT;
        cursor.ensure(block);
        week_band(&mut cursor, week.label, false);

        for (section, rows) in &week.sections {
            if cursor.ensure(HEADER_HEIGHT + ROW_HEIGHT) {
                week_band(&mut cursor, week.label, true);
            }
            section_header(&mut cursor, *section);

            for record in rows {
                if cursor.ensure(ROW_HEIGHT) {
                    week_band(&mut cursor, week.label, true);
                    section_header(&mut cursor, *section);
                }
                cursor.row(
                    &BANDED_COLUMNS,
                    &[
                        record.order.as_str(),
                        record.slot_label.as_str(),
                        record.assignee.as_str(),
                    ],
                    Font::Regular,
                    ROW_SIZE,
                    None,
                );
            }
        }
    }
    cursor.finish()
}

fn week_band(cursor: &mut Cursor, label: &str, continued: bool) {
    let text = if continued {
        format!("{label}{CONTINUED}")
    } else {
        label.to_string()
    };
    cursor.band(&text, BAND_GRAY, BAND_HEIGHT, Font::Bold, BAND_SIZE);
}

fn section_header(cursor: &mut Cursor, section: Section) {
    cursor.band(
        section.label(),
        HEADER_GRAY,
        HEADER_HEIGHT,
        Font::Bold,
        HEADER_SIZE,
    );
}

/// A flat five-column table with its header row on every page.
pub(super) fn grid(records: &[AssignmentRecord], title: &str) -> Vec<Page> {
    table(
        title,
        &GRID_COLUMNS,
        &GRID_HEADERS,
        records.iter().map(|r| {
            [
                r.week.as_str(),
                r.section.label(),
                r.order.as_str(),
                r.slot_label.as_str(),
                r.assignee.as_str(),
            ]
        }),
    )
}

/// The roster as a name and status table, in roster order.
pub(super) fn roster(roster: &Roster, title: &str) -> Vec<Page> {
    table(
        title,
        &ROSTER_COLUMNS,
        &ROSTER_HEADERS,
        roster.participants().iter().map(|p| {
            [
                p.name.as_str(),
                if p.visible { "visible" } else { "hidden" },
            ]
        }),
    )
}

/// Bordered rows under a shaded header row that repeats on every page.
fn table<'a, const N: usize>(
    title: &str,
    widths: &[f32; N],
    headers: &[&str; N],
    rows: impl IntoIterator<Item = [&'a str; N]>,
) -> Vec<Page> {
    let mut cursor = Cursor::new(title);
    cursor.row(widths, headers, Font::Bold, ROW_SIZE, Some(HEADER_GRAY));
    for cells in rows {
        if cursor.ensure(ROW_HEIGHT) {
            cursor.row(widths, headers, Font::Bold, ROW_SIZE, Some(HEADER_GRAY));
        }
        cursor.row(widths, &cells, Font::Regular, ROW_SIZE, None);
    }
    cursor.finish()
}
