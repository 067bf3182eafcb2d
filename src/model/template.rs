//! Agenda template: the legal slots per section and their duration bounds.

use super::Section;

/// One legal slot of a section, with its allowed duration in minutes.
///
/// Ingestion guarantees `time_min <= time_max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaTemplateRow {
    pub section: Section,
    pub slot: String,
    pub time_min: u32,
    pub time_max: u32,
}

impl AgendaTemplateRow {
    pub fn new(section: Section, slot: impl Into<String>, time_min: u32, time_max: u32) -> Self {
        Self {
            section,
            slot: slot.into(),
            time_min,
            time_max: time_max.max(time_min),
        }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        (self.time_min..=self.time_max).contains(&minutes)
    }
}

/// The full agenda template, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    rows: Vec<AgendaTemplateRow>,
}

impl Template {
    pub fn new(rows: Vec<AgendaTemplateRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AgendaTemplateRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to `section`, in template order.
    pub fn rows_for(&self, section: Section) -> impl Iterator<Item = &AgendaTemplateRow> {
        self.rows.iter().filter(move |r| r.section == section)
    }

    /// Find the row for `slot` within `section`.
    ///
    /// Slot names match after trimming, ignoring ASCII case. The first
    /// matching row wins.
    pub fn lookup(&self, section: Section, slot: &str) -> Option<&AgendaTemplateRow> {
        let slot = slot.trim();
        if slot.is_empty() {
            return None;
        }
        self.rows_for(section)
            .find(|r| r.slot.trim().eq_ignore_ascii_case(slot))
    }

    /// The starter template written by `vmc template init`.
    pub fn starter() -> Self {
        Self::new(vec![
            AgendaTemplateRow::new(Section::Ministry, "Starting a Conversation", 1, 4),
            AgendaTemplateRow::new(Section::Ministry, "Following Up", 2, 4),
            AgendaTemplateRow::new(Section::Ministry, "Making Disciples", 4, 5),
            AgendaTemplateRow::new(Section::Ministry, "Explaining Your Beliefs", 3, 5),
            AgendaTemplateRow::new(Section::Ministry, "Talk", 5, 5),
            AgendaTemplateRow::new(Section::LivingAs, "Local Needs", 5, 15),
            AgendaTemplateRow::new(Section::LivingAs, "Organizational Accomplishments", 5, 10),
            AgendaTemplateRow::new(Section::LivingAs, "Annual Service Report", 5, 15),
            AgendaTemplateRow::new(Section::LivingAs, "Special Talk", 30, 30),
        ])
    }
}
