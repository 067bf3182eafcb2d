//! Assignment records: the normalized output of a resolution pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Section;

/// One resolved agenda slot for one week.
///
/// Records are never edited in place; a changed plan produces a new set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub week: String,
    pub section: Section,
    /// 1-based position within the section for this week.
    pub order: String,
    /// Slot name, with `" (<n> min)"` appended for timed slots.
    pub slot_label: String,
    /// One name, several names joined by the pair separator, or empty.
    pub assignee: String,
}

impl AssignmentRecord {
    /// The duration embedded in `slot_label`, if the slot is timed.
    pub fn duration(&self) -> Option<u32> {
        let rest = self.slot_label.strip_suffix(" min)")?;
        let open = rest.rfind(" (")?;
        rest[open + 2..].parse().ok()
    }

    /// The slot name without any duration annotation.
    pub fn slot_name(&self) -> &str {
        match self.duration() {
            Some(_) => self
                .slot_label
                .rfind(" (")
                .map_or(self.slot_label.as_str(), |i| &self.slot_label[..i]),
            None => &self.slot_label,
        }
    }
}

/// Label a timed slot: `"Local Needs (10 min)"`.
pub fn timed_label(slot: &str, minutes: u32) -> String {
    format!("{slot} ({minutes} min)")
}

/// A recoverable problem with one slot of one week.
///
/// The slot was skipped or adjusted; the rest of the pass was unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub week: String,
    pub section: Section,
    pub slot: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WarningKind {
    /// The slot name has no row in the template for its section.
    UnknownSlot,

    /// The named person is hidden or not on the roster; left unassigned.
    IneligibleAssignee { name: String },

    /// The requested duration was outside the template bounds and was clamped.
    DurationOutOfBounds {
        requested: u32,
        min: u32,
        max: u32,
        applied: u32,
    },

    /// More names than the slot takes; only the first ones were kept.
    TooManyAssignees { given: usize, taken: usize },

    /// A second living-as part was requested after a part too long to allow it.
    SecondSlotNotAllowed { first_duration: u32, threshold: u32 },

    /// More living-as parts than the policy permits.
    ExtraLivingSlot,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSlot => f.write_str("slot not found in the agenda template; skipped"),
            Self::IneligibleAssignee { name } => {
                write!(f, "{name:?} is not a visible roster participant; left unassigned")
            }
            Self::DurationOutOfBounds {
                requested,
                min,
                max,
                applied,
            } => write!(
                f,
                "{requested} min is outside {min}-{max} min; using {applied} min"
            ),
            Self::TooManyAssignees { given, taken } => {
                write!(f, "{given} assignees given, slot takes {taken}")
            }
            Self::SecondSlotNotAllowed {
                first_duration,
                threshold,
            } => write!(
                f,
                "first part runs {first_duration} min (not under {threshold}); second part skipped"
            ),
            Self::ExtraLivingSlot => f.write_str("more living-as parts than allowed; skipped"),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}: {}",
            self.week, self.section, self.slot, self.kind
        )
    }
}

/// The outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub records: Vec<AssignmentRecord>,
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slot_label: &str) -> AssignmentRecord {
        AssignmentRecord {
            week: "01 Sep".into(),
            section: Section::Ministry,
            order: "1".into(),
            slot_label: slot_label.into(),
            assignee: String::new(),
        }
    }

    #[test]
    fn duration_reads_timed_label() {
        let r = record(&timed_label("Following Up", 4));
        assert_eq!(r.duration(), Some(4));
        assert_eq!(r.slot_name(), "Following Up");
    }

    #[test]
    fn untimed_label_has_no_duration() {
        let r = record("Reader");
        assert_eq!(r.duration(), None);
        assert_eq!(r.slot_name(), "Reader");
    }

    #[test]
    fn parenthesized_name_without_minutes_is_untimed() {
        let r = record("Talk (guest)");
        assert_eq!(r.duration(), None);
        assert_eq!(r.slot_name(), "Talk (guest)");
    }

    #[test]
    fn warning_display_names_the_slot() {
        let w = Warning {
            week: "08 Sep".into(),
            section: Section::LivingAs,
            slot: "Discurso Especial".into(),
            kind: WarningKind::UnknownSlot,
        };
        assert_eq!(
            w.to_string(),
            "08 Sep / Living As / Discurso Especial: slot not found in the agenda template; skipped"
        );
    }
}
