//! Assignment resolution: plan selections → assignment records.
//!
//! Each week is walked through the five sections in canonical order. Every
//! section is resolved by its own function returning its own records, and
//! the pass concatenates them. Nothing is retried: a slot that cannot be
//! resolved is skipped with a [`Warning`], and the rest of the week and the
//! other weeks carry on. Only precondition violations fail the pass.

mod living;
mod ministry;

use std::collections::HashSet;

use crate::model::{
    AgendaTemplateRow, AssignmentRecord, Plan, Resolution, Roster, Section, Template, Warning,
    WarningKind, WeekPlan,
};
use crate::week::Week;

pub use living::{LivingPolicy, SpecialWeekMode, second_slot_allowed};

pub const PRESIDING: &str = "Presiding";
pub const OPENING_PRAYER: &str = "Opening Prayer";
pub const TREASURES_TALK: &str = "Treasures Talk";
pub const SPIRITUAL_GEMS: &str = "Spiritual Gems";
pub const BIBLE_READING: &str = "Bible Reading";
pub const CONGREGATION_STUDY: &str = "Congregation Bible Study";
pub const READER: &str = "Reader";
pub const CLOSING_PRAYER: &str = "Closing Prayer";

/// Rules that vary between congregations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Joins the names of a paired ministry part.
    pub pair_separator: String,

    /// Upper bound on ministry parts per week (lower bound is 1).
    pub ministry_max_parts: usize,

    /// Ministry slot treated as a talk: one assignee, fixed duration.
    pub talk_slot: String,
    pub talk_duration: u32,

    pub living: LivingPolicy,
    pub study_duration: u32,

    /// Living-as slot used on special weeks, looked up in the template.
    pub special_slot: String,
    pub special_week: SpecialWeekMode,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            pair_separator: " / ".to_string(),
            ministry_max_parts: 4,
            talk_slot: "Talk".to_string(),
            talk_duration: 5,
            living: LivingPolicy::default(),
            study_duration: 30,
            special_slot: "Special Talk".to_string(),
            special_week: SpecialWeekMode::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no weeks to resolve")]
    EmptyWeeks,

    #[error("duplicate week label: {0}")]
    DuplicateWeek(String),

    #[error("plan has {selections} week selection(s) for {weeks} week(s)")]
    SelectionCount { weeks: usize, selections: usize },

    #[error("week {week}: {count} ministry part(s), expected 1 to {max}")]
    MinistryCount {
        week: String,
        count: usize,
        max: usize,
    },
}

/// Resolve every week of `plan` against the roster and template.
pub fn resolve(
    weeks: &[Week],
    roster: &Roster,
    template: &Template,
    plan: &Plan,
    policy: &Policy,
) -> Result<Resolution, ResolveError> {
    check_preconditions(weeks, plan, policy)?;

    let mut resolution = Resolution::default();
    for (week, selection) in weeks.iter().zip(&plan.selections) {
        let ctx = Context {
            week: &week.label,
            roster,
            template,
            policy,
        };
        let sections = [
            opening(&ctx, selection),
            treasures(&ctx, selection),
            ministry::resolve(&ctx, &selection.ministry),
            living::resolve(&ctx, selection),
            closing(&ctx, selection),
        ];
        for output in sections {
            resolution.records.extend(output.records);
            resolution.warnings.extend(output.warnings);
        }
    }

    for w in &resolution.warnings {
        tracing::warn!(
            week = %w.week,
            section = %w.section,
            slot = %w.slot,
            "{}",
            w.kind
        );
    }
    tracing::debug!(
        weeks = weeks.len(),
        records = resolution.records.len(),
        warnings = resolution.warnings.len(),
        "resolved plan"
    );

    Ok(resolution)
}

fn check_preconditions(weeks: &[Week], plan: &Plan, policy: &Policy) -> Result<(), ResolveError> {
    if weeks.is_empty() {
        return Err(ResolveError::EmptyWeeks);
    }

    let mut seen = HashSet::new();
    for week in weeks {
        if !seen.insert(week.label.as_str()) {
            return Err(ResolveError::DuplicateWeek(week.label.clone()));
        }
    }

    if plan.selections.len() != weeks.len() {
        return Err(ResolveError::SelectionCount {
            weeks: weeks.len(),
            selections: plan.selections.len(),
        });
    }

    for (week, selection) in weeks.iter().zip(&plan.selections) {
        let count = selection.ministry.len();
        if !(1..=policy.ministry_max_parts).contains(&count) {
            return Err(ResolveError::MinistryCount {
                week: week.label.clone(),
                count,
                max: policy.ministry_max_parts,
            });
        }
    }

    Ok(())
}

/// Read-only inputs shared by the section resolvers for one week.
struct Context<'a> {
    week: &'a str,
    roster: &'a Roster,
    template: &'a Template,
    policy: &'a Policy,
}

/// Records and warnings for one section of one week.
///
/// Records are numbered in the order they are pushed, which keeps
/// `(week, section, order)` unique.
struct SectionOutput {
    week: String,
    section: Section,
    records: Vec<AssignmentRecord>,
    warnings: Vec<Warning>,
}

impl SectionOutput {
    fn new(week: &str, section: Section) -> Self {
        Self {
            week: week.to_string(),
            section,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn push(&mut self, slot_label: String, assignee: String) {
        self.records.push(AssignmentRecord {
            week: self.week.clone(),
            section: self.section,
            order: (self.records.len() + 1).to_string(),
            slot_label,
            assignee,
        });
    }

    fn warn(&mut self, slot: &str, kind: WarningKind) {
        self.warnings.push(Warning {
            week: self.week.clone(),
            section: self.section,
            slot: slot.to_string(),
            kind,
        });
    }

    /// A single assignee, or empty when unset or ineligible.
    fn assignee(&mut self, roster: &Roster, slot: &str, name: &str) -> String {
        let mut names = self.assignees(roster, slot, &[name.to_string()], 1);
        names.pop().unwrap_or_default()
    }

    /// Eligible names, at most `max` of them, in the order given.
    fn assignees(
        &mut self,
        roster: &Roster,
        slot: &str,
        names: &[String],
        max: usize,
    ) -> Vec<String> {
        let mut eligible = Vec::new();
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if roster.is_eligible(name) {
                eligible.push(name.to_string());
            } else {
                self.warn(
                    slot,
                    WarningKind::IneligibleAssignee {
                        name: name.to_string(),
                    },
                );
            }
        }
        if eligible.len() > max {
            self.warn(
                slot,
                WarningKind::TooManyAssignees {
                    given: eligible.len(),
                    taken: max,
                },
            );
            eligible.truncate(max);
        }
        eligible
    }

    /// The organizer's duration, `time_min` when unset, clamped into bounds.
    fn duration(&mut self, row: &AgendaTemplateRow, requested: Option<u32>) -> u32 {
        let Some(requested) = requested else {
            return row.time_min;
        };
        if row.contains(requested) {
            return requested;
        }
        let applied = requested.clamp(row.time_min, row.time_max);
        self.warn(
            &row.slot,
            WarningKind::DurationOutOfBounds {
                requested,
                min: row.time_min,
                max: row.time_max,
                applied,
            },
        );
        applied
    }
}

/// Fixed untimed slots, one assignee each, in the order given.
fn fixed(ctx: &Context<'_>, section: Section, slots: &[(&str, &str)]) -> SectionOutput {
    let mut out = SectionOutput::new(ctx.week, section);
    for (slot, name) in slots {
        let assignee = out.assignee(ctx.roster, slot, name);
        out.push((*slot).to_string(), assignee);
    }
    out
}

fn opening(ctx: &Context<'_>, selection: &WeekPlan) -> SectionOutput {
    fixed(
        ctx,
        Section::Opening,
        &[
            (PRESIDING, selection.presiding.as_str()),
            (OPENING_PRAYER, selection.opening_prayer.as_str()),
        ],
    )
}

fn treasures(ctx: &Context<'_>, selection: &WeekPlan) -> SectionOutput {
    fixed(
        ctx,
        Section::Treasures,
        &[
            (TREASURES_TALK, selection.treasures_talk.as_str()),
            (SPIRITUAL_GEMS, selection.spiritual_gems.as_str()),
            (BIBLE_READING, selection.bible_reading.as_str()),
        ],
    )
}

fn closing(ctx: &Context<'_>, selection: &WeekPlan) -> SectionOutput {
    fixed(
        ctx,
        Section::Closing,
        &[(CLOSING_PRAYER, selection.closing_prayer.as_str())],
    )
}
