//! Living-as section: variable parts, then the study and reader.
//!
//! How many variable parts a week may carry, and what a special week does to
//! the study and reader, differ between congregations, so both are policy.

use serde::{Deserialize, Serialize};

use crate::model::{Section, WarningKind, WeekPlan, timed_label};

use super::{CONGREGATION_STUDY, Context, READER, SectionOutput};

/// How many variable living-as parts a week may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivingPolicy {
    /// Exactly one variable part.
    Single,

    /// A second part only when the first runs under `threshold` minutes.
    Conditional { threshold: u32 },

    /// Up to two variable parts.
    Double,
}

impl Default for LivingPolicy {
    fn default() -> Self {
        Self::Conditional { threshold: 15 }
    }
}

/// What the special-week slot does to the study and reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialWeekMode {
    /// The special slot is the only fixed slot that week.
    #[default]
    Replace,

    /// The special slot follows the study and reader.
    Supplement,
}

/// Whether a second variable part may follow a first part of `first_duration`.
pub fn second_slot_allowed(policy: LivingPolicy, first_duration: u32) -> bool {
    match policy {
        LivingPolicy::Single => false,
        LivingPolicy::Conditional { threshold } => first_duration < threshold,
        LivingPolicy::Double => true,
    }
}

pub(super) fn resolve(ctx: &Context<'_>, selection: &WeekPlan) -> SectionOutput {
    let mut out = SectionOutput::new(ctx.week, Section::LivingAs);
    let policy = ctx.policy.living;

    // Duration of the first variable part that actually resolved.
    let mut first: Option<u32> = None;
    let mut resolved = 0;
    for choice in &selection.living {
        let Some(row) = ctx.template.lookup(Section::LivingAs, &choice.slot) else {
            out.warn(&choice.slot, WarningKind::UnknownSlot);
            continue;
        };

        match (resolved, first) {
            (0, _) => {}
            (1, Some(first_duration)) if !second_slot_allowed(policy, first_duration) => {
                let kind = match policy {
                    LivingPolicy::Conditional { threshold } => WarningKind::SecondSlotNotAllowed {
                        first_duration,
                        threshold,
                    },
                    LivingPolicy::Single | LivingPolicy::Double => WarningKind::ExtraLivingSlot,
                };
                out.warn(&row.slot, kind);
                continue;
            }
            (1, _) => {}
            _ => {
                out.warn(&row.slot, WarningKind::ExtraLivingSlot);
                continue;
            }
        }

        let minutes = out.duration(row, choice.duration);
        let assignee = out.assignee(ctx.roster, &row.slot, &choice.assignee);
        out.push(timed_label(&row.slot, minutes), assignee);
        first.get_or_insert(minutes);
        resolved += 1;
    }

    if selection.special {
        match ctx.policy.special_week {
            SpecialWeekMode::Replace => special(ctx, selection, &mut out),
            SpecialWeekMode::Supplement => {
                study_and_reader(ctx, selection, &mut out);
                special(ctx, selection, &mut out);
            }
        }
    } else {
        study_and_reader(ctx, selection, &mut out);
    }

    out
}

fn study_and_reader(ctx: &Context<'_>, selection: &WeekPlan, out: &mut SectionOutput) {
    let study = out.assignee(ctx.roster, CONGREGATION_STUDY, &selection.study);
    out.push(
        timed_label(CONGREGATION_STUDY, ctx.policy.study_duration),
        study,
    );
    let reader = out.assignee(ctx.roster, READER, &selection.reader);
    out.push(READER.to_string(), reader);
}

/// The special-week slot, timed by its template row.
fn special(ctx: &Context<'_>, selection: &WeekPlan, out: &mut SectionOutput) {
    let Some(row) = ctx
        .template
        .lookup(Section::LivingAs, &ctx.policy.special_slot)
    else {
        out.warn(&ctx.policy.special_slot, WarningKind::UnknownSlot);
        return;
    };
    let assignee = out.assignee(ctx.roster, &row.slot, &selection.special_assignee);
    out.push(timed_label(&row.slot, row.time_min), assignee);
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{LivingChoice, MinistryChoice, Plan, Resolution, Template};
    use crate::resolve::tests::{full_week, sample_roster, sample_weeks};
    use crate::resolve::{Policy, resolve};
    use crate::week::WeekCount;

    fn choice(slot: &str, assignee: &str, duration: u32) -> LivingChoice {
        LivingChoice {
            slot: slot.into(),
            assignee: assignee.into(),
            duration: Some(duration),
        }
    }

    fn run(policy: &Policy, selection: WeekPlan) -> Resolution {
        let weeks = sample_weeks(WeekCount::Four);
        let weeks = &weeks[..1];
        let plan = Plan {
            start: weeks[0].date,
            weeks: 4,
            title: None,
            selections: vec![selection],
        };
        resolve(weeks, &sample_roster(), &Template::starter(), &plan, policy).unwrap()
    }

    fn living_labels(resolution: &Resolution) -> Vec<&str> {
        resolution
            .records
            .iter()
            .filter(|r| r.section == Section::LivingAs)
            .map(|r| r.slot_label.as_str())
            .collect()
    }

    fn two_parts(first_duration: u32) -> WeekPlan {
        WeekPlan {
            living: vec![
                choice("Local Needs", "Ana", first_duration),
                choice("Organizational Accomplishments", "Carla", 5),
            ],
            ..full_week()
        }
    }

    #[test]
    fn conditional_threshold_rule() {
        let policy = LivingPolicy::Conditional { threshold: 15 };
        assert!(second_slot_allowed(policy, 10));
        assert!(second_slot_allowed(policy, 14));
        assert!(!second_slot_allowed(policy, 15));
        assert!(!second_slot_allowed(LivingPolicy::Single, 1));
        assert!(second_slot_allowed(LivingPolicy::Double, 60));
    }

    #[test]
    fn short_first_part_admits_a_second() {
        let resolution = run(&Policy::default(), two_parts(10));
        assert_eq!(
            living_labels(&resolution),
            [
                "Local Needs (10 min)",
                "Organizational Accomplishments (5 min)",
                "Congregation Bible Study (30 min)",
                "Reader",
            ]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn long_first_part_skips_the_second() {
        let resolution = run(&Policy::default(), two_parts(15));
        assert_eq!(
            living_labels(&resolution),
            [
                "Local Needs (15 min)",
                "Congregation Bible Study (30 min)",
                "Reader",
            ]
        );
        assert_eq!(
            resolution.warnings[0].kind,
            WarningKind::SecondSlotNotAllowed {
                first_duration: 15,
                threshold: 15
            }
        );
    }

    #[test]
    fn single_policy_allows_one_part() {
        let policy = Policy {
            living: LivingPolicy::Single,
            ..Policy::default()
        };
        let resolution = run(&policy, two_parts(5));
        assert_eq!(living_labels(&resolution).len(), 3);
        assert_eq!(resolution.warnings[0].kind, WarningKind::ExtraLivingSlot);
    }

    #[test]
    fn double_policy_allows_two_but_not_three() {
        let policy = Policy {
            living: LivingPolicy::Double,
            ..Policy::default()
        };
        let mut selection = two_parts(15);
        selection
            .living
            .push(choice("Annual Service Report", "Daniel", 5));
        let resolution = run(&policy, selection);
        assert_eq!(
            living_labels(&resolution)[..2],
            [
                "Local Needs (15 min)",
                "Organizational Accomplishments (5 min)"
            ]
        );
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].slot, "Annual Service Report");
        assert_eq!(resolution.warnings[0].kind, WarningKind::ExtraLivingSlot);
    }

    #[test]
    fn unknown_first_part_lets_the_next_resolve_first() {
        let selection = WeekPlan {
            living: vec![
                choice("Missing Part", "Ana", 5),
                choice("Local Needs", "Carla", 15),
            ],
            ..full_week()
        };
        let resolution = run(&Policy::default(), selection);
        assert_eq!(living_labels(&resolution)[0], "Local Needs (15 min)");
        assert_eq!(resolution.warnings[0].kind, WarningKind::UnknownSlot);
    }

    #[test]
    fn special_week_replaces_study_and_reader() {
        let selection = WeekPlan {
            special: true,
            special_assignee: "Daniel".into(),
            ..full_week()
        };
        let resolution = run(&Policy::default(), selection);
        assert_eq!(
            living_labels(&resolution),
            ["Local Needs (15 min)", "Special Talk (30 min)"]
        );
    }

    #[test]
    fn special_week_can_supplement() {
        let policy = Policy {
            special_week: SpecialWeekMode::Supplement,
            ..Policy::default()
        };
        let selection = WeekPlan {
            special: true,
            special_assignee: "Daniel".into(),
            ..full_week()
        };
        let resolution = run(&policy, selection);
        assert_eq!(
            living_labels(&resolution),
            [
                "Local Needs (15 min)",
                "Congregation Bible Study (30 min)",
                "Reader",
                "Special Talk (30 min)",
            ]
        );
    }

    #[test]
    fn missing_special_slot_warns_and_other_slots_resolve() {
        let policy = Policy {
            special_slot: "Discurso Especial".into(),
            ..Policy::default()
        };
        let selection = WeekPlan {
            special: true,
            ministry: vec![MinistryChoice {
                slot: "Talk".into(),
                assignees: vec!["Ana".into()],
                duration: None,
            }],
            ..full_week()
        };
        let resolution = run(&policy, selection);

        assert_eq!(living_labels(&resolution), ["Local Needs (15 min)"]);
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].slot, "Discurso Especial");
        assert_eq!(resolution.warnings[0].kind, WarningKind::UnknownSlot);

        let sections: Vec<Section> = resolution.records.iter().map(|r| r.section).collect();
        for section in [
            Section::Opening,
            Section::Treasures,
            Section::Ministry,
            Section::Closing,
        ] {
            assert!(sections.contains(&section));
        }
    }
}
