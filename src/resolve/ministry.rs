//! Ministry section: a variable number of organizer-chosen parts.
//!
//! Each part names a template slot. The talk slot takes one assignee and a
//! fixed duration; every other part is a pair with a duration chosen inside
//! the template bounds.

use crate::model::{MinistryChoice, Section, WarningKind, timed_label};

use super::{Context, SectionOutput};

pub(super) fn resolve(ctx: &Context<'_>, parts: &[MinistryChoice]) -> SectionOutput {
    let mut out = SectionOutput::new(ctx.week, Section::Ministry);
    for part in parts {
        let Some(row) = ctx.template.lookup(Section::Ministry, &part.slot) else {
            out.warn(&part.slot, WarningKind::UnknownSlot);
            continue;
        };

        let (minutes, names) = if is_talk(&row.slot, &ctx.policy.talk_slot) {
            let names = out.assignees(ctx.roster, &row.slot, &part.assignees, 1);
            (ctx.policy.talk_duration, names)
        } else {
            let minutes = out.duration(row, part.duration);
            let names = out.assignees(ctx.roster, &row.slot, &part.assignees, 2);
            (minutes, names)
        };

        out.push(
            timed_label(&row.slot, minutes),
            names.join(&ctx.policy.pair_separator),
        );
    }
    out
}

fn is_talk(slot: &str, talk_slot: &str) -> bool {
    slot.trim().eq_ignore_ascii_case(talk_slot.trim())
}
