//! Plan: the organizer's per-week slot selections, stored as TOML.
//!
//! ```toml
//! start = "2025-09-01"
//! weeks = 4
//!
//! [[week]]
//! presiding = "Ana"
//! opening-prayer = "Carla"
//! study = "Ana"
//! reader = "Carla"
//!
//! [[week.ministry]]
//! slot = "Following Up"
//! assignees = ["Ana", "Carla"]
//! duration = 4
//!
//! [[week.living]]
//! slot = "Local Needs"
//! assignee = "Carla"
//! duration = 10
//! ```
//!
//! Every name field defaults to empty (unassigned).

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::week::WeekCount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Plan {
    /// Date of the first meeting.
    pub start: Date,

    /// How many weeks the plan covers (4 or 5).
    pub weeks: u8,

    /// Document title; falls back to the configured title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// One selection per week, in week order.
    #[serde(default, rename = "week")]
    pub selections: Vec<WeekPlan>,
}

/// Selections for a single week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WeekPlan {
    pub presiding: String,
    pub opening_prayer: String,
    pub treasures_talk: String,
    pub spiritual_gems: String,
    pub bible_reading: String,
    pub study: String,
    pub reader: String,

    /// Replaces (or supplements) the study and reader with the special slot.
    pub special: bool,
    pub special_assignee: String,
    pub closing_prayer: String,

    /// Ministry parts, in the order they run.
    pub ministry: Vec<MinistryChoice>,

    /// Variable living-as parts, in the order they run.
    pub living: Vec<LivingChoice>,
}

/// One ministry part: a template slot, its assignees, and an optional duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MinistryChoice {
    pub slot: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// One variable living-as part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LivingChoice {
    pub slot: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Plan {
    /// An unassigned plan of `count` weeks from `start`, each week holding
    /// one part of `ministry_slot` so it passes the part-count check as written.
    pub fn skeleton(start: Date, count: WeekCount, ministry_slot: &str) -> Self {
        let selections = (0..count.get())
            .map(|_| WeekPlan {
                ministry: vec![MinistryChoice {
                    slot: ministry_slot.to_string(),
                    ..MinistryChoice::default()
                }],
                ..WeekPlan::default()
            })
            .collect();
        Self {
            start,
            weeks: count.get(),
            title: None,
            selections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_example() {
        let plan: Plan = toml::from_str(
            r#"
start = "2025-09-01"
weeks = 4

[[week]]
presiding = "Ana"
opening-prayer = "Carla"

[[week.ministry]]
slot = "Following Up"
assignees = ["Ana", "Carla"]
duration = 4

[[week.living]]
slot = "Local Needs"
assignee = "Carla"
"#,
        )
        .unwrap();

        assert_eq!(plan.start, Date::new(2025, 9, 1).unwrap());
        assert_eq!(plan.selections.len(), 1);
        let week = &plan.selections[0];
        assert_eq!(week.presiding, "Ana");
        assert_eq!(week.study, "");
        assert!(!week.special);
        assert_eq!(week.ministry[0].duration, Some(4));
        assert_eq!(week.living[0].duration, None);
    }

    #[test]
    fn skeleton_survives_toml() {
        let plan = Plan::skeleton(Date::new(2025, 9, 1).unwrap(), WeekCount::Five, "Talk");

        let text = toml::to_string_pretty(&plan).unwrap();
        let back: Plan = toml::from_str(&text).unwrap();

        assert_eq!(back, plan);
        assert_eq!(back.weeks, 5);
        assert_eq!(back.selections.len(), 5);
        assert_eq!(back.selections[4].ministry[0].slot, "Talk");
    }
}
