//! Core data model.
//!
//! Roster participants, the agenda template, the organizer's plan, and the
//! assignment records a resolution pass produces.

mod export;
pub mod ingest;
mod participant;
mod plan;
mod record;
mod section;
mod template;

pub use export::{ExportEntry, ExportKind};
pub use participant::{Participant, Roster};
pub use plan::{LivingChoice, MinistryChoice, Plan, WeekPlan};
pub use record::{AssignmentRecord, Resolution, Warning, WarningKind, timed_label};
pub use section::Section;
pub use template::{AgendaTemplateRow, Template};
