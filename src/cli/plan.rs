//! Plan commands: scaffold a plan file for a run of weeks.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Config;
use crate::model::{Plan, Section};
use crate::storage::Storage;
use crate::week::WeekCount;

use super::WeekSpan;

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Write an empty plan with one `[[week]]` table per week.
    ///
    /// Fill in names and slots, then pass the file to `resolve` or `export`.
    New {
        #[command(flatten)]
        span: WeekSpan,

        /// Write the plan here instead of stdout. Never overwrites.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub(super) fn run(config: &Config, storage: &Storage, command: PlanCommand) -> Result<(), String> {
    match command {
        PlanCommand::New { span, out } => cmd_new(config, storage, &span, out.as_deref()),
    }
}

fn cmd_new(
    config: &Config,
    storage: &Storage,
    span: &WeekSpan,
    out: Option<&Path>,
) -> Result<(), String> {
    let weeks = span.weeks(config)?;
    let count = u8::try_from(weeks.len())
        .ok()
        .and_then(|n| WeekCount::try_from(n).ok())
        .ok_or_else(|| format!("unexpected week count {}", weeks.len()))?;

    // Seed each week with the template's first ministry slot, if there is one.
    let template = storage
        .load_template()
        .map_err(|e| format!("failed to load template: {e}"))?;
    let ministry_slot = template
        .as_ref()
        .and_then(|t| t.rows_for(Section::Ministry).next())
        .map_or(config.ministry.talk_slot.clone(), |row| row.slot.clone());

    let plan = Plan::skeleton(weeks[0].date, count, &ministry_slot);
    let toml = toml::to_string(&plan).map_err(|e| format!("failed to serialize plan: {e}"))?;

    match out {
        Some(path) => {
            if path.exists() {
                return Err(format!("{} already exists", path.display()));
            }
            fs::write(path, &toml)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            let labels: Vec<&str> = weeks.iter().map(|w| w.label.as_str()).collect();
            eprintln!("Plan for {} → {}", labels.join(", "), path.display());
        }
        None => print!("{toml}"),
    }
    Ok(())
}
