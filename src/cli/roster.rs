//! Roster commands: list, add, hide, show, remove, eligible, export.

use clap::{Subcommand, ValueEnum};

use crate::model::{ExportKind, ingest};
use crate::render;
use crate::storage::Storage;

use super::format::format_roster;
use super::{export_stamp, missing_roster_notice, record_export};

const DEFAULT_TITLE: &str = "Roster";

#[derive(Debug, Subcommand)]
pub enum RosterCommand {
    /// List every participant with their visibility.
    List,

    /// Add a visible participant.
    Add {
        /// Name exactly as it should appear on assignments.
        name: String,
    },

    /// Hide a participant: kept on the roster, never assigned.
    Hide { name: String },

    /// Make a hidden participant assignable again.
    Show { name: String },

    /// Remove a participant from the roster.
    Remove { name: String },

    /// Print the names offered for a slot: unassigned, then every eligible name.
    Eligible,

    /// Write the whole roster, hidden participants included, as a
    /// timestamped export recorded in the history.
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: RosterFormat,

        /// Document title for the PDF.
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RosterFormat {
    /// `name,visible` table.
    Csv,
    /// Name and status table.
    Pdf,
}

impl RosterFormat {
    fn to_domain(self) -> ExportKind {
        match self {
            Self::Csv => ExportKind::RosterCsv,
            Self::Pdf => ExportKind::RosterPdf,
        }
    }
}

pub(super) fn run(storage: &Storage, command: RosterCommand) -> Result<(), String> {
    match command {
        RosterCommand::List => cmd_list(storage),
        RosterCommand::Add { name } => {
            storage
                .add_participant(&name)
                .map_err(|e| format!("failed to add participant: {e}"))?;
            eprintln!("Added {}", name.trim());
            Ok(())
        }
        RosterCommand::Hide { name } => {
            storage
                .set_visible(&name, false)
                .map_err(|e| format!("failed to hide participant: {e}"))?;
            eprintln!("Hid {}", name.trim());
            Ok(())
        }
        RosterCommand::Show { name } => {
            storage
                .set_visible(&name, true)
                .map_err(|e| format!("failed to show participant: {e}"))?;
            eprintln!("Showing {}", name.trim());
            Ok(())
        }
        RosterCommand::Remove { name } => {
            storage
                .remove_participant(&name)
                .map_err(|e| format!("failed to remove participant: {e}"))?;
            eprintln!("Removed {}", name.trim());
            Ok(())
        }
        RosterCommand::Eligible => cmd_eligible(storage),
        RosterCommand::Export { format, title } => cmd_export(storage, format, title.as_deref()),
    }
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let roster = storage
        .load_roster()
        .map_err(|e| format!("failed to load roster: {e}"))?;
    match roster {
        Some(roster) if !roster.is_empty() => println!("{}", format_roster(&roster)),
        Some(_) => println!("No participants"),
        None => eprintln!("{}", missing_roster_notice(storage)),
    }
    Ok(())
}

fn cmd_eligible(storage: &Storage) -> Result<(), String> {
    let roster = storage
        .load_roster()
        .map_err(|e| format!("failed to load roster: {e}"))?;
    let Some(roster) = roster else {
        eprintln!("{}", missing_roster_notice(storage));
        return Ok(());
    };
    for name in roster.choices() {
        if name.is_empty() {
            println!("(unassigned)");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_export(storage: &Storage, format: RosterFormat, title: Option<&str>) -> Result<(), String> {
    let roster = storage
        .load_roster()
        .map_err(|e| format!("failed to load roster: {e}"))?;
    let Some(roster) = roster else {
        eprintln!("{}", missing_roster_notice(storage));
        return Ok(());
    };

    let bytes = match format {
        RosterFormat::Csv => {
            let mut buf = Vec::new();
            ingest::write_roster(&roster, &mut buf)
                .map_err(|e| format!("failed to serialize roster: {e}"))?;
            buf
        }
        RosterFormat::Pdf => render::render_roster(&roster, title.unwrap_or(DEFAULT_TITLE)),
    };

    let path = record_export(
        storage,
        format.to_domain(),
        &export_stamp(),
        &bytes,
        roster.participants().len(),
    )?;
    println!("{}", path.display());
    Ok(())
}
