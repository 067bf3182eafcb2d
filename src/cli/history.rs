//! Export history commands: list, show.

use std::fs;

use clap::Subcommand;
use sha2::{Digest, Sha256};

use crate::model::ExportEntry;
use crate::storage::Storage;

use super::format::{format_history, short_id};

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List past exports, oldest first.
    List,

    /// Show one export and check its file against the recorded digest.
    Show {
        /// Entry ID: full UUID or unambiguous prefix (e.g. `a3b`).
        id: String,
    },
}

pub(super) fn run(storage: &Storage, command: HistoryCommand) -> Result<(), String> {
    match command {
        HistoryCommand::List => cmd_list(storage),
        HistoryCommand::Show { id } => cmd_show(storage, &id),
    }
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let entries = storage
        .load_history()
        .map_err(|e| format!("failed to load history: {e}"))?;
    if entries.is_empty() {
        println!("No exports");
    } else {
        println!("{}", format_history(&entries));
    }
    Ok(())
}

fn cmd_show(storage: &Storage, reference: &str) -> Result<(), String> {
    let entries = storage
        .load_history()
        .map_err(|e| format!("failed to load history: {e}"))?;
    let entry = resolve_entry(&entries, reference)?;

    let path = storage.export_path(&entry.file);
    let status = match fs::read(&path) {
        Ok(bytes) if digest(&bytes) == entry.sha256 => "verified",
        Ok(_) => "modified since export",
        Err(_) => "missing",
    };

    println!("id:       {}", entry.id);
    println!("kind:     {}", entry.kind);
    println!("exported: {}", entry.exported_at);
    println!("records:  {}", entry.records);
    println!("file:     {}", path.display());
    println!("sha256:   {}", entry.sha256);
    println!("status:   {status}");
    Ok(())
}

/// Hex SHA-256 of exported bytes.
pub(super) fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Resolve an entry reference (full UUID or unambiguous prefix).
fn resolve_entry<'a>(entries: &'a [ExportEntry], reference: &str) -> Result<&'a ExportEntry, String> {
    let matches: Vec<&ExportEntry> = entries
        .iter()
        .filter(|e| e.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no export matching '{reference}'")),
        1 => Ok(matches[0]),
        n => {
            let ids: Vec<String> = matches.iter().map(|e| short_id(e)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} exports: {}",
                ids.join(", ")
            ))
        }
    }
}
