//! Agenda template commands: list, init.

use clap::Subcommand;

use crate::model::Template;
use crate::storage::Storage;

use super::format::format_template;
use super::missing_template_notice;

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List template slots with their duration bounds.
    List,

    /// Write a starter template with the usual ministry and living-as slots.
    ///
    /// Refuses to replace an existing template unless `--force` is given.
    Init {
        #[arg(long)]
        force: bool,
    },
}

pub(super) fn run(storage: &Storage, command: TemplateCommand) -> Result<(), String> {
    match command {
        TemplateCommand::List => cmd_list(storage),
        TemplateCommand::Init { force } => cmd_init(storage, force),
    }
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let template = storage
        .load_template()
        .map_err(|e| format!("failed to load template: {e}"))?;
    match template {
        Some(template) if !template.is_empty() => println!("{}", format_template(&template)),
        Some(_) => println!("No template slots"),
        None => eprintln!("{}", missing_template_notice(storage)),
    }
    Ok(())
}

fn cmd_init(storage: &Storage, force: bool) -> Result<(), String> {
    let path = storage.template_path();
    if path.exists() && !force {
        return Err(format!(
            "template already exists at {}; pass --force to replace it",
            path.display()
        ));
    }
    storage
        .save_template(&Template::starter())
        .map_err(|e| format!("failed to write template: {e}"))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}
