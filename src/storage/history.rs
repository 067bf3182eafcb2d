//! Export history: append and load `history.jsonl`.

use std::{fs, io};

// Traits must be in scope for `.lines()` on BufReader and `.write_all()` on File.
use io::{BufRead, Write};

use crate::model::ExportEntry;

use super::{Result, Storage, open_existing};

impl Storage {
    /// Appends one export entry to the history.
    pub fn append_history(&self, entry: &ExportEntry) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.history_path())?;
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Loads every export entry, oldest first. No history file means none.
    pub fn load_history(&self) -> Result<Vec<ExportEntry>> {
        let Some(file) = open_existing(&self.history_path())? else {
            return Ok(Vec::new());
        };
        let reader = io::BufReader::new(file);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                entries.push(serde_json::from_str(&line)?);
            }
        }
        Ok(entries)
    }
}
