//! Local persistence for the roster, agenda template and exports.
//!
//! Everything lives under one root directory:
//!
//! ```text
//! <root>/
//!   config.toml      # Optional settings (see `config`)
//!   roster.csv       # Participants and their visibility
//!   template.csv     # Agenda slots with duration bounds
//!   history.jsonl    # Append-only record of every export
//!   exports/         # Timestamped CSV, PDF and XLSX files
//! ```

mod exports;
mod history;
mod roster;
mod template;

use std::{env, fs, io, path::Path, path::PathBuf};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("participant already on the roster: {0}")]
    ParticipantExists(String),

    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("participant name is empty")]
    EmptyName,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Environment variable overriding the storage root.
pub const HOME_VAR: &str = "VMC_HOME";

const ROSTER_FILE: &str = "roster.csv";
const TEMPLATE_FILE: &str = "template.csv";
const HISTORY_FILE: &str = "history.jsonl";
const EXPORTS_DIR: &str = "exports";

/// Local file-based storage rooted at one directory.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `$VMC_HOME`, else `~/.vmc/`.
    pub fn default_root() -> Option<PathBuf> {
        if let Ok(home) = env::var(HOME_VAR)
            && !home.is_empty()
        {
            return Some(PathBuf::from(home));
        }
        dirs::home_dir().map(|h| h.join(".vmc"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn roster_path(&self) -> PathBuf {
        self.root.join(ROSTER_FILE)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    fn exports_dir(&self) -> PathBuf {
        self.root.join(EXPORTS_DIR)
    }
}

/// Open a file for reading, mapping "not found" to `None`.
fn open_existing(path: &Path) -> Result<Option<fs::File>> {
    match fs::File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
