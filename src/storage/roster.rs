//! Roster storage: load, save and edit `roster.csv`.

use std::fs;

use crate::model::{Participant, Roster, ingest};

use super::{Result, Storage, StorageError, open_existing};

impl Storage {
    /// Loads the roster, or `None` when no roster file exists yet.
    pub fn load_roster(&self) -> Result<Option<Roster>> {
        let Some(file) = open_existing(&self.roster_path())? else {
            return Ok(None);
        };
        Ok(Some(ingest::read_roster(file)?))
    }

    /// Writes the roster with canonical headers, replacing any existing file.
    pub fn save_roster(&self, roster: &Roster) -> Result<()> {
        let file = fs::File::create(self.roster_path())?;
        ingest::write_roster(roster, file)?;
        Ok(())
    }

    /// Adds a visible participant, creating the roster if needed.
    pub fn add_participant(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyName);
        }
        let mut roster = self.load_roster()?.unwrap_or_default();
        if roster.find(name).is_some() {
            return Err(StorageError::ParticipantExists(name.to_string()));
        }
        roster.push(Participant::new(name));
        self.save_roster(&roster)
    }

    /// Sets a participant's visibility. Hidden participants stay on the
    /// roster but cannot be assigned.
    pub fn set_visible(&self, name: &str, visible: bool) -> Result<()> {
        let mut roster = self.load_roster()?.unwrap_or_default();
        let participant = roster
            .find_mut(name.trim())
            .ok_or_else(|| StorageError::ParticipantNotFound(name.trim().to_string()))?;
        participant.visible = visible;
        self.save_roster(&roster)
    }

    /// Removes a participant entirely.
    pub fn remove_participant(&self, name: &str) -> Result<()> {
        let mut roster = self.load_roster()?.unwrap_or_default();
        if !roster.remove(name.trim()) {
            return Err(StorageError::ParticipantNotFound(name.trim().to_string()));
        }
        self.save_roster(&roster)
    }
}
