//! Agenda template storage: `template.csv`.

use std::fs;

use crate::model::{Template, ingest};

use super::{Result, Storage, open_existing};

impl Storage {
    /// Loads the template, or `None` when no template file exists yet.
    pub fn load_template(&self) -> Result<Option<Template>> {
        let Some(file) = open_existing(&self.template_path())? else {
            return Ok(None);
        };
        Ok(Some(ingest::read_template(file)?))
    }

    /// Writes the template, replacing any existing file.
    pub fn save_template(&self, template: &Template) -> Result<()> {
        let file = fs::File::create(self.template_path())?;
        ingest::write_template(template, file)?;
        Ok(())
    }
}
