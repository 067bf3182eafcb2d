//! Export files: timestamped artifacts under `exports/`.

use std::fs;
use std::path::PathBuf;

use crate::model::ExportKind;

use super::{Result, Storage};

impl Storage {
    /// Writes an export artifact as `exports/<stem>_<stamp>.<ext>`.
    ///
    /// An existing file is never overwritten: a numeric suffix is added
    /// instead. Returns the path written.
    pub fn write_export(&self, kind: ExportKind, stamp: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.exports_dir();
        fs::create_dir_all(&dir)?;

        let base = format!("{}_{stamp}", kind.stem());
        let mut path = dir.join(format!("{base}.{}", kind.extension()));
        let mut n = 1;
        while path.exists() {
            n += 1;
            path = dir.join(format!("{base}-{n}.{}", kind.extension()));
        }

        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Path of a previously written export, by file name.
    pub fn export_path(&self, file: &str) -> PathBuf {
        self.exports_dir().join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::tests::test_storage;

    #[test]
    fn export_names_carry_stem_and_stamp() {
        let (_dir, storage) = test_storage();
        let path = storage
            .write_export(ExportKind::GridPdf, "2025-09-01_19-30", b"%PDF")
            .unwrap();

        assert_eq!(
            path.file_name().unwrap(),
            "assignments_grid_2025-09-01_19-30.pdf"
        );
        assert_eq!(fs::read(&path).unwrap(), b"%PDF");
    }

    #[test]
    fn workbook_and_roster_exports_are_named_by_kind() {
        let (_dir, storage) = test_storage();
        let stamp = "2025-09-01_19-30";
        let names: Vec<String> = [ExportKind::Xlsx, ExportKind::RosterCsv, ExportKind::RosterPdf]
            .into_iter()
            .map(|kind| storage.write_export(kind, stamp, b"x").unwrap())
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            names,
            [
                "assignments_2025-09-01_19-30.xlsx",
                "roster_2025-09-01_19-30.csv",
                "roster_2025-09-01_19-30.pdf",
            ]
        );
    }

    #[test]
    fn same_minute_exports_do_not_collide() {
        let (_dir, storage) = test_storage();
        let first = storage
            .write_export(ExportKind::Csv, "2025-09-01_19-30", b"a")
            .unwrap();
        let second = storage
            .write_export(ExportKind::Csv, "2025-09-01_19-30", b"b")
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap(),
            "assignments_2025-09-01_19-30-2.csv"
        );
        assert_eq!(fs::read(first).unwrap(), b"a");
    }
}
