//! Filesystem image asset store.
//!
//! Captures live under `<root>/<variant>/<lake>/`, one file per capture,
//! named with a `YYYY-MM-DD` date prefix (e.g. `2024-03-03_t1.jpg`).
//! Lookup is by date-prefix match; when several files share a date the
//! lexicographically first filename wins, so repeated lookups always
//! agree. A missing directory or prefix is a miss (`None`), never an
//! error; only genuine read failures surface as `Err`.

use chrono::NaiveDate;
use lago_core::error::Result;
use lago_core::image::{AssetStore, ImageVariant};
use lago_core::observation::DATE_FORMAT;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read-only view over an on-disk asset tree.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the on-disk path for a `(lake, date, variant)` key, if a
    /// matching capture exists.
    pub fn find(
        &self,
        lake: &str,
        date: NaiveDate,
        variant: ImageVariant,
    ) -> Result<Option<PathBuf>> {
        let dir = self.root.join(variant.as_str()).join(lake);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let prefix = date.format(DATE_FORMAT).to_string();
        let mut matches: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(&prefix) {
                matches.push(name);
            }
        }
        // Lexicographic order keeps same-date ties stable across calls.
        matches.sort();
        Ok(matches.first().map(|name| dir.join(name)))
    }
}

impl AssetStore for AssetDir {
    fn lookup(&self, lake: &str, date: NaiveDate, variant: ImageVariant) -> Result<Option<Vec<u8>>> {
        match self.find(lake, date, variant)? {
            Some(path) => {
                log::info!("assets: hit {}", path.display());
                Ok(Some(fs::read(path)?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    /// Builds an asset tree with a few captures for one lake.
    fn sample_tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let raw = tmp.path().join("raw").join("van");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("2024-03-03_b.jpg"), b"raw-b").unwrap();
        fs::write(raw.join("2024-03-03_a.jpg"), b"raw-a").unwrap();
        fs::write(raw.join("2024-03-05.jpg"), b"raw-single").unwrap();

        let border = tmp.path().join("border").join("van");
        fs::create_dir_all(&border).unwrap();
        fs::write(border.join("2024-03-05.jpg"), b"border-single").unwrap();
        tmp
    }

    #[test]
    fn lookup_matches_by_date_prefix() {
        let tmp = sample_tree();
        let assets = AssetDir::new(tmp.path());
        let bytes = assets
            .lookup("van", date("2024-03-05"), ImageVariant::Raw)
            .unwrap();
        assert_eq!(bytes.as_deref(), Some(b"raw-single".as_slice()));
    }

    #[test]
    fn same_date_ties_break_lexicographically() {
        let tmp = sample_tree();
        let assets = AssetDir::new(tmp.path());
        let bytes = assets
            .lookup("van", date("2024-03-03"), ImageVariant::Raw)
            .unwrap();
        assert_eq!(
            bytes.as_deref(),
            Some(b"raw-a".as_slice()),
            "2024-03-03_a.jpg sorts before 2024-03-03_b.jpg"
        );
        // Stable across repeated calls.
        let again = assets
            .lookup("van", date("2024-03-03"), ImageVariant::Raw)
            .unwrap();
        assert_eq!(bytes, again);
    }

    #[test]
    fn variants_are_separate_namespaces() {
        let tmp = sample_tree();
        let assets = AssetDir::new(tmp.path());
        let border = assets
            .lookup("van", date("2024-03-05"), ImageVariant::Border)
            .unwrap();
        assert_eq!(border.as_deref(), Some(b"border-single".as_slice()));
        let border_miss = assets
            .lookup("van", date("2024-03-03"), ImageVariant::Border)
            .unwrap();
        assert!(border_miss.is_none());
    }

    #[test]
    fn missing_lake_or_date_is_a_miss_not_an_error() {
        let tmp = sample_tree();
        let assets = AssetDir::new(tmp.path());
        assert!(assets
            .lookup("atlantis", date("2024-03-05"), ImageVariant::Raw)
            .unwrap()
            .is_none());
        assert!(assets
            .lookup("van", date("2019-01-01"), ImageVariant::Raw)
            .unwrap()
            .is_none());
    }

    #[test]
    fn missing_root_is_a_miss() {
        let assets = AssetDir::new("/nonexistent/asset/root");
        assert!(assets
            .lookup("van", date("2024-03-05"), ImageVariant::Raw)
            .unwrap()
            .is_none());
    }
}
