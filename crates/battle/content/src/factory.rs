//! Content factory for building the battle data set from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::AttackCatalog;
use crate::error::ContentError;
use crate::roster::{EnemyRoster, PartyFile};

/// Loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── attacks.json
/// ├── enemies.json
/// └── party.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load_attacks(&self) -> Result<AttackCatalog, ContentError> {
        let (source, origin) = self.read("attacks.json")?;
        AttackCatalog::load_str(&source, &origin)
    }

    pub fn load_enemies(&self) -> Result<EnemyRoster, ContentError> {
        let (source, origin) = self.read("enemies.json")?;
        EnemyRoster::load_str(&source, &origin)
    }

    pub fn load_party(&self) -> Result<PartyFile, ContentError> {
        let (source, origin) = self.read("party.json")?;
        PartyFile::load_str(&source, &origin)
    }

    fn read(&self, file: &str) -> Result<(String, String), ContentError> {
        let path = self.data_dir.join(file);
        let origin = path.display().to_string();
        let source = fs::read_to_string(&path).map_err(|e| ContentError::io(&origin, e))?;
        Ok((source, origin))
    }
}

/// The embedded default data set, used by the demo client and tests.
pub struct EmbeddedContent {
    pub attacks: AttackCatalog,
    pub enemies: EnemyRoster,
    pub party: PartyFile,
}

impl EmbeddedContent {
    pub fn load() -> Result<Self, ContentError> {
        Ok(Self {
            attacks: AttackCatalog::embedded()?,
            enemies: EnemyRoster::embedded()?,
            party: PartyFile::embedded()?,
        })
    }
}

/// Copy the embedded data files into a directory (demo/bootstrap helper).
pub fn write_default_data(data_dir: &Path) -> Result<(), ContentError> {
    fs::create_dir_all(data_dir)
        .map_err(|e| ContentError::io(data_dir.display().to_string(), e))?;
    for (file, contents) in [
        ("attacks.json", include_str!("../data/attacks.json")),
        ("enemies.json", include_str!("../data/enemies.json")),
        ("party.json", include_str!("../data/party.json")),
    ] {
        let path = data_dir.join(file);
        fs::write(&path, contents).map_err(|e| ContentError::io(path.display().to_string(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_loads_a_written_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_default_data(dir.path()).unwrap();

        let factory = ContentFactory::new(dir.path());
        let attacks = factory.load_attacks().unwrap();
        let enemies = factory.load_enemies().unwrap();
        let party = factory.load_party().unwrap();

        assert!(!attacks.is_empty());
        assert!(!enemies.is_empty());
        assert_eq!(party.active().name, "Thor");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        let err = factory.load_attacks().unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
        assert!(err.to_string().contains("attacks.json"));
    }
}
