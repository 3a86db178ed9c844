//! Party-roster persistence.
//!
//! The battle outcome handler writes the player's HP back here after every
//! exchange so progress survives a scene switch mid-battle. The store
//! contract is whole-record replacement: `set_active_member_hp` rewrites
//! the member record in one step, never a partial update.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use battle_content::CharacterRecord;

/// Errors surfaced by party store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access party file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode party file")]
    Serialization(#[from] serde_json::Error),

    #[error("party store has no active member")]
    NoActiveMember,
}

/// External party-roster store the battle persists player HP through.
///
/// The active battle session is the only writer during a battle, so no
/// cross-session locking is required.
pub trait PartyStore: Send + Sync {
    /// Snapshot of the active party member (index 0).
    fn active_member(&self) -> Result<CharacterRecord, StoreError>;

    /// Replace the active member's current HP.
    fn set_active_member_hp(&self, current_hp: u32) -> Result<(), StoreError>;
}

/// In-memory store over a party list.
pub struct InMemoryPartyStore {
    members: Mutex<Vec<CharacterRecord>>,
}

impl InMemoryPartyStore {
    pub fn new(members: Vec<CharacterRecord>) -> Self {
        Self {
            members: Mutex::new(members),
        }
    }

    /// Current party snapshot.
    pub fn members(&self) -> Vec<CharacterRecord> {
        self.members
            .lock()
            .expect("party store mutex poisoned")
            .clone()
    }
}

impl PartyStore for InMemoryPartyStore {
    fn active_member(&self) -> Result<CharacterRecord, StoreError> {
        self.members
            .lock()
            .expect("party store mutex poisoned")
            .first()
            .cloned()
            .ok_or(StoreError::NoActiveMember)
    }

    fn set_active_member_hp(&self, current_hp: u32) -> Result<(), StoreError> {
        let mut members = self.members.lock().expect("party store mutex poisoned");
        let member = members.first_mut().ok_or(StoreError::NoActiveMember)?;
        member.current_hp = current_hp;
        Ok(())
    }
}

/// JSON-file-backed store.
///
/// Writes go to a temp file and are renamed into place, so a failed write
/// never leaves a half-updated roster behind.
pub struct FilePartyStore {
    path: PathBuf,
}

impl FilePartyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the file with an initial roster if it does not exist yet.
    pub fn initialize(path: impl Into<PathBuf>, members: &[CharacterRecord]) -> Result<Self, StoreError> {
        let store = Self::new(path);
        if !store.path.exists() {
            store.write(members)?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<CharacterRecord>, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, members: &[CharacterRecord]) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(members)?;

        fs::write(&temp_path, bytes).map_err(|e| StoreError::Io {
            path: temp_path.display().to_string(),
            source: e,
        })?;

        // Atomic replace
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), "party roster saved");
        Ok(())
    }
}

impl PartyStore for FilePartyStore {
    fn active_member(&self) -> Result<CharacterRecord, StoreError> {
        self.read()?.into_iter().next().ok_or(StoreError::NoActiveMember)
    }

    fn set_active_member_hp(&self, current_hp: u32) -> Result<(), StoreError> {
        let mut members = self.read()?;
        let member = members.first_mut().ok_or(StoreError::NoActiveMember)?;
        member.current_hp = current_hp;
        self.write(&members)
    }
}
