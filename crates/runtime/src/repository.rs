//! File-based snapshot persistence.
//!
//! Snapshots are stored as individual bincode files per save slot, written
//! through a temp file and an atomic rename so a crash mid-save never
//! corrupts an existing slot.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survival_core::CharacterState;

use crate::error::{Result, RuntimeError};
use crate::session::GameSession;

/// Everything needed to resume a session and replay it identically: the
/// character state (survival meters, vitality, previous active-condition
/// set, tick nonce) and the session seed, plus a wall-clock stamp for
/// save-slot listings. Catalogs are static content and never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub character: CharacterState,
    pub seed: u64,
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        Self {
            character: session.character().clone(),
            seed: session.seed(),
            saved_at: Utc::now(),
        }
    }

    /// Human-readable rendering of the snapshot, for debug exports.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RuntimeError::Serialization(e.to_string()))
    }
}

/// File-based snapshot store, one `.bin` file per save slot.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform-appropriate default save directory.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "survival-engine")
            .map(|dirs| dirs.data_dir().join("saves"))
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.bin"))
    }

    /// Save a snapshot into a named slot.
    pub fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RuntimeError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(slot, path = %path.display(), "saved session snapshot");
        Ok(())
    }

    /// Load a snapshot from a named slot, `None` if the slot is empty.
    pub fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot = bincode::deserialize(&bytes)
            .map_err(|e| RuntimeError::Serialization(e.to_string()))?;

        tracing::debug!(slot, path = %path.display(), "loaded session snapshot");
        Ok(Some(snapshot))
    }

    pub fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }

    pub fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(slot, "deleted session snapshot");
        }
        Ok(())
    }

    /// Names of all occupied save slots.
    pub fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("bin")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                slots.push(stem.to_string());
            }
        }
        slots.sort();
        Ok(slots)
    }
}
