//! Progression persistence
//!
//! A flat key-value blob: the whole `ProgressionState` is written on every
//! change, wrapped in a versioned envelope.

use super::ProgressionState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Envelope version written by this build
pub const SAVE_VERSION: u32 = 1;

/// Errors from a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed save data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Where progression state lives between runs
pub trait Storage {
    /// Read the stored state, `None` when nothing has been saved yet
    ///
    /// # Errors
    /// Returns `StorageError` if the backend fails or holds unreadable data.
    fn load(&mut self) -> Result<Option<ProgressionState>, StorageError>;

    /// Replace the stored state
    ///
    /// # Errors
    /// Returns `StorageError` if the write fails.
    fn save(&mut self, state: &ProgressionState) -> Result<(), StorageError>;
}

#[derive(Deserialize)]
struct SaveHeader {
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct SaveFile<T> {
    version: u32,
    state: T,
}

/// JSON file on disk, replaced atomically on save
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/wordle_mini/progress.json`, or the working directory if
    /// the platform has no data dir
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map_or_else(|| PathBuf::from("."), |dir| dir.join("wordle_mini"))
            .join("progress.json")
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&mut self) -> Result<Option<ProgressionState>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let header: SaveHeader = serde_json::from_slice(&bytes)?;
        if header.version > SAVE_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: header.version,
                supported: SAVE_VERSION,
            });
        }

        let save: SaveFile<ProgressionState> = serde_json::from_slice(&bytes)?;
        Ok(Some(save.state))
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(&SaveFile {
            version: SAVE_VERSION,
            state,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}

/// In-memory storage, mainly for tests
///
/// Can be told to fail a number of upcoming saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Option<ProgressionState>,
    saves: usize,
    failing_saves: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `state`
    #[must_use]
    pub fn with_state(state: ProgressionState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    /// Make the next `count` saves fail
    pub fn fail_next_saves(&mut self, count: usize) {
        self.failing_saves = count;
    }

    /// Last successfully saved state
    #[must_use]
    pub const fn stored(&self) -> Option<&ProgressionState> {
        self.state.as_ref()
    }

    /// Number of successful saves
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self) -> Result<Option<ProgressionState>, StorageError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), StorageError> {
        if self.failing_saves > 0 {
            self.failing_saves -= 1;
            return Err(io::Error::other("storage unavailable").into());
        }
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::GameRecord;
    use tempfile::tempdir;

    fn sample_state() -> ProgressionState {
        ProgressionState {
            coins: 65,
            max_level: 3,
            max_score: 90,
            max_time_ms: 31_500,
            current_level: 4,
            game_history: vec![GameRecord {
                level: 3,
                won: true,
                skipped: false,
                attempts: 2,
                elapsed_ms: 31_500,
                score: 90,
                coins_earned: 40,
            }],
        }
    }

    #[test]
    fn failed_save_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        // A non-empty directory at the save path makes the rename fail
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        let mut storage = JsonFileStorage::new(&path);
        assert!(storage.save(&sample_state()).is_err());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let mut storage = JsonFileStorage::new(dir.path().join("progress.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_returns_same_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");
        let mut storage = JsonFileStorage::new(&path);

        storage.save(&sample_state()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = JsonFileStorage::new(&path).load().unwrap();
        assert_eq!(loaded, Some(sample_state()));
    }

    #[test]
    fn saved_file_carries_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        JsonFileStorage::new(&path).save(&sample_state()).unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], SAVE_VERSION);
        assert_eq!(raw["state"]["coins"], 65);
    }

    #[test]
    fn newer_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"version": 99, "state": {}}"#).unwrap();

        let result = JsonFileStorage::new(&path).load();
        assert!(matches!(
            result,
            Err(StorageError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            JsonFileStorage::new(&path).load(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn memory_storage_injected_failures() {
        let mut storage = MemoryStorage::new();
        storage.fail_next_saves(1);

        assert!(storage.save(&sample_state()).is_err());
        assert!(storage.stored().is_none());
        storage.save(&sample_state()).unwrap();
        assert_eq!(storage.stored(), Some(&sample_state()));
        assert_eq!(storage.save_count(), 1);
    }
}
