//! JSON file store adapter.
//!
//! Implements [`SecurityRepository`] so the controller resumes where it
//! left off: arming mode, alarm status and the sensor registry survive a
//! restart.  The detection flag is not stored.
//!
//! # Durability
//!
//! - Every mutation rewrites the whole snapshot before it becomes visible
//!   to readers; a failed write leaves the in-memory state untouched.
//! - Each write goes to a uniquely named temp file in the same directory,
//!   is synced to disk and then renamed over the snapshot.  Readers see
//!   either the old document or the new one, never a partial write.
//! - A missing file is a fresh install; an unreadable one is an error,
//!   never silently reset.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::alarm::sensor::Sensor;
use crate::alarm::{AlarmStatus, ArmingMode};
use crate::app::ports::{RepositoryError, SecurityRepository};

use super::memory::InMemoryRepository;

/// On-disk layout.  Every field has a default so older or hand-edited
/// files still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub arming_mode: ArmingMode,
    pub alarm_status: AlarmStatus,
    pub sensors: Vec<Sensor>,
}

impl StateSnapshot {
    /// Parse a stored snapshot.
    pub fn decode(bytes: &[u8]) -> Result<Self, RepositoryError> {
        serde_json::from_slice(bytes).map_err(|e| {
            warn!("State snapshot rejected: {}", e);
            RepositoryError::Corrupted
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, RepositoryError> {
        serde_json::to_vec_pretty(self).map_err(|_| RepositoryError::Corrupted)
    }

    fn capture(repo: &InMemoryRepository) -> Result<Self, RepositoryError> {
        Ok(Self {
            arming_mode: repo.arming_mode()?,
            alarm_status: repo.alarm_status()?,
            sensors: repo.sensors()?,
        })
    }

    fn restore(self) -> InMemoryRepository {
        InMemoryRepository::with_state(self.arming_mode, self.alarm_status, self.sensors)
    }
}

/// Durable repository persisted as one JSON document.
pub struct JsonFileRepository {
    path: PathBuf,
    state: InMemoryRepository,
}

impl JsonFileRepository {
    /// Open (or start) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let state = match std::fs::read(&path) {
            Ok(bytes) => {
                let snapshot = StateSnapshot::decode(&bytes)?;
                info!(
                    "JsonFileRepository: loaded {} ({} sensors, {}, {})",
                    path.display(),
                    snapshot.sensors.len(),
                    snapshot.arming_mode,
                    snapshot.alarm_status
                );
                snapshot.restore()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("JsonFileRepository: no state at {}, starting fresh", path.display());
                InMemoryRepository::new()
            }
            Err(e) => {
                warn!("JsonFileRepository: cannot read {}: {}", path.display(), e);
                return Err(e.into());
            }
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy, persist the copy, then adopt it.
    fn commit(
        &mut self,
        change: impl FnOnce(&mut InMemoryRepository) -> Result<(), RepositoryError>,
    ) -> Result<(), RepositoryError> {
        let mut next = self.state.clone();
        change(&mut next)?;
        write_atomically(&self.path, &StateSnapshot::capture(&next)?.encode()?)?;
        self.state = next;
        Ok(())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), RepositoryError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| {
        warn!("JsonFileRepository: cannot stage {}: {}", path.display(), e);
        RepositoryError::from(e)
    })?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| {
            warn!("JsonFileRepository: write to {} failed: {}", tmp.path().display(), e);
            RepositoryError::from(e)
        })?;
    tmp.persist(path).map_err(|e| {
        warn!("JsonFileRepository: replace {} failed: {}", path.display(), e.error);
        RepositoryError::from(e.error)
    })?;
    Ok(())
}

impl SecurityRepository for JsonFileRepository {
    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        self.state.sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.commit(|s| s.add_sensor(sensor))
    }

    fn remove_sensor(&mut self, name: &str) -> Result<(), RepositoryError> {
        self.commit(|s| s.remove_sensor(name))
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.commit(|s| s.update_sensor(sensor))
    }

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        self.state.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.commit(|s| s.set_alarm_status(status))
    }

    fn arming_mode(&self) -> Result<ArmingMode, RepositoryError> {
        self.state.arming_mode()
    }

    fn set_arming_mode(&mut self, mode: ArmingMode) -> Result<(), RepositoryError> {
        self.commit(|s| s.set_arming_mode(mode))
    }

    fn sensor(&self, name: &str) -> Result<Option<Sensor>, RepositoryError> {
        self.state.sensor(name)
    }
}
