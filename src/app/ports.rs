//! Port traits: the hexagonal boundary between the alarm rules and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (state storage, vision analysis) implement
//! [`SecurityRepository`] and [`ImageService`]; the
//! [`SecurityService`](super::service::SecurityService) consumes them via
//! generics.  Observers implement [`StatusListener`] and are handed to the
//! service as shared handles.
//!
//! ## Contract notes
//!
//! - **SecurityRepository** writes MUST be visible to the next read, and
//!   [`sensors`](SecurityRepository::sensors) MUST return the whole registry.
//! - **ImageService** answers are taken at face value; an `Err` is
//!   propagated unchanged to the caller.
//! - **StatusListener** callbacks must not panic and must not call back
//!   into the service (it is mid-operation when they run).

use std::io;
use std::path::{Path, PathBuf};

use crate::alarm::sensor::Sensor;
use crate::alarm::{AlarmStatus, ArmingMode};

// ───────────────────────────────────────────────────────────────
// Persistence port (driven adapter: domain ↔ durable state)
// ───────────────────────────────────────────────────────────────

/// Durable home for arming mode, alarm status and the sensor registry.
///
/// The registry has set semantics keyed by sensor name: adding a sensor
/// whose name is already present replaces the stored entry.
pub trait SecurityRepository {
    /// Every registered sensor, ordered by name.
    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError>;

    /// Register a sensor (or replace the one with the same name).
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError>;

    /// Unregister a sensor by name.  Returns `Ok(())` even if it wasn't registered.
    fn remove_sensor(&mut self, name: &str) -> Result<(), RepositoryError>;

    /// Persist the current state of an already-registered sensor.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError>;

    fn arming_mode(&self) -> Result<ArmingMode, RepositoryError>;

    fn set_arming_mode(&mut self, mode: ArmingMode) -> Result<(), RepositoryError>;

    /// Look up one sensor by name.
    fn sensor(&self, name: &str) -> Result<Option<Sensor>, RepositoryError> {
        Ok(self.sensors()?.into_iter().find(|s| s.name() == name))
    }
}

// ───────────────────────────────────────────────────────────────
// Detection port (driven adapter: camera frame → cat yes/no)
// ───────────────────────────────────────────────────────────────

/// A still image captured by the surveillance camera.
#[derive(Debug, Clone, Default)]
pub struct CameraFrame {
    source: Option<PathBuf>,
    bytes: Vec<u8>,
}

impl CameraFrame {
    /// Wrap in-memory image bytes (no backing file).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            source: None,
            bytes,
        }
    }

    /// Read an image file from disk.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            bytes,
        })
    }

    /// Path the frame was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Vision analysis collaborator.
pub trait ImageService {
    /// Decide whether `frame` shows a cat.
    ///
    /// `confidence_threshold` is a percentage (0–100); evidence below it
    /// must be ignored.
    fn detect_cat(
        &mut self,
        frame: &CameraFrame,
        confidence_threshold: f32,
    ) -> Result<bool, DetectionError>;
}

// ───────────────────────────────────────────────────────────────
// Observer port (domain → UI / logging)
// ───────────────────────────────────────────────────────────────

/// Subscriber notified synchronously by the service.
///
/// Every method has a no-op default so a listener only overrides what it
/// cares about.
pub trait StatusListener: Send + Sync {
    /// The alarm status was written (it may equal the previous value).
    fn alarm_status_changed(&self, _status: AlarmStatus) {}

    /// A detection result was reported.
    fn cat_detected(&self, _detected: bool) {}

    /// One or more sensors had their persisted state rewritten.
    fn sensor_status_changed(&self) {}
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityRepository`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be read or written.
    Io(io::ErrorKind),
    /// Stored state failed to deserialise.
    Corrupted,
    /// The backend is not reachable at all.  Only remote stores report this.
    Unavailable,
}

/// Errors from [`ImageService`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionError {
    /// The frame carries nothing the detector can analyse.
    NoImageData,
    /// Analysis results for the frame were not found.
    LabelsMissing,
    /// Analysis results exist but could not be parsed.
    Malformed,
    /// The analysis backend is not reachable.  Only remote detectors report
    /// this.
    Unavailable,
}

impl From<io::Error> for RepositoryError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.kind())
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
            Self::Corrupted => write!(f, "stored state corrupted"),
            Self::Unavailable => write!(f, "repository unavailable"),
        }
    }
}

impl core::fmt::Display for DetectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoImageData => write!(f, "frame has no image data"),
            Self::LabelsMissing => write!(f, "detection labels missing"),
            Self::Malformed => write!(f, "detection labels malformed"),
            Self::Unavailable => write!(f, "detection service unavailable"),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl std::error::Error for DetectionError {}
