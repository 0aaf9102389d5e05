//! System configuration parameters
//!
//! All tunable parameters for the CatPoint controller.
//! Values can be overridden from a JSON file; any field left out keeps
//! its default.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Detection ---
    /// Minimum label confidence (percent) passed to the image service
    pub detection_confidence_threshold: f32,
    /// Label text (case-insensitive substring) that counts as a cat
    pub cat_label: String,

    // --- Registry ---
    /// Maximum number of registered sensors (0 = unlimited)
    pub max_sensors: usize,

    // --- Storage ---
    /// JSON file holding arming mode, alarm status and sensors
    pub state_path: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            detection_confidence_threshold: 50.0,
            cat_label: "cat".to_owned(),
            max_sensors: 4,
            state_path: PathBuf::from("catpoint-state.json"),
        }
    }
}

impl SystemConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields [`SystemConfig::default()`]; a file that
    /// exists but does not parse or validate is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Config(format!("{}: {e}", path.display()))),
        };
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.detection_confidence_threshold) {
            return Err(Error::Config(
                "detection_confidence_threshold must be 0.0–100.0".to_owned(),
            ));
        }
        if self.cat_label.trim().is_empty() {
            return Err(Error::Config("cat_label must not be empty".to_owned()));
        }
        Ok(())
    }
}
