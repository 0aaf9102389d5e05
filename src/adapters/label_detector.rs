//! Label-list cat detector.
//!
//! Vision backends answer with a list of labels, each with a confidence
//! percentage.  A frame shows a cat when any label at or above the
//! threshold contains the configured cat label (case-insensitive).
//!
//! The labels for `garden.jpg` are read from `garden.labels.json`:
//!
//! ```json
//! [ { "name": "Cat", "confidence": 97.4 }, { "name": "Lawn", "confidence": 88.0 } ]
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::app::ports::{CameraFrame, DetectionError, ImageService};

/// One label returned by a vision backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Label {
    pub name: String,
    /// Percent, 0–100.
    pub confidence: f32,
}

/// Parse a label list.
pub fn parse_labels(bytes: &[u8]) -> Result<Vec<Label>, DetectionError> {
    serde_json::from_slice(bytes).map_err(|e| {
        warn!("Label list rejected: {}", e);
        DetectionError::Malformed
    })
}

/// The detection rule, independent of where labels come from.
pub fn contains_cat(labels: &[Label], cat_label: &str, confidence_threshold: f32) -> bool {
    let needle = cat_label.to_lowercase();
    labels
        .iter()
        .filter(|l| l.confidence >= confidence_threshold)
        .any(|l| l.name.to_lowercase().contains(&needle))
}

/// Where the labels for `image` are expected.
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension("labels.json")
}

/// [`ImageService`] that reads labels from a file stored next to the image.
pub struct SidecarLabelService {
    cat_label: String,
}

impl SidecarLabelService {
    pub fn new(cat_label: impl Into<String>) -> Self {
        Self {
            cat_label: cat_label.into(),
        }
    }
}

impl ImageService for SidecarLabelService {
    fn detect_cat(
        &mut self,
        frame: &CameraFrame,
        confidence_threshold: f32,
    ) -> Result<bool, DetectionError> {
        if frame.bytes().is_empty() {
            return Err(DetectionError::NoImageData);
        }
        let image = frame.source().ok_or(DetectionError::LabelsMissing)?;
        let path = sidecar_path(image);
        let bytes = std::fs::read(&path).map_err(|e| {
            warn!("No labels for {}: {}", image.display(), e);
            DetectionError::LabelsMissing
        })?;
        let labels = parse_labels(&bytes)?;

        let summary: Vec<String> = labels
            .iter()
            .map(|l| format!("{}({:.1}%)", l.name, l.confidence))
            .collect();
        info!("Vision labels for {}: {}", image.display(), summary.join(", "));

        Ok(contains_cat(&labels, &self.cat_label, confidence_threshold))
    }
}
