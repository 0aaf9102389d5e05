//! Sensor identity and activation state.
//!
//! A sensor is identified by its name alone: two values with the same name
//! are the same physical device, whatever their kind or `active` flag says.
//! Equality, ordering and hashing all follow that rule so the registry can
//! deduplicate and list sensors by name.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// What kind of opening or presence the sensor watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorKind {
    Door,
    Window,
    Motion,
}

impl SensorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Door => "DOOR",
            Self::Window => "WINDOW",
            Self::Motion => "MOTION",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            "motion" => Ok(Self::Motion),
            _ => Err(ParseEnumError {
                kind: "sensor kind",
                value: s.to_owned(),
            }),
        }
    }
}

/// A registered door, window or motion sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: String,
    kind: SensorKind,
    #[serde(default)]
    active: bool,
}

impl Sensor {
    /// New sensors start inactive.
    pub fn new(name: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Builder-style variant of [`set_active`](Self::set_active).
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Sensor {}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name,
            self.kind,
            if self.active { "ACTIVE" } else { "STANDBY" }
        )
    }
}
