//! Alarm domain types.
//!
//! Two closed enums drive every decision the controller makes:
//!
//! ```text
//!   ArmingMode:   Disarmed │ ArmedHome │ ArmedAway        (set by the user)
//!
//!   AlarmStatus:  NoAlarm ──▶ PendingAlarm ──▶ Alarm      (set by the controller)
//!                    ▲              │
//!                    └──────────────┘  last active sensor falls / cat absent
//! ```
//!
//! Both serialise to their `SCREAMING_SNAKE_CASE` names so a stored
//! snapshot reads the same as the log output.

pub mod sensor;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arming mode
// ---------------------------------------------------------------------------

/// How the system is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingMode {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingMode {
    pub const ALL: [Self; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// Stable upper-case name, as stored and logged.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disarmed => "DISARMED",
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
        }
    }

    /// `true` for both armed modes.
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

impl fmt::Display for ArmingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmingMode {
    type Err = ParseEnumError;

    /// Accepts the stored name (`ARMED_HOME`) or the short CLI form (`home`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disarmed" | "off" => Ok(Self::Disarmed),
            "armed_home" | "home" => Ok(Self::ArmedHome),
            "armed_away" | "away" => Ok(Self::ArmedAway),
            _ => Err(ParseEnumError {
                kind: "arming mode",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Alarm status
// ---------------------------------------------------------------------------

/// Three-step escalation ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub const ALL: [Self; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no_alarm" => Ok(Self::NoAlarm),
            "pending_alarm" => Ok(Self::PendingAlarm),
            "alarm" => Ok(Self::Alarm),
            _ => Err(ParseEnumError {
                kind: "alarm status",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse error
// ---------------------------------------------------------------------------

/// Returned when a string names none of the variants of a domain enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
