//! Volatile [`SecurityRepository`] backed by plain collections.
//!
//! Used directly by tests and embedded in
//! [`JsonFileRepository`](super::file_store::JsonFileRepository), which
//! adds durability on top.

use std::collections::BTreeMap;

use crate::alarm::sensor::Sensor;
use crate::alarm::{AlarmStatus, ArmingMode};
use crate::app::ports::{RepositoryError, SecurityRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    /// Keyed by name, which is also the sensor's identity.
    sensors: BTreeMap<String, Sensor>,
    alarm_status: AlarmStatus,
    arming_mode: ArmingMode,
}

impl InMemoryRepository {
    /// Fresh install: disarmed, no alarm, no sensors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known state.  Later duplicates of a name win.
    pub fn with_state(
        arming_mode: ArmingMode,
        alarm_status: AlarmStatus,
        sensors: impl IntoIterator<Item = Sensor>,
    ) -> Self {
        Self {
            sensors: sensors
                .into_iter()
                .map(|s| (s.name().to_owned(), s))
                .collect(),
            alarm_status,
            arming_mode,
        }
    }
}

impl SecurityRepository for InMemoryRepository {
    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        Ok(self.sensors.values().cloned().collect())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.sensors.insert(sensor.name().to_owned(), sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, name: &str) -> Result<(), RepositoryError> {
        self.sensors.remove(name);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.sensors
            .insert(sensor.name().to_owned(), sensor.clone());
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.alarm_status = status;
        Ok(())
    }

    fn arming_mode(&self) -> Result<ArmingMode, RepositoryError> {
        Ok(self.arming_mode)
    }

    fn set_arming_mode(&mut self, mode: ArmingMode) -> Result<(), RepositoryError> {
        self.arming_mode = mode;
        Ok(())
    }

    fn sensor(&self, name: &str) -> Result<Option<Sensor>, RepositoryError> {
        Ok(self.sensors.get(name).cloned())
    }
}
