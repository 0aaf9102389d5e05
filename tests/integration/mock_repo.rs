//! Mock adapters for integration tests.
//!
//! `RecordingRepository` keeps real state (via `InMemoryRepository`) and
//! records every write so tests can assert on exact persistence calls.
//! `RecordingListener` captures observer notifications as `StatusEvent`s.

use std::sync::{Arc, Mutex};

use catpoint::adapters::memory::InMemoryRepository;
use catpoint::alarm::sensor::{Sensor, SensorKind};
use catpoint::alarm::{AlarmStatus, ArmingMode};
use catpoint::app::events::StatusEvent;
use catpoint::app::ports::{
    CameraFrame, DetectionError, ImageService, RepositoryError, SecurityRepository,
    StatusListener,
};
use catpoint::app::service::SecurityService;
use catpoint::config::SystemConfig;

// ── Repository call record ────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RepoCall {
    AddSensor(String),
    RemoveSensor(String),
    UpdateSensor { name: String, active: bool },
    SetAlarmStatus(AlarmStatus),
    SetArmingMode(ArmingMode),
}

// ── RecordingRepository ───────────────────────────────────────

pub struct RecordingRepository {
    inner: InMemoryRepository,
    pub calls: Vec<RepoCall>,
    /// When set, every write fails with this error.
    pub fail_writes: Option<RepositoryError>,
    /// When set, writes succeed until this many have been recorded, then
    /// fail with `Unavailable`.
    pub fail_after: Option<usize>,
}

#[allow(dead_code)]
impl RecordingRepository {
    pub fn new(mode: ArmingMode, status: AlarmStatus, sensors: &[(&str, bool)]) -> Self {
        let sensors = sensors
            .iter()
            .map(|(name, active)| Sensor::new(*name, SensorKind::Door).with_active(*active));
        Self {
            inner: InMemoryRepository::with_state(mode, status, sensors),
            calls: Vec::new(),
            fail_writes: None,
            fail_after: None,
        }
    }

    pub fn sensor_updates(&self) -> Vec<(String, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RepoCall::UpdateSensor { name, active } => Some((name.clone(), *active)),
                _ => None,
            })
            .collect()
    }

    pub fn status_writes(&self) -> Vec<AlarmStatus> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RepoCall::SetAlarmStatus(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, call: &RepoCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if let Some(e) = self.fail_writes {
            return Err(e);
        }
        match self.fail_after {
            Some(n) if self.calls.len() >= n => Err(RepositoryError::Unavailable),
            _ => Ok(()),
        }
    }
}

impl SecurityRepository for RecordingRepository {
    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        self.inner.sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.check()?;
        self.calls.push(RepoCall::AddSensor(sensor.name().to_owned()));
        self.inner.add_sensor(sensor)
    }

    fn remove_sensor(&mut self, name: &str) -> Result<(), RepositoryError> {
        self.check()?;
        self.calls.push(RepoCall::RemoveSensor(name.to_owned()));
        self.inner.remove_sensor(name)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.check()?;
        self.calls.push(RepoCall::UpdateSensor {
            name: sensor.name().to_owned(),
            active: sensor.is_active(),
        });
        self.inner.update_sensor(sensor)
    }

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        self.inner.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.check()?;
        self.calls.push(RepoCall::SetAlarmStatus(status));
        self.inner.set_alarm_status(status)
    }

    fn arming_mode(&self) -> Result<ArmingMode, RepositoryError> {
        self.inner.arming_mode()
    }

    fn set_arming_mode(&mut self, mode: ArmingMode) -> Result<(), RepositoryError> {
        self.check()?;
        self.calls.push(RepoCall::SetArmingMode(mode));
        self.inner.set_arming_mode(mode)
    }
}

// ── Detector ──────────────────────────────────────────────────

/// Answers every frame with the same result and counts calls.
pub struct StubDetector {
    pub answer: Result<bool, DetectionError>,
    pub thresholds: Vec<f32>,
}

#[allow(dead_code)]
impl StubDetector {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Ok(answer),
            thresholds: Vec::new(),
        }
    }
}

impl ImageService for StubDetector {
    fn detect_cat(
        &mut self,
        _frame: &CameraFrame,
        confidence_threshold: f32,
    ) -> Result<bool, DetectionError> {
        self.thresholds.push(confidence_threshold);
        self.answer
    }
}

// ── Listener ──────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingListener {
    pub events: Mutex<Vec<StatusEvent>>,
}

#[allow(dead_code)]
impl RecordingListener {
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, event: StatusEvent) -> usize {
        self.events().iter().filter(|e| **e == event).count()
    }

    pub fn sensor_notifications(&self) -> usize {
        self.count(StatusEvent::SensorsChanged)
    }
}

impl StatusListener for RecordingListener {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        self.events.lock().unwrap().push(StatusEvent::AlarmStatus(status));
    }

    fn cat_detected(&self, detected: bool) {
        self.events.lock().unwrap().push(StatusEvent::CatDetected(detected));
    }

    fn sensor_status_changed(&self) {
        self.events.lock().unwrap().push(StatusEvent::SensorsChanged);
    }
}

// ── Fixture ───────────────────────────────────────────────────

pub type TestService = SecurityService<RecordingRepository, StubDetector>;

/// Service over `repo` with one recording listener attached.
pub fn service_with(repo: RecordingRepository) -> (TestService, Arc<RecordingListener>) {
    service_with_detector(repo, StubDetector::answering(false))
}

/// Same as [`service_with`] but with a caller-chosen detector.
pub fn service_with_detector(
    repo: RecordingRepository,
    detector: StubDetector,
) -> (TestService, Arc<RecordingListener>) {
    let mut svc = SecurityService::new(repo, detector, SystemConfig::default());
    let listener = Arc::new(RecordingListener::default());
    svc.subscribe(listener.clone());
    (svc, listener)
}
