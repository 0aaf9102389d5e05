//! Security service: the hexagonal core.
//!
//! [`SecurityService`] owns the detection flag and the observer list, and
//! drives every alarm-status decision.  Arming mode, alarm status and the
//! sensor registry live behind the [`SecurityRepository`] port; vision
//! analysis sits behind [`ImageService`].
//!
//! ```text
//!  SecurityRepository ◀──▶ ┌──────────────────────┐ ──▶ StatusListener(s)
//!                          │   SecurityService    │
//!        ImageService  ──▶ │  arming · sensors ·  │
//!                          │  cat detection       │
//!                          └──────────────────────┘
//! ```
//!
//! Every alarm-status write goes through `set_alarm_status`,
//! which persists the value and then notifies observers.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::alarm::sensor::Sensor;
use crate::alarm::{AlarmStatus, ArmingMode};
use crate::config::SystemConfig;
use crate::error::{Error, Result};

use super::commands::AppCommand;
use super::events::StatusEvent;
use super::ports::{CameraFrame, ImageService, SecurityRepository, StatusListener};

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The alarm controller.
pub struct SecurityService<R, I> {
    repository: R,
    image_service: I,
    config: SystemConfig,
    listeners: Vec<Arc<dyn StatusListener>>,
    /// Last reported detection result.  Kept in memory only.
    cat_detected: bool,
}

impl<R: SecurityRepository, I: ImageService> SecurityService<R, I> {
    pub fn new(repository: R, image_service: I, config: SystemConfig) -> Self {
        Self {
            repository,
            image_service,
            config,
            listeners: Vec::new(),
            cat_detected: false,
        }
    }

    // ── Observers ─────────────────────────────────────────────

    /// Register an observer.  Subscribing the same handle twice is a no-op.
    pub fn subscribe(&mut self, listener: Arc<dyn StatusListener>) {
        if !self.is_subscribed(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Remove an observer.  Unknown handles are ignored.
    pub fn unsubscribe(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners
            .retain(|l| !std::ptr::addr_eq(Arc::as_ptr(l), Arc::as_ptr(listener)));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn is_subscribed(&self, listener: &Arc<dyn StatusListener>) -> bool {
        self.listeners
            .iter()
            .any(|l| std::ptr::addr_eq(Arc::as_ptr(l), Arc::as_ptr(listener)))
    }

    fn notify(&self, event: StatusEvent) {
        for listener in &self.listeners {
            event.deliver(listener.as_ref());
        }
    }

    // ── Arming ────────────────────────────────────────────────

    /// Arm or disarm the system.
    ///
    /// Disarming forces `NoAlarm`.  Arming first resets every active sensor
    /// (one persisted update each), then stores the mode; arming `ArmedHome`
    /// while a cat is believed present raises `Alarm` immediately.
    pub fn set_arming_mode(&mut self, mode: ArmingMode) -> Result<()> {
        if mode == ArmingMode::Disarmed {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        } else {
            let mut reset = 0usize;
            let outcome = self.reset_active_sensors(&mut reset);
            // Notify for the sensors already written, even if a later write failed.
            if reset > 0 {
                self.notify(StatusEvent::SensorsChanged);
            }
            outcome?;
        }

        self.repository.set_arming_mode(mode)?;
        info!("Arming mode set to {}", mode);

        if mode == ArmingMode::ArmedHome && self.cat_detected {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        }
        Ok(())
    }

    // ── Detection ─────────────────────────────────────────────

    /// Run the image service on `frame` and act on its answer.
    ///
    /// Returns the detection result.
    pub fn process_image(&mut self, frame: &CameraFrame) -> Result<bool> {
        let detected = self
            .image_service
            .detect_cat(frame, self.config.detection_confidence_threshold)?;
        self.report_detection(detected)?;
        Ok(detected)
    }

    /// Record a detection result and apply the detection rules.
    ///
    /// Observers always receive the raw result, whether or not the alarm
    /// status moved.
    pub fn report_detection(&mut self, cat_present: bool) -> Result<()> {
        self.cat_detected = cat_present;
        let mode = self.repository.arming_mode()?;
        info!("Cat detection: present={} (mode {})", cat_present, mode);

        if cat_present && mode == ArmingMode::ArmedHome {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        } else if !cat_present && mode.is_armed() && !self.any_sensor_active()? {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        self.notify(StatusEvent::CatDetected(cat_present));
        Ok(())
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Change a registered sensor's activation and apply the sensor rules.
    ///
    /// Fails with [`Error::SensorNotFound`] (and touches nothing) if no
    /// sensor with that name is registered.
    pub fn set_sensor_active(&mut self, name: &str, active: bool) -> Result<()> {
        let Some(mut sensor) = self.repository.sensor(name)? else {
            warn!("Sensor {} is not registered", name);
            return Err(Error::SensorNotFound(name.to_owned()));
        };
        let status = self.repository.alarm_status()?;
        let was_active = sensor.is_active();
        sensor.set_active(active);

        // Alarm is sticky: record the sensor, leave the status alone.
        if status == AlarmStatus::Alarm {
            return self.persist_sensor(&sensor);
        }

        match (was_active, active) {
            (false, true) => {
                if status == AlarmStatus::PendingAlarm {
                    self.set_alarm_status(AlarmStatus::Alarm)?;
                } else {
                    self.handle_sensor_activated()?;
                }
                self.persist_sensor(&sensor)
            }
            (true, false) => {
                self.persist_sensor(&sensor)?;
                self.handle_sensor_deactivated()
            }
            _ => self.persist_sensor(&sensor),
        }
    }

    /// Register a sensor, honouring `config.max_sensors`.
    ///
    /// Re-adding an already registered name replaces it and never counts
    /// against the cap.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        let limit = self.config.max_sensors;
        if limit > 0 {
            let sensors = self.repository.sensors()?;
            if sensors.len() >= limit && !sensors.contains(&sensor) {
                warn!("Sensor {} rejected: limit of {} reached", sensor.name(), limit);
                return Err(Error::SensorLimitReached(limit));
            }
        }
        info!("Sensor added: {}", sensor);
        self.repository.add_sensor(sensor)?;
        Ok(())
    }

    pub fn remove_sensor(&mut self, name: &str) -> Result<()> {
        self.repository.remove_sensor(name)?;
        info!("Sensor removed: {}", name);
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from the CLI, a control panel, etc.).
    pub fn handle_command(&mut self, cmd: AppCommand) -> Result<()> {
        match cmd {
            AppCommand::SetArmingMode(mode) => self.set_arming_mode(mode),
            AppCommand::SetSensorActive { name, active } => self.set_sensor_active(&name, active),
            AppCommand::AddSensor(sensor) => self.add_sensor(sensor),
            AppCommand::RemoveSensor(name) => self.remove_sensor(&name),
            AppCommand::ProcessImage(frame) => self.process_image(&frame).map(|_| ()),
            AppCommand::ReportDetection(present) => self.report_detection(present),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn arming_mode(&self) -> Result<ArmingMode> {
        Ok(self.repository.arming_mode()?)
    }

    /// Registered sensors, ordered by name.
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.repository.sensors()?)
    }

    /// Whether the last detection result reported a cat.
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Borrow the persistence adapter (inspection and tests).
    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ── Internal ──────────────────────────────────────────────

    /// The single alarm-status setter: persist, then notify.
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.repository.set_alarm_status(status)?;
        info!("Alarm status -> {}", status);
        self.notify(StatusEvent::AlarmStatus(status));
        Ok(())
    }

    fn persist_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        self.repository.update_sensor(sensor)?;
        debug!("Sensor persisted: {}", sensor);
        self.notify(StatusEvent::SensorsChanged);
        Ok(())
    }

    fn reset_active_sensors(&mut self, reset: &mut usize) -> Result<()> {
        for mut sensor in self.repository.sensors()? {
            if sensor.is_active() {
                sensor.set_active(false);
                self.repository.update_sensor(&sensor)?;
                debug!("Sensor {} reset on arming", sensor.name());
                *reset += 1;
            }
        }
        Ok(())
    }

    fn any_sensor_active(&self) -> Result<bool> {
        Ok(self.repository.sensors()?.iter().any(Sensor::is_active))
    }

    /// Escalation on a rising edge outside `Alarm`.
    fn handle_sensor_activated(&mut self) -> Result<()> {
        if self.repository.arming_mode()? == ArmingMode::Disarmed {
            return Ok(());
        }
        match self.repository.alarm_status()? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => Ok(()),
        }
    }

    /// De-escalation after a falling edge has been persisted.
    fn handle_sensor_deactivated(&mut self) -> Result<()> {
        match self.repository.alarm_status()? {
            AlarmStatus::PendingAlarm if !self.any_sensor_active()? => {
                self.set_alarm_status(AlarmStatus::NoAlarm)
            }
            _ => Ok(()),
        }
    }
}
