//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (CLI, control
//! panel, camera pipeline) that the
//! [`SecurityService`](super::service::SecurityService) interprets and acts
//! upon via [`handle_command`](super::service::SecurityService::handle_command).

use crate::alarm::ArmingMode;
use crate::alarm::sensor::Sensor;

use super::ports::CameraFrame;

/// Commands that external adapters can send into the service.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Arm or disarm the system.
    SetArmingMode(ArmingMode),

    /// Open/close (or trigger/clear) a registered sensor by name.
    SetSensorActive { name: String, active: bool },

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Unregister a sensor by name.
    RemoveSensor(String),

    /// Run cat detection on a camera frame.
    ProcessImage(CameraFrame),

    /// Feed an externally computed detection result (`true` = cat present).
    ReportDetection(bool),
}
