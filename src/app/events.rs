//! Outbound status events.
//!
//! The [`SecurityService`](super::service::SecurityService) notifies
//! observers through the three [`StatusListener`] callbacks.  `StatusEvent`
//! is the same information as a value, for adapters that queue, record or
//! forward notifications instead of reacting inline.

use crate::alarm::AlarmStatus;

use super::ports::StatusListener;

/// One observer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// The alarm status was written.
    AlarmStatus(AlarmStatus),

    /// A detection result was reported (`true` = cat present).
    CatDetected(bool),

    /// Persisted sensor state changed.
    SensorsChanged,
}

impl StatusEvent {
    /// Invoke the matching callback on `listener`.
    pub fn deliver(self, listener: &dyn StatusListener) {
        match self {
            Self::AlarmStatus(status) => listener.alarm_status_changed(status),
            Self::CatDetected(detected) => listener.cat_detected(detected),
            Self::SensorsChanged => listener.sensor_status_changed(),
        }
    }
}
