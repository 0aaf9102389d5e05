//! Log-based status listener adapter.
//!
//! Implements [`StatusListener`] by writing every notification to the
//! `log` facade.  A control panel or push-notification adapter would
//! implement the same trait.

use std::sync::Mutex;

use log::info;

use crate::alarm::AlarmStatus;
use crate::app::ports::StatusListener;

/// Adapter that logs every status notification.
#[derive(Default)]
pub struct LogStatusListener {
    /// Last status seen, so transitions read `from -> to`.
    last: Mutex<Option<AlarmStatus>>,
}

impl LogStatusListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusListener for LogStatusListener {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        let previous = match self.last.lock() {
            Ok(mut last) => last.replace(status),
            Err(_) => None,
        };
        match previous {
            Some(from) => info!("ALARM | {} -> {}", from, status),
            None => info!("ALARM | {}", status),
        }
    }

    fn cat_detected(&self, detected: bool) {
        info!("CAT | detected={}", detected);
    }

    fn sensor_status_changed(&self) {
        info!("SENSORS | changed");
    }
}
