//! Thread-safe handle around a [`SecurityService`].
//!
//! Every rule reads several pieces of state and then writes some of them,
//! so the whole service sits behind one mutex and each call holds it for
//! the full operation.  Listeners run while the lock is held and must not
//! call back into the handle.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::alarm::sensor::Sensor;
use crate::alarm::{AlarmStatus, ArmingMode};
use crate::error::{Error, Result};

use super::commands::AppCommand;
use super::ports::{CameraFrame, ImageService, SecurityRepository, StatusListener};
use super::service::SecurityService;

/// Cloneable, `Send + Sync` front for a single controller instance.
pub struct SharedSecurityService<R, I> {
    inner: Arc<Mutex<SecurityService<R, I>>>,
}

impl<R, I> Clone for SharedSecurityService<R, I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: SecurityRepository, I: ImageService> SharedSecurityService<R, I> {
    pub fn new(service: SecurityService<R, I>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SecurityService<R, I>>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<T>(&self, f: impl FnOnce(&mut SecurityService<R, I>) -> Result<T>) -> Result<T> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    pub fn subscribe(&self, listener: Arc<dyn StatusListener>) -> Result<()> {
        self.lock()?.subscribe(listener);
        Ok(())
    }

    pub fn unsubscribe(&self, listener: &Arc<dyn StatusListener>) -> Result<()> {
        self.lock()?.unsubscribe(listener);
        Ok(())
    }

    pub fn set_arming_mode(&self, mode: ArmingMode) -> Result<()> {
        self.lock()?.set_arming_mode(mode)
    }

    pub fn set_sensor_active(&self, name: &str, active: bool) -> Result<()> {
        self.lock()?.set_sensor_active(name, active)
    }

    pub fn report_detection(&self, cat_present: bool) -> Result<()> {
        self.lock()?.report_detection(cat_present)
    }

    pub fn process_image(&self, frame: &CameraFrame) -> Result<bool> {
        self.lock()?.process_image(frame)
    }

    pub fn handle_command(&self, cmd: AppCommand) -> Result<()> {
        self.lock()?.handle_command(cmd)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.lock()?.alarm_status()
    }

    pub fn arming_mode(&self) -> Result<ArmingMode> {
        self.lock()?.arming_mode()
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.lock()?.sensors()
    }
}
