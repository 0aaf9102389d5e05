//! Application core: pure alarm logic, zero I/O.
//!
//! This module contains the rules that turn arming mode, sensor activity
//! and cat-detection results into an alarm status.  All storage and
//! vision analysis happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shared;
