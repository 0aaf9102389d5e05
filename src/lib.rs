//! CatPoint alarm controller library.
//!
//! Exposes the alarm rules, their port traits and the stock adapters for
//! the CLI and for integration testing.  Nothing here blocks on anything
//! but the repository's own synchronous I/O.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod error;

pub use error::{Error, Result};
