//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements          | Connects to                   |
//! |------------------|---------------------|-------------------------------|
//! | `memory`         | SecurityRepository  | Process memory                |
//! | `file_store`     | SecurityRepository  | JSON snapshot on disk         |
//! | `label_detector` | ImageService        | Vision label list (sidecar)   |
//! | `log_listener`   | StatusListener      | `log` output                  |

pub mod file_store;
pub mod label_detector;
pub mod log_listener;
pub mod memory;
