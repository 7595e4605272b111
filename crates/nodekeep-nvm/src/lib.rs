//! nvm backend: talks to nvm (Unix) or nvm-windows through their CLIs and
//! the filesystem, and exposes the result as a
//! [`VersionManager`](nodekeep_backend::VersionManager).
//!
//! All parsing of nvm's output lives in the `parse` module as pure,
//! platform-specific functions, so the command plumbing and the text formats
//! can be tested apart.

#![allow(clippy::missing_errors_doc)]

mod detection;
mod manager;
mod parse;
mod session;

pub use detection::{NvmDetection, detect_nvm};
pub use manager::NvmManager;
pub use session::{NvmEnvironment, NvmSession};

pub use nodekeep_backend::{BackendError, NodeVersion, VersionManager};
