//! Host-platform plumbing shared by the backend crates: knowing which kind of
//! host we run on, and keeping spawned console processes from flashing
//! windows on Windows.

mod commands;
mod host;

pub use commands::HideWindow;
pub use host::HostPlatform;
