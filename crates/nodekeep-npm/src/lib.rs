//! npm backend: global package queries and installs through the npm CLI.
//!
//! Nothing in here errors outward. A missing npm, a failed command, or
//! unparseable output degrades the answer to `None`/empty/`false` with the
//! cause logged, per the [`PackageManager`] contract.

mod client;
mod parse;

pub use client::NpmCli;

pub use nodekeep_backend::{ActiveRuntime, PackageManager};
