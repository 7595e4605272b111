use async_trait::async_trait;
use std::path::Path;

use crate::error::BackendError;
use crate::types::{ActiveRuntime, NodeVersion};

/// The version-manager side of the backend: everything nodekeep needs from
/// nvm (or a stand-in during tests) to inventory, switch, and remove Node.js
/// runtimes.
#[async_trait]
pub trait VersionManager: Send + Sync {
    fn name(&self) -> &'static str;

    /// Directory the version manager keeps installed runtimes under, when
    /// one is known. Used for fallback removal and for operator guidance.
    fn versions_root(&self) -> Option<&Path>;

    /// Versions found by scanning the versions directory, sorted descending.
    /// A missing or empty directory is an empty inventory, not an error.
    async fn list_installed(&self) -> Result<Vec<NodeVersion>, BackendError>;

    /// Versions according to the manager's own `list` output. Unlike
    /// [`list_installed`](Self::list_installed) this also surfaces entries
    /// whose files are gone but whose bookkeeping remains.
    async fn listed_versions(&self) -> Result<Vec<NodeVersion>, BackendError>;

    async fn latest_stable(&self) -> Result<Option<NodeVersion>, BackendError>;

    async fn current(&self) -> Result<Option<NodeVersion>, BackendError>;

    async fn activate(&self, version: &NodeVersion) -> Result<(), BackendError>;

    async fn install(&self, version: &NodeVersion) -> Result<(), BackendError>;

    async fn uninstall(&self, version: &NodeVersion) -> Result<(), BackendError>;

    /// Whether the manager's listing still mentions `version` as a whole
    /// token. Uninstall can report success while the listing keeps the
    /// entry, so removal flows verify with this instead of trusting the
    /// uninstall result.
    async fn is_still_listed(&self, version: &NodeVersion) -> Result<bool, BackendError>;

    /// Last-resort removal: delete the version's directory under
    /// [`versions_root`](Self::versions_root) directly. Returns `false` when
    /// no directory was found for the version, which means the remaining
    /// listing entry lives purely in the manager's own configuration.
    async fn force_remove(&self, version: &NodeVersion) -> Result<bool, BackendError>;
}

/// The package side of the backend: global package queries and installs via
/// npm.
///
/// Results here are deliberately sentinel-shaped (`None`, empty, `false`):
/// a broken npm, unparseable output, or an unknown package name must degrade
/// the answer, never abort a workflow. Implementations log the cause.
/// Operations whose answer depends on which runtime is active take an
/// [`ActiveRuntime`] token; registry-wide lookups do not.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Globally installed package names under the active runtime, sorted,
    /// with the `npm` bootstrap package itself excluded.
    async fn global_packages(&self, runtime: &ActiveRuntime) -> Vec<String>;

    async fn installed_version(&self, runtime: &ActiveRuntime, name: &str) -> Option<String>;

    async fn latest_version(&self, name: &str) -> Option<String>;

    /// Short registry description, empty when unavailable.
    async fn description(&self, name: &str) -> String;

    async fn install_global(&self, runtime: &ActiveRuntime, name: &str) -> bool;
}
