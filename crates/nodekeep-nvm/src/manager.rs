use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use nodekeep_backend::{BackendError, NodeVersion, VersionManager};

use crate::parse::{
    listing_contains_version, parse_unix_installed, parse_unix_latest_stable,
    parse_windows_installed, parse_windows_latest_stable,
};
use crate::session::{NvmEnvironment, NvmSession};

/// The nvm-backed [`VersionManager`]: CLI calls through an [`NvmSession`],
/// inventory and fallback removal straight against the versions directory.
#[derive(Debug, Clone)]
pub struct NvmManager {
    session: NvmSession,
    versions_root: PathBuf,
}

impl NvmManager {
    #[must_use]
    pub fn new(session: NvmSession) -> Self {
        let versions_root = match &session.environment {
            NvmEnvironment::Unix { nvm_dir } => nvm_dir.join("versions").join("node"),
            // nvm-windows keeps vX.Y.Z directories directly in its home.
            NvmEnvironment::Windows { nvm_home, .. } => nvm_home.clone(),
        };
        Self {
            session,
            versions_root,
        }
    }
}

async fn scan_versions_dir(root: &Path) -> Result<Vec<NodeVersion>, BackendError> {
    let mut reader = match tokio::fs::read_dir(root).await {
        Ok(reader) => reader,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!("versions directory {} does not exist", root.display());
            return Ok(Vec::new());
        }
        Err(error) => return Err(error.into()),
    };

    let mut versions = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        if let Ok(version) = entry.file_name().to_string_lossy().parse::<NodeVersion>() {
            versions.push(version);
        }
    }

    versions.sort_by(|a, b| b.cmp(a));
    Ok(versions)
}

async fn remove_version_dir(root: &Path, version: &NodeVersion) -> Result<bool, BackendError> {
    // nvm names version directories with the v prefix; try that first, then
    // the bare form.
    let candidates = [root.join(version.to_string()), root.join(version.bare())];

    for dir in candidates {
        if tokio::fs::metadata(&dir).await.is_ok() {
            info!("removing {}", dir.display());
            tokio::fs::remove_dir_all(&dir).await?;
            return Ok(true);
        }
    }

    Ok(false)
}

#[async_trait]
impl VersionManager for NvmManager {
    fn name(&self) -> &'static str {
        "nvm"
    }

    fn versions_root(&self) -> Option<&Path> {
        Some(&self.versions_root)
    }

    async fn list_installed(&self) -> Result<Vec<NodeVersion>, BackendError> {
        debug!(
            "nvm: scanning {} for installed versions",
            self.versions_root.display()
        );
        scan_versions_dir(&self.versions_root).await
    }

    async fn listed_versions(&self) -> Result<Vec<NodeVersion>, BackendError> {
        debug!("nvm: reading the version listing");
        let output = self.session.raw_listing().await?;
        Ok(if self.session.is_windows() {
            parse_windows_installed(&output)
        } else {
            parse_unix_installed(&output)
        })
    }

    async fn latest_stable(&self) -> Result<Option<NodeVersion>, BackendError> {
        debug!("nvm: querying the latest stable release");
        let output = self.session.available_listing().await?;
        Ok(if self.session.is_windows() {
            parse_windows_latest_stable(&output)
        } else {
            parse_unix_latest_stable(&output)
        })
    }

    async fn current(&self) -> Result<Option<NodeVersion>, BackendError> {
        debug!("nvm: getting the current version");
        self.session.current().await
    }

    async fn activate(&self, version: &NodeVersion) -> Result<(), BackendError> {
        info!("nvm: switching to {version}");
        self.session.use_version(version).await
    }

    async fn install(&self, version: &NodeVersion) -> Result<(), BackendError> {
        info!("nvm: installing {version}");
        self.session.install(version).await
    }

    async fn uninstall(&self, version: &NodeVersion) -> Result<(), BackendError> {
        info!("nvm: uninstalling {version}");
        self.session.uninstall(version).await
    }

    async fn is_still_listed(&self, version: &NodeVersion) -> Result<bool, BackendError> {
        let output = self.session.raw_listing().await?;
        Ok(listing_contains_version(&output, version))
    }

    async fn force_remove(&self, version: &NodeVersion) -> Result<bool, BackendError> {
        warn!(
            "nvm: force-removing {version} under {}",
            self.versions_root.display()
        );
        remove_version_dir(&self.versions_root, version).await
    }
}
