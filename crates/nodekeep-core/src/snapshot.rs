//! Activation-scoped capture of global package sets.
//!
//! Which version is "active" is process-external mutable state owned by nvm.
//! The helpers here are the only places that flip it: they pair every switch
//! with a restore, or say in their name that they deliberately do not.

use log::{debug, warn};
use std::future::Future;

use nodekeep_backend::{ActiveRuntime, BackendError, NodeVersion, PackageManager, VersionManager};

/// Run `operation` with `version` active, then put the entry version back.
///
/// The entry version is re-activated whether the operation's answer was
/// useful or degraded; only a failure to activate `version` in the first
/// place returns early, since there is nothing to undo at that point.
/// Restore failures are logged, not surfaced.
pub async fn with_active_version<F, Fut, T>(
    manager: &dyn VersionManager,
    version: &NodeVersion,
    operation: F,
) -> Result<T, BackendError>
where
    F: FnOnce(ActiveRuntime) -> Fut,
    Fut: Future<Output = T>,
{
    let entry = entry_version(manager).await;

    manager.activate(version).await?;
    let result = operation(ActiveRuntime::new(version.clone())).await;

    match entry {
        Some(previous) if previous != *version => {
            if let Err(error) = manager.activate(&previous).await {
                warn!("could not switch back to {previous}: {error}");
            }
        }
        Some(_) => {}
        None => debug!("no entry version recorded, leaving {version} active"),
    }

    Ok(result)
}

/// Global package names of `version`, captured by switching to it and back.
/// A version that cannot be activated yields an empty set and a warning,
/// so callers keep going.
pub async fn capture_global_packages(
    manager: &dyn VersionManager,
    packages: &dyn PackageManager,
    version: &NodeVersion,
) -> Vec<String> {
    let captured = with_active_version(manager, version, |runtime| async move {
        packages.global_packages(&runtime).await
    })
    .await;

    match captured {
        Ok(names) => names,
        Err(error) => {
            warn!("could not switch to {version} to read its packages: {error}");
            Vec::new()
        }
    }
}

/// Capture the package sets of several versions in one sweep: record the
/// entry version once, visit each version in turn, restore the entry version
/// at the end. Versions that cannot be activated contribute empty sets; the
/// restore still happens.
pub async fn capture_many(
    manager: &dyn VersionManager,
    packages: &dyn PackageManager,
    versions: &[NodeVersion],
) -> Vec<(NodeVersion, Vec<String>)> {
    let entry = entry_version(manager).await;

    let mut entries = Vec::with_capacity(versions.len());
    for version in versions {
        let names = match manager.activate(version).await {
            Ok(()) => {
                let runtime = ActiveRuntime::new(version.clone());
                packages.global_packages(&runtime).await
            }
            Err(error) => {
                warn!("could not switch to {version}, recording it without packages: {error}");
                Vec::new()
            }
        };
        entries.push((version.clone(), names));
    }

    match entry {
        Some(previous) => {
            if let Err(error) = manager.activate(&previous).await {
                warn!("could not switch back to {previous}: {error}");
            }
        }
        None if versions.is_empty() => {}
        None => debug!("no entry version recorded, leaving the last visited version active"),
    }

    entries
}

/// Switch to `version` and stay there. The deliberate counterpart to
/// [`with_active_version`] for flows that keep operating under the target
/// afterwards, like migrating packages onto it.
pub async fn activate_and_hold(
    manager: &dyn VersionManager,
    version: &NodeVersion,
) -> Result<ActiveRuntime, BackendError> {
    manager.activate(version).await?;
    Ok(ActiveRuntime::new(version.clone()))
}

async fn entry_version(manager: &dyn VersionManager) -> Option<NodeVersion> {
    match manager.current().await {
        Ok(current) => current,
        Err(error) => {
            debug!("could not record the entry version: {error}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct ScriptedManager {
        current: Option<NodeVersion>,
        unswitchable: HashSet<NodeVersion>,
        activations: Mutex<Vec<NodeVersion>>,
    }

    impl ScriptedManager {
        fn with_current(version: &str) -> Self {
            Self {
                current: Some(version.parse().unwrap()),
                ..Self::default()
            }
        }

        fn refusing(mut self, version: &str) -> Self {
            self.unswitchable.insert(version.parse().unwrap());
            self
        }

        fn activations(&self) -> Vec<NodeVersion> {
            self.activations.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VersionManager for ScriptedManager {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn versions_root(&self) -> Option<&Path> {
            None
        }

        async fn list_installed(&self) -> Result<Vec<NodeVersion>, BackendError> {
            Ok(Vec::new())
        }

        async fn listed_versions(&self) -> Result<Vec<NodeVersion>, BackendError> {
            Ok(Vec::new())
        }

        async fn latest_stable(&self) -> Result<Option<NodeVersion>, BackendError> {
            Ok(None)
        }

        async fn current(&self) -> Result<Option<NodeVersion>, BackendError> {
            Ok(self.current.clone())
        }

        async fn activate(&self, version: &NodeVersion) -> Result<(), BackendError> {
            self.activations.lock().unwrap().push(version.clone());
            if self.unswitchable.contains(version) {
                Err(BackendError::command_failed(format!(
                    "cannot switch to {version}"
                )))
            } else {
                Ok(())
            }
        }

        async fn install(&self, _version: &NodeVersion) -> Result<(), BackendError> {
            Ok(())
        }

        async fn uninstall(&self, _version: &NodeVersion) -> Result<(), BackendError> {
            Ok(())
        }

        async fn is_still_listed(&self, _version: &NodeVersion) -> Result<bool, BackendError> {
            Ok(false)
        }

        async fn force_remove(&self, _version: &NodeVersion) -> Result<bool, BackendError> {
            Ok(false)
        }
    }

    struct FixedPackages {
        names: Vec<String>,
    }

    impl FixedPackages {
        fn new(names: &[&str]) -> Self {
            Self {
                names: names.iter().map(ToString::to_string).collect(),
            }
        }
    }

    #[async_trait]
    impl PackageManager for FixedPackages {
        async fn global_packages(&self, _runtime: &ActiveRuntime) -> Vec<String> {
            self.names.clone()
        }

        async fn installed_version(&self, _runtime: &ActiveRuntime, _name: &str) -> Option<String> {
            None
        }

        async fn latest_version(&self, _name: &str) -> Option<String> {
            None
        }

        async fn description(&self, _name: &str) -> String {
            String::new()
        }

        async fn install_global(&self, _runtime: &ActiveRuntime, _name: &str) -> bool {
            true
        }
    }

    fn v(s: &str) -> NodeVersion {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn scoped_operation_switches_and_restores() {
        let manager = ScriptedManager::with_current("18.20.0");

        let seen = with_active_version(&manager, &v("20.11.0"), |runtime| async move {
            runtime.version().clone()
        })
        .await
        .unwrap();

        assert_eq!(seen, v("20.11.0"));
        assert_eq!(manager.activations(), vec![v("20.11.0"), v("18.20.0")]);
    }

    #[tokio::test]
    async fn scoped_operation_does_not_restore_onto_itself() {
        let manager = ScriptedManager::with_current("20.11.0");

        with_active_version(&manager, &v("20.11.0"), |_runtime| async {}).await.unwrap();

        assert_eq!(manager.activations(), vec![v("20.11.0")]);
    }

    #[tokio::test]
    async fn scoped_operation_fails_fast_when_activation_fails() {
        let manager = ScriptedManager::with_current("18.20.0").refusing("20.11.0");

        let result =
            with_active_version(&manager, &v("20.11.0"), |_runtime| async { 42 }).await;

        assert!(result.is_err());
        // No restore attempt: nothing was changed.
        assert_eq!(manager.activations(), vec![v("20.11.0")]);
    }

    #[tokio::test]
    async fn capture_degrades_to_empty_when_activation_fails() {
        let manager = ScriptedManager::with_current("18.20.0").refusing("20.11.0");
        let packages = FixedPackages::new(&["eslint"]);

        let names = capture_global_packages(&manager, &packages, &v("20.11.0")).await;

        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn capture_many_visits_each_version_and_restores_once() {
        let manager = ScriptedManager::with_current("22.11.0");
        let packages = FixedPackages::new(&["eslint", "prettier"]);

        let entries = capture_many(&manager, &packages, &[v("18.20.0"), v("20.11.0")]).await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, v("18.20.0"));
        assert_eq!(entries[0].1, vec!["eslint", "prettier"]);
        assert_eq!(
            manager.activations(),
            vec![v("18.20.0"), v("20.11.0"), v("22.11.0")]
        );
    }

    #[tokio::test]
    async fn capture_many_records_unswitchable_versions_as_empty_and_still_restores() {
        let manager = ScriptedManager::with_current("22.11.0").refusing("20.11.0");
        let packages = FixedPackages::new(&["eslint"]);

        let entries = capture_many(&manager, &packages, &[v("18.20.0"), v("20.11.0")]).await;

        assert_eq!(entries[0].1, vec!["eslint"]);
        assert!(entries[1].1.is_empty());
        assert_eq!(manager.activations().last(), Some(&v("22.11.0")));
    }

    #[tokio::test]
    async fn activate_and_hold_leaves_the_target_active() {
        let manager = ScriptedManager::with_current("18.20.0");

        let runtime = activate_and_hold(&manager, &v("22.11.0")).await.unwrap();

        assert_eq!(runtime.version(), &v("22.11.0"));
        assert_eq!(manager.activations(), vec![v("22.11.0")]);
    }
}
