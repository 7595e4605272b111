//! Removing one installed version, escalating from the manager's own
//! uninstall to deleting the version directory by hand.
//!
//! The manager's exit status is advisory; what the removal trusts is the
//! manager's listing, re-queried after each step.

use log::{info, warn};

use nodekeep_backend::{NodeVersion, VersionManager};

/// How far the removal of one version got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The manager's own uninstall cleared the listing.
    Uninstalled,
    /// The version directory had to be deleted by hand, and the listing is
    /// clear now.
    ForceRemoved,
    /// Everything was tried and the listing still shows the version.
    StillListed,
    /// No version directory exists on disk; the listing entry is a leftover
    /// in the manager's own configuration.
    PhantomEntry,
    /// Uninstall left the version listed and the caller declined to force.
    Declined,
}

/// Remove `version`, asking `confirm_force` before touching the filesystem.
///
/// `confirm_force` is only called once the polite path has failed, so a
/// caller that always answers no still gets the manager's uninstall
/// attempted.
pub async fn remove_version<C>(
    manager: &dyn VersionManager,
    version: &NodeVersion,
    mut confirm_force: C,
) -> RemovalOutcome
where
    C: FnMut(&NodeVersion) -> bool,
{
    if let Err(error) = manager.uninstall(version).await {
        warn!("uninstall of {version} reported: {error}");
    }

    if !still_listed(manager, version).await {
        info!("{version} uninstalled");
        return RemovalOutcome::Uninstalled;
    }

    info!("{version} is still listed after uninstall");
    if !confirm_force(version) {
        return RemovalOutcome::Declined;
    }

    match manager.force_remove(version).await {
        Ok(true) => {
            if still_listed(manager, version).await {
                RemovalOutcome::StillListed
            } else {
                RemovalOutcome::ForceRemoved
            }
        }
        Ok(false) => RemovalOutcome::PhantomEntry,
        Err(error) => {
            warn!("force removal of {version} failed: {error}");
            RemovalOutcome::StillListed
        }
    }
}

/// A listing that cannot be read counts as still listed; nothing gets
/// declared removed on a guess.
async fn still_listed(manager: &dyn VersionManager, version: &NodeVersion) -> bool {
    match manager.is_still_listed(version).await {
        Ok(listed) => listed,
        Err(error) => {
            warn!("could not re-check the listing for {version}: {error}");
            true
        }
    }
}
