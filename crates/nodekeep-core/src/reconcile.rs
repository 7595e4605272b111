//! The reconciliation engine: compare a desired package set against what the
//! target runtime actually has, then resolve each candidate under a batch or
//! interactive policy.

use log::{info, warn};

use nodekeep_backend::{ActiveRuntime, PackageManager};

/// Where one desired package stands under the target runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStatus {
    pub name: String,
    pub installed: Option<String>,
    pub latest: Option<String>,
}

impl PackageStatus {
    /// Up to date means both versions are known and textually identical.
    /// Everything else makes the package a candidate, including a
    /// pre-release suffix difference.
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        match (&self.installed, &self.latest) {
            (Some(installed), Some(latest)) => installed == latest,
            _ => false,
        }
    }
}

/// How remaining candidates get resolved. Escalation is one-way: once an
/// answer broadcasts to "all remaining", later candidates are never asked
/// about again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPolicy {
    AskEach,
    InstallAll,
    SkipAll,
}

/// One answer to the candidate prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Install,
    Skip,
    InstallAllRemaining,
    SkipAllRemaining,
}

/// What the prompt shows for one candidate. The description is fetched
/// lazily, only for candidates that actually reach a prompt.
#[derive(Debug, Clone)]
pub struct CandidatePrompt {
    pub name: String,
    pub description: String,
    pub installed: Option<String>,
    pub latest: Option<String>,
}

/// What a reconciliation run did, name by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Look up every desired package under the target runtime, in the desired
/// order.
pub async fn classify_packages(
    packages: &dyn PackageManager,
    runtime: &ActiveRuntime,
    desired: &[String],
) -> Vec<PackageStatus> {
    let mut statuses = Vec::with_capacity(desired.len());
    for name in desired {
        let installed = packages.installed_version(runtime, name).await;
        let latest = packages.latest_version(name).await;
        statuses.push(PackageStatus {
            name: name.clone(),
            installed,
            latest,
        });
    }
    statuses
}

/// Split statuses into (up to date, candidates), keeping order within each.
#[must_use]
pub fn split_candidates(statuses: Vec<PackageStatus>) -> (Vec<PackageStatus>, Vec<PackageStatus>) {
    statuses.into_iter().partition(PackageStatus::is_up_to_date)
}

/// Resolve candidates one at a time under `policy`, installing as decided.
///
/// An install failure is recorded and the loop moves on; one broken package
/// must not sink the rest. The decider is only consulted while the policy is
/// [`InstallPolicy::AskEach`].
pub async fn run_candidates<D>(
    packages: &dyn PackageManager,
    runtime: &ActiveRuntime,
    candidates: &[PackageStatus],
    mut policy: InstallPolicy,
    mut decide: D,
) -> ReconcileReport
where
    D: FnMut(&CandidatePrompt) -> PromptChoice,
{
    let mut report = ReconcileReport::default();

    for candidate in candidates {
        let install = match policy {
            InstallPolicy::InstallAll => true,
            InstallPolicy::SkipAll => false,
            InstallPolicy::AskEach => {
                let prompt = CandidatePrompt {
                    name: candidate.name.clone(),
                    description: packages.description(&candidate.name).await,
                    installed: candidate.installed.clone(),
                    latest: candidate.latest.clone(),
                };
                match decide(&prompt) {
                    PromptChoice::Install => true,
                    PromptChoice::Skip => false,
                    PromptChoice::InstallAllRemaining => {
                        policy = InstallPolicy::InstallAll;
                        true
                    }
                    PromptChoice::SkipAllRemaining => {
                        policy = InstallPolicy::SkipAll;
                        false
                    }
                }
            }
        };

        if !install {
            info!("skipping {}", candidate.name);
            report.skipped.push(candidate.name.clone());
            continue;
        }

        if packages.install_global(runtime, &candidate.name).await {
            report.installed.push(candidate.name.clone());
        } else {
            warn!("{} did not install, moving on", candidate.name);
            report.failed.push(candidate.name.clone());
        }
    }

    report
}
