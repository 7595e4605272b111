mod cleanup;
mod fix_failed;
mod install_lts;
mod list_all;
mod migrate;

pub use cleanup::cleanup;
pub use fix_failed::fix_failed;
pub use install_lts::install_lts;
pub use list_all::list_all;
pub use migrate::migrate;

use nodekeep_backend::{NodeVersion, VersionManager};
use nodekeep_core::{ReconcileReport, RemovalOutcome};

use crate::context::Tools;
use crate::ui;

/// The latest LTS release, or `None` after telling the user why the
/// workflow cannot continue. A listing with no recognizable LTS entry and a
/// failed query are both hard stops; nothing substitutes a default here.
async fn resolve_latest(manager: &dyn VersionManager) -> Option<NodeVersion> {
    match manager.latest_stable().await {
        Ok(Some(latest)) => Some(latest),
        Ok(None) => {
            ui::error("no LTS release found in the available-versions listing");
            None
        }
        Err(error) => {
            ui::error(&format!("could not query the available versions: {error}"));
            None
        }
    }
}

/// The force-removal question shared by every removal path.
fn confirm_directory_removal(version: &NodeVersion) -> bool {
    ui::confirm(
        &format!("{version} is still listed. Delete its directory?"),
        false,
    )
}

fn report_removal(tools: &Tools, version: &NodeVersion, outcome: RemovalOutcome) {
    match outcome {
        RemovalOutcome::Uninstalled => ui::success(&format!("{version} removed")),
        RemovalOutcome::ForceRemoved => {
            ui::success(&format!("{version} removed (directory deleted)"));
        }
        RemovalOutcome::Declined => ui::info(&format!("kept {version}")),
        RemovalOutcome::StillListed => {
            ui::warning(&format!("{version} is still listed; remove it by hand"));
        }
        RemovalOutcome::PhantomEntry => {
            ui::warning(&format!("{version} has no directory on disk"));
            if let Some(root) = tools.manager.versions_root() {
                ui::info(&format!(
                    "its listing entry is stale; check the {} configuration next to {}",
                    tools.manager.name(),
                    root.display()
                ));
            }
        }
    }
}

fn summarize(report: &ReconcileReport) {
    if !report.installed.is_empty() {
        ui::success(&format!("installed {}", report.installed.join(", ")));
    }
    if !report.skipped.is_empty() {
        ui::info(&format!("skipped {}", report.skipped.join(", ")));
    }
    if !report.failed.is_empty() {
        ui::warning(&format!("failed to install {}", report.failed.join(", ")));
    }
}
