use nodekeep_backend::{NodeVersion, VersionManager};
use nodekeep_core::remove_version;

use crate::commands::{confirm_directory_removal, report_removal};
use crate::context::Tools;
use crate::ui;

/// Remove one version that did not install cleanly. Works from the
/// manager's own listing rather than the directory scan, so entries whose
/// directory never materialized can still be picked and cleared.
pub async fn fix_failed(tools: &Tools, version: Option<&NodeVersion>) {
    let manager = &tools.manager;

    let target = match version {
        Some(version) => version.clone(),
        None => {
            let listed = match manager.listed_versions().await {
                Ok(listed) => listed,
                Err(error) => {
                    ui::error(&format!("could not read the version listing: {error}"));
                    return;
                }
            };
            if listed.is_empty() {
                ui::info("nothing is listed, so there is nothing to fix");
                return;
            }

            let options: Vec<String> = listed.iter().map(ToString::to_string).collect();
            let Some(index) = ui::choose("Which version should be removed?", &options) else {
                ui::info("nothing removed");
                return;
            };
            listed[index].clone()
        }
    };

    // nvm refuses to uninstall the active version; switching away first is
    // on the user.
    if let Ok(Some(current)) = manager.current().await
        && current == target
    {
        ui::error(&format!(
            "{target} is the active version; switch to another version before removing it"
        ));
        return;
    }

    let outcome = remove_version(manager, &target, confirm_directory_removal).await;
    report_removal(tools, &target, outcome);
}
