use std::collections::BTreeSet;

use nodekeep_backend::{NodeVersion, VersionManager};
use nodekeep_core::{
    InstallPolicy, activate_and_hold, capture_many, classify_packages, remove_version,
    run_candidates, split_candidates,
};

use crate::commands::{confirm_directory_removal, report_removal, resolve_latest, summarize};
use crate::context::Tools;
use crate::ui;

/// Move the machine onto the latest LTS release: install it if needed,
/// carry the older versions' global packages over, then offer to retire
/// those older versions.
pub async fn cleanup(tools: &Tools) {
    let manager = &tools.manager;

    let Some(latest) = resolve_latest(manager).await else {
        return;
    };
    ui::info(&format!("latest LTS release is {latest}"));

    let installed = match manager.list_installed().await {
        Ok(installed) => installed,
        Err(error) => {
            ui::error(&format!("could not list installed versions: {error}"));
            return;
        }
    };
    let old_versions: Vec<NodeVersion> = installed
        .iter()
        .filter(|version| **version < latest)
        .cloned()
        .collect();

    if !installed.contains(&latest) {
        ui::info(&format!("installing {latest}"));
        if let Err(error) = manager.install(&latest).await {
            ui::error(&format!("{latest} did not install: {error}"));
            return;
        }
        ui::success(&format!("{latest} installed"));
    }

    // Capture before anything gets removed.
    let captured = capture_many(manager, &tools.packages, &old_versions).await;
    let desired = union_of(&captured);

    let runtime = match activate_and_hold(manager, &latest).await {
        Ok(runtime) => runtime,
        Err(error) => {
            ui::error(&format!("could not switch to {latest}: {error}"));
            return;
        }
    };
    ui::success(&format!("now using {latest}"));

    if desired.is_empty() {
        ui::info("no global packages to carry over");
    } else {
        let statuses = classify_packages(&tools.packages, &runtime, &desired).await;
        let (up_to_date, candidates) = split_candidates(statuses);
        for status in &up_to_date {
            ui::success(&format!("{} is up to date", status.name));
        }
        if candidates.is_empty() {
            ui::success("every carried-over package is up to date");
        } else {
            let report = run_candidates(
                &tools.packages,
                &runtime,
                &candidates,
                InstallPolicy::AskEach,
                ui::prompt_candidate,
            )
            .await;
            summarize(&report);
        }
    }

    if old_versions.is_empty() {
        ui::info("no older versions to remove");
        return;
    }

    let names = old_versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if !ui::confirm(&format!("Remove {names}?"), true) {
        ui::info("keeping the older versions");
        return;
    }
    for version in &old_versions {
        let outcome = remove_version(manager, version, confirm_directory_removal).await;
        report_removal(tools, version, outcome);
    }
}

/// One deduplicated, sorted set out of everything the retiring versions had.
fn union_of(captured: &[(NodeVersion, Vec<String>)]) -> Vec<String> {
    let mut union = BTreeSet::new();
    for (_version, packages) in captured {
        union.extend(packages.iter().cloned());
    }
    union.into_iter().collect()
}
