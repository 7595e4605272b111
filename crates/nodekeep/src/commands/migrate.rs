use std::io;
use std::path::Path;

use nodekeep_backend::{NodeVersion, VersionManager};
use nodekeep_core::{
    InstallPolicy, LEDGER_FILE, activate_and_hold, capture_global_packages, classify_packages,
    read_ledger, run_candidates, split_candidates,
};

use crate::commands::{resolve_latest, summarize};
use crate::context::Tools;
use crate::ui;

/// Bring the target version's global packages up to a desired set: the live
/// set of `--from`, or the ledger written by `list-all`.
pub async fn migrate(tools: &Tools, to: Option<NodeVersion>, from: Option<NodeVersion>, yes: bool) {
    let manager = &tools.manager;

    let target = match to {
        Some(target) => target,
        None => {
            let Some(latest) = resolve_latest(manager).await else {
                return;
            };
            ui::info(&format!("migrating to the latest LTS release, {latest}"));
            latest
        }
    };

    let installed = match manager.list_installed().await {
        Ok(installed) => installed,
        Err(error) => {
            ui::error(&format!("could not list installed versions: {error}"));
            return;
        }
    };

    let desired = match from {
        Some(source) => {
            if source == target {
                ui::error("--from and --to name the same version");
                return;
            }
            if !installed.contains(&source) {
                ui::error(&format!("{source} is not installed"));
                return;
            }
            capture_global_packages(manager, &tools.packages, &source).await
        }
        None => match read_ledger(Path::new(LEDGER_FILE)) {
            Ok(packages) => packages,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                ui::error(&format!("{LEDGER_FILE} does not exist yet"));
                ui::info("run `nodekeep list-all` first to capture it, or pass --from");
                return;
            }
            Err(error) => {
                ui::error(&format!("could not read {LEDGER_FILE}: {error}"));
                return;
            }
        },
    };

    if !installed.contains(&target) {
        ui::info(&format!("installing {target}"));
        if let Err(error) = manager.install(&target).await {
            ui::error(&format!("{target} did not install: {error}"));
            return;
        }
        ui::success(&format!("{target} installed"));
    }

    let runtime = match activate_and_hold(manager, &target).await {
        Ok(runtime) => runtime,
        Err(error) => {
            ui::error(&format!("could not switch to {target}: {error}"));
            return;
        }
    };
    ui::success(&format!("now using {target}"));

    if desired.is_empty() {
        ui::info("there are no packages to migrate");
        return;
    }

    let statuses = classify_packages(&tools.packages, &runtime, &desired).await;
    let (up_to_date, candidates) = split_candidates(statuses);
    for status in &up_to_date {
        ui::success(&format!("{} is up to date", status.name));
    }
    if candidates.is_empty() {
        ui::success("everything is already in place");
        return;
    }

    let policy = if yes {
        InstallPolicy::InstallAll
    } else {
        InstallPolicy::AskEach
    };
    let report = run_candidates(
        &tools.packages,
        &runtime,
        &candidates,
        policy,
        ui::prompt_candidate,
    )
    .await;
    summarize(&report);
}
