use nodekeep_backend::VersionManager;

use crate::commands::resolve_latest;
use crate::context::Tools;
use crate::ui;

/// Put the latest LTS release on the machine and switch to it.
pub async fn install_lts(tools: &Tools) {
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

    if installed.contains(&latest) {
        ui::info(&format!("{latest} is already installed"));
    } else {
        ui::info(&format!("installing {latest}"));
        if let Err(error) = manager.install(&latest).await {
            ui::error(&format!("{latest} did not install: {error}"));
            return;
        }
        ui::success(&format!("{latest} installed"));
    }

    match manager.activate(&latest).await {
        Ok(()) => ui::success(&format!("now using {latest}")),
        Err(error) => ui::warning(&format!("could not switch to {latest}: {error}")),
    }
}
