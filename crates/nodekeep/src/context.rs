use log::debug;

use nodekeep_npm::NpmCli;
use nodekeep_nvm::{NvmManager, NvmSession, detect_nvm};
use nodekeep_platform::HostPlatform;

use crate::ui;

/// The backend pair every command works through.
pub struct Tools {
    pub manager: NvmManager,
    pub packages: NpmCli,
}

/// Locate nvm and npm. When either is missing this explains how to get it
/// and returns `None`; the caller just stops.
pub async fn locate() -> Option<Tools> {
    let platform = HostPlatform::current();

    let detection = detect_nvm().await;
    let Some(environment) = detection.environment else {
        ui::error("nvm was not found");
        if platform.is_windows() {
            ui::info("install nvm-windows, or point NVM_HOME at its folder");
        } else {
            ui::info("install nvm from https://github.com/nvm-sh/nvm, or point NVM_DIR at it");
        }
        return None;
    };
    match &detection.version {
        Some(version) => debug!("found nvm {version}"),
        None => debug!("found nvm, version unknown"),
    }

    let packages = NpmCli::new(platform);
    if !packages.is_available() {
        ui::error("npm was not found on PATH");
        ui::info("activate a Node.js version through nvm first, then try again");
        return None;
    }

    let manager = NvmManager::new(NvmSession { environment });
    Some(Tools { manager, packages })
}
