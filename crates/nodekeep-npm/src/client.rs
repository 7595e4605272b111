use async_trait::async_trait;
use log::{debug, info, warn};
use std::process::Stdio;
use tokio::process::Command;

use nodekeep_backend::{ActiveRuntime, PackageManager};
use nodekeep_platform::{HideWindow, HostPlatform};

use crate::parse::{parse_global_listing, parse_installed_version};

/// The npm-backed [`PackageManager`].
#[derive(Debug, Clone)]
pub struct NpmCli {
    platform: HostPlatform,
}

impl NpmCli {
    #[must_use]
    pub fn new(platform: HostPlatform) -> Self {
        Self { platform }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        which::which("npm").is_ok()
    }

    fn build_npm_command(&self, args: &[&str]) -> Command {
        // npm is a .cmd shim on Windows, which CreateProcess only resolves
        // through the shell.
        let mut cmd = match self.platform {
            HostPlatform::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.args(["/C", "npm"]);
                cmd
            }
            HostPlatform::Unix => Command::new("npm"),
        };
        cmd.args(args);
        cmd.hide_window();
        cmd
    }

    /// Captured stdout of a query that must succeed to mean anything, such
    /// as `npm view`.
    async fn capture(&self, args: &[&str]) -> Option<String> {
        let output = match self.build_npm_command(args).output().await {
            Ok(output) => output,
            Err(error) => {
                warn!("npm {} did not run: {error}", args.join(" "));
                return None;
            }
        };

        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("npm {} failed: {}", args.join(" "), stderr.trim());
            None
        }
    }

    /// Captured stdout of `npm ls`, which exits non-zero for
    /// peer-dependency noise while still printing the JSON document. Any
    /// stdout is worth parsing; the exit status only rates a debug line.
    async fn capture_listing(&self, args: &[&str]) -> Option<String> {
        match self.build_npm_command(args).output().await {
            Ok(output) => {
                if !output.status.success() {
                    debug!("npm {} exited with {}", args.join(" "), output.status);
                }
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                if stdout.trim().is_empty() {
                    None
                } else {
                    Some(stdout)
                }
            }
            Err(error) => {
                warn!("npm {} did not run: {error}", args.join(" "));
                None
            }
        }
    }
}

#[async_trait]
impl PackageManager for NpmCli {
    async fn global_packages(&self, runtime: &ActiveRuntime) -> Vec<String> {
        debug!("npm: listing global packages under {}", runtime.version());

        let Some(json) = self
            .capture_listing(&["ls", "-g", "--depth=0", "--json"])
            .await
        else {
            return Vec::new();
        };

        match parse_global_listing(&json) {
            Some(names) => names,
            None => {
                warn!("npm: global listing was not valid JSON");
                Vec::new()
            }
        }
    }

    async fn installed_version(&self, runtime: &ActiveRuntime, name: &str) -> Option<String> {
        debug!("npm: checking {name} under {}", runtime.version());

        let json = self
            .capture_listing(&["ls", "-g", "--depth=0", "--json", name])
            .await?;
        parse_installed_version(&json, name)
    }

    async fn latest_version(&self, name: &str) -> Option<String> {
        let output = self.capture(&["view", name, "version"]).await?;
        let version = output.trim();
        if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        }
    }

    async fn description(&self, name: &str) -> String {
        self.capture(&["view", name, "description"])
            .await
            .map(|output| output.trim().to_string())
            .unwrap_or_default()
    }

    async fn install_global(&self, runtime: &ActiveRuntime, name: &str) -> bool {
        info!("npm: installing {name} globally under {}", runtime.version());

        // Let npm talk to the terminal; installs are the one long-running,
        // user-visible npm call.
        let status = self
            .build_npm_command(&["install", "-g", name])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!("npm install -g {name} exited with {status}");
                false
            }
            Err(error) => {
                warn!("npm install -g {name} did not run: {error}");
                false
            }
        }
    }
}
