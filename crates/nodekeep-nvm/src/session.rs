use std::path::PathBuf;
use tokio::process::Command;

use nodekeep_backend::{BackendError, NodeVersion};
use nodekeep_platform::HideWindow;

use crate::parse::clean_output;

/// Where and how nvm is reachable on this machine.
///
/// Unix nvm is a shell function, so every invocation goes through `bash`
/// sourcing `nvm.sh`; nvm-windows is an ordinary executable.
#[derive(Debug, Clone)]
pub enum NvmEnvironment {
    Unix { nvm_dir: PathBuf },
    Windows { nvm_exe: PathBuf, nvm_home: PathBuf },
}

/// A handle for running nvm subcommands in a fixed environment and getting
/// back cleaned stdout text.
#[derive(Debug, Clone)]
pub struct NvmSession {
    pub environment: NvmEnvironment,
}

impl NvmSession {
    #[must_use]
    pub fn unix(nvm_dir: PathBuf) -> Self {
        Self {
            environment: NvmEnvironment::Unix { nvm_dir },
        }
    }

    #[must_use]
    pub fn windows(nvm_exe: PathBuf, nvm_home: PathBuf) -> Self {
        Self {
            environment: NvmEnvironment::Windows { nvm_exe, nvm_home },
        }
    }

    #[must_use]
    pub fn is_windows(&self) -> bool {
        matches!(self.environment, NvmEnvironment::Windows { .. })
    }

    fn build_nvm_command(&self, nvm_args: &[&str]) -> Command {
        match &self.environment {
            NvmEnvironment::Unix { nvm_dir } => {
                let script = format!(
                    "export NVM_DIR=\"{}\"; [ -s \"$NVM_DIR/nvm.sh\" ] && \\. \"$NVM_DIR/nvm.sh\"; nvm \"$@\"",
                    nvm_dir.display(),
                );
                let mut cmd = Command::new("bash");
                cmd.args(["-c", &script, "bash"]);
                cmd.args(nvm_args);
                cmd.env("TERM", "dumb");
                cmd.env("NO_COLOR", "1");
                cmd.hide_window();
                cmd
            }
            NvmEnvironment::Windows { nvm_exe, .. } => {
                let mut cmd = Command::new(nvm_exe);
                cmd.args(nvm_args);
                cmd.hide_window();
                cmd
            }
        }
    }

    async fn execute(&self, nvm_args: &[&str]) -> Result<String, BackendError> {
        log::trace!("nvm {}", nvm_args.join(" "));
        let output = self.build_nvm_command(nvm_args).output().await?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).to_string();
            Ok(clean_output(&stdout))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(BackendError::CommandFailed { stderr })
        }
    }

    /// Raw (cleaned) output of the installed-versions listing, `nvm ls` on
    /// Unix and `nvm list` on Windows. Callers parse or token-match it.
    pub async fn raw_listing(&self) -> Result<String, BackendError> {
        if self.is_windows() {
            self.execute(&["list"]).await
        } else {
            self.execute(&["ls"]).await
        }
    }

    /// Raw (cleaned) output of the remote listing used to find the latest
    /// stable release: the `list available` table on Windows, the
    /// `ls-remote --lts` column on Unix.
    pub async fn available_listing(&self) -> Result<String, BackendError> {
        if self.is_windows() {
            self.execute(&["list", "available"]).await
        } else {
            self.execute(&["ls-remote", "--lts"]).await
        }
    }

    /// The currently active version. `none`, `system`, and anything
    /// unparseable all come back as `None`.
    pub async fn current(&self) -> Result<Option<NodeVersion>, BackendError> {
        let output = self.execute(&["current"]).await?;
        let output = output.trim().trim_start_matches('v');

        if output.is_empty() || output == "none" || output == "system" {
            return Ok(None);
        }

        match output.parse() {
            Ok(version) => Ok(Some(version)),
            Err(error) => {
                log::debug!("nvm current output {output:?} is not a version: {error}");
                Ok(None)
            }
        }
    }

    pub async fn use_version(&self, version: &NodeVersion) -> Result<(), BackendError> {
        self.execute(&["use", &version.bare()]).await?;
        Ok(())
    }

    pub async fn install(&self, version: &NodeVersion) -> Result<(), BackendError> {
        self.execute(&["install", &version.bare()]).await?;
        Ok(())
    }

    pub async fn uninstall(&self, version: &NodeVersion) -> Result<(), BackendError> {
        self.execute(&["uninstall", &version.bare()]).await?;
        Ok(())
    }

    /// The nvm tool's own version string, used during detection.
    pub async fn tool_version(&self) -> Result<String, BackendError> {
        let output = if self.is_windows() {
            self.execute(&["version"]).await?
        } else {
            self.execute(&["--version"]).await?
        };
        Ok(output.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_windows_returns_true_for_windows_environment() {
        let session = NvmSession::windows(
            PathBuf::from("C:\\nvm\\nvm.exe"),
            PathBuf::from("C:\\nvm"),
        );
        assert!(session.is_windows());
    }

    #[test]
    fn is_windows_returns_false_for_unix_environment() {
        let session = NvmSession::unix(PathBuf::from("/home/user/.nvm"));
        assert!(!session.is_windows());
    }

    #[test]
    fn unix_command_goes_through_bash_and_sources_nvm() {
        let session = NvmSession::unix(PathBuf::from("/home/user/.nvm"));
        let cmd = session.build_nvm_command(&["ls"]);

        let program = cmd.as_std().get_program().to_string_lossy().to_string();
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(program, "bash");
        assert_eq!(args[0], "-c");
        assert!(args[1].contains("NVM_DIR=\"/home/user/.nvm\""));
        assert!(args[1].contains("nvm.sh"));
        assert_eq!(args[2], "bash");
        assert_eq!(args[3], "ls");
    }

    #[test]
    fn windows_command_runs_the_executable_directly() {
        let session = NvmSession::windows(
            PathBuf::from("C:\\nvm\\nvm.exe"),
            PathBuf::from("C:\\nvm"),
        );
        let cmd = session.build_nvm_command(&["list", "available"]);

        let program = cmd.as_std().get_program().to_string_lossy().to_string();
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(program, "C:\\nvm\\nvm.exe");
        assert_eq!(args, vec!["list", "available"]);
    }
}
