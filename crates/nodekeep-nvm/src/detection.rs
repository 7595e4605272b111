use std::path::PathBuf;

use nodekeep_platform::HostPlatform;
use which::which;

use crate::session::{NvmEnvironment, NvmSession};

/// What we know about the nvm installation on this machine.
#[derive(Debug, Clone)]
pub struct NvmDetection {
    pub found: bool,
    pub version: Option<String>,
    pub environment: Option<NvmEnvironment>,
}

impl NvmDetection {
    fn not_found() -> Self {
        Self {
            found: false,
            version: None,
            environment: None,
        }
    }
}

/// Locate nvm (Unix) or nvm-windows, preferring the environment variables
/// the tools themselves set (`NVM_DIR`, `NVM_HOME`) over platform defaults.
pub async fn detect_nvm() -> NvmDetection {
    match HostPlatform::current() {
        HostPlatform::Windows => detect_windows().await,
        HostPlatform::Unix => detect_unix().await,
    }
}

async fn detect_unix() -> NvmDetection {
    let env_dir = std::env::var("NVM_DIR").ok().map(PathBuf::from);
    let default_dir = dirs::home_dir().map(|home| home.join(".nvm"));

    let Some(nvm_dir) = select_nvm_dir(env_dir, default_dir) else {
        log::debug!("no nvm.sh under NVM_DIR or ~/.nvm");
        return NvmDetection::not_found();
    };

    let session = NvmSession::unix(nvm_dir);
    let version = tool_version_of(&session).await;
    NvmDetection {
        found: true,
        version,
        environment: Some(session.environment),
    }
}

async fn detect_windows() -> NvmDetection {
    let env_home = std::env::var("NVM_HOME").ok().map(PathBuf::from);
    // nvm-windows installs under roaming AppData by default.
    let default_home = dirs::config_dir().map(|dir| dir.join("nvm"));
    let path_exe = which("nvm").ok();

    let Some((nvm_exe, nvm_home)) = select_nvm_windows(env_home, default_home, path_exe) else {
        log::debug!("no nvm.exe under NVM_HOME, the default install dir, or PATH");
        return NvmDetection::not_found();
    };

    let session = NvmSession::windows(nvm_exe, nvm_home);
    let version = tool_version_of(&session).await;
    NvmDetection {
        found: true,
        version,
        environment: Some(session.environment),
    }
}

/// A directory counts as an nvm dir when it holds `nvm.sh`. The environment
/// override wins over the default location.
fn select_nvm_dir(env_dir: Option<PathBuf>, default_dir: Option<PathBuf>) -> Option<PathBuf> {
    env_dir
        .into_iter()
        .chain(default_dir)
        .find(|dir| dir.join("nvm.sh").is_file())
}

/// A home directory counts when it holds `nvm.exe`; failing that, an
/// executable on PATH identifies its parent as the home (the directory also
/// holds `settings.txt` and the version directories).
fn select_nvm_windows(
    env_home: Option<PathBuf>,
    default_home: Option<PathBuf>,
    path_exe: Option<PathBuf>,
) -> Option<(PathBuf, PathBuf)> {
    for home in env_home.into_iter().chain(default_home) {
        let exe = home.join("nvm.exe");
        if exe.is_file() {
            return Some((exe, home));
        }
    }

    let exe = path_exe?;
    let home = exe.parent()?.to_path_buf();
    Some((exe, home))
}

async fn tool_version_of(session: &NvmSession) -> Option<String> {
    match session.tool_version().await {
        Ok(version) => Some(version),
        Err(error) => {
            log::debug!("could not query the nvm version: {error}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{select_nvm_dir, select_nvm_windows};

    fn dir_with(file: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join(file), "").expect("create marker file");
        dir
    }

    #[test]
    fn select_nvm_dir_prefers_env_dir_with_nvm_sh() {
        let env_dir = dir_with("nvm.sh");
        let default_dir = dir_with("nvm.sh");

        let selected = select_nvm_dir(
            Some(env_dir.path().to_path_buf()),
            Some(default_dir.path().to_path_buf()),
        );

        assert_eq!(selected, Some(env_dir.path().to_path_buf()));
    }

    #[test]
    fn select_nvm_dir_skips_env_dir_without_nvm_sh() {
        let env_dir = tempfile::tempdir().expect("create temp dir");
        let default_dir = dir_with("nvm.sh");

        let selected = select_nvm_dir(
            Some(env_dir.path().to_path_buf()),
            Some(default_dir.path().to_path_buf()),
        );

        assert_eq!(selected, Some(default_dir.path().to_path_buf()));
    }

    #[test]
    fn select_nvm_dir_returns_none_when_nothing_qualifies() {
        let empty = tempfile::tempdir().expect("create temp dir");

        let selected = select_nvm_dir(None, Some(empty.path().to_path_buf()));

        assert!(selected.is_none());
    }

    #[test]
    fn select_nvm_windows_prefers_home_with_exe() {
        let home = dir_with("nvm.exe");

        let selected = select_nvm_windows(Some(home.path().to_path_buf()), None, None);

        let (exe, selected_home) = selected.expect("home with nvm.exe qualifies");
        assert_eq!(selected_home, home.path());
        assert_eq!(exe, home.path().join("nvm.exe"));
    }

    #[test]
    fn select_nvm_windows_falls_back_to_path_executable() {
        let somewhere = dir_with("nvm.exe");
        let exe = somewhere.path().join("nvm.exe");

        let selected = select_nvm_windows(None, None, Some(exe.clone()));

        let (selected_exe, home) = selected.expect("PATH executable qualifies");
        assert_eq!(selected_exe, exe);
        assert_eq!(home, somewhere.path());
    }

    #[test]
    fn select_nvm_windows_returns_none_without_any_candidate() {
        assert!(select_nvm_windows(None, None, None).is_none());
    }
}
