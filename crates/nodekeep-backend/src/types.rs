use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A Node.js runtime version as nvm knows it: a strict `major.minor.patch`
/// triple. Parsing accepts an optional leading `v` and surrounding
/// whitespace, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl NodeVersion {
    #[must_use]
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The version without the `v` prefix, e.g. `18.20.0`. This is the form
    /// the ledger records and the form nvm-windows expects as an argument.
    #[must_use]
    pub fn bare(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Ord for NodeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

impl PartialOrd for NodeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComponent {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("Expected a major.minor.patch version, got {input:?}")]
    InvalidFormat { input: String },
    #[error("The {component} component {value:?} is not a number")]
    InvalidComponent {
        component: VersionComponent,
        value: String,
    },
}

impl FromStr for NodeVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().strip_prefix('v').unwrap_or(s.trim());

        let invalid = || VersionParseError::InvalidFormat {
            input: s.to_string(),
        };

        let mut parts = s.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let minor_str = parts.next().ok_or_else(invalid)?;
        let patch_str = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let component = |component, value: &str| VersionParseError::InvalidComponent {
            component,
            value: value.to_string(),
        };

        let major = major_str
            .parse()
            .map_err(|_| component(VersionComponent::Major, major_str))?;
        let minor = minor_str
            .parse()
            .map_err(|_| component(VersionComponent::Minor, minor_str))?;
        let patch = patch_str
            .parse()
            .map_err(|_| component(VersionComponent::Patch, patch_str))?;

        Ok(NodeVersion::new(major, minor, patch))
    }
}

/// Evidence that a runtime version was switched to by the holder.
///
/// Global package reads and installs land on whatever version is currently
/// active in the surrounding environment, so the operations that depend on it
/// require this token instead of silently assuming the right version is
/// active. Obtain one through the snapshot helpers, which pair activation
/// with restoration.
#[derive(Debug, Clone)]
pub struct ActiveRuntime {
    version: NodeVersion,
}

impl ActiveRuntime {
    #[must_use]
    pub fn new(version: NodeVersion) -> Self {
        Self { version }
    }

    #[must_use]
    pub fn version(&self) -> &NodeVersion {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version_with_v_prefix() {
        let v: NodeVersion = "v20.11.0".parse().unwrap();
        assert_eq!(v.major, 20);
        assert_eq!(v.minor, 11);
        assert_eq!(v.patch, 0);
    }

    #[test]
    fn parse_version_without_v_prefix() {
        let v: NodeVersion = "20.11.0".parse().unwrap();
        assert_eq!(v.major, 20);
        assert_eq!(v.minor, 11);
        assert_eq!(v.patch, 0);
    }

    #[test]
    fn parse_version_with_whitespace() {
        let v: NodeVersion = "  v20.11.0  ".parse().unwrap();
        assert_eq!(v.major, 20);
    }

    #[test]
    fn parse_version_rejects_two_components() {
        let result: Result<NodeVersion, _> = "v20.11".parse();
        assert!(result.is_err());
    }

    #[test]
    fn parse_version_rejects_four_components() {
        let result: Result<NodeVersion, _> = "20.11.0.1".parse();
        assert!(result.is_err());
    }

    #[test]
    fn parse_version_rejects_non_numeric_component() {
        let result: Result<NodeVersion, _> = "vXX.11.0".parse();
        assert!(result.is_err());
    }

    #[test]
    fn parse_version_rejects_prerelease_suffix() {
        let result: Result<NodeVersion, _> = "20.11.0-rc.1".parse();
        assert!(result.is_err());
    }

    #[test]
    fn display_is_v_prefixed() {
        let v = NodeVersion::new(20, 11, 0);
        assert_eq!(v.to_string(), "v20.11.0");
    }

    #[test]
    fn bare_has_no_prefix() {
        let v = NodeVersion::new(18, 20, 0);
        assert_eq!(v.bare(), "18.20.0");
    }

    #[test]
    fn ordering_by_major() {
        let v1: NodeVersion = "v18.0.0".parse().unwrap();
        let v2: NodeVersion = "v20.0.0".parse().unwrap();
        assert!(v2 > v1);
    }

    #[test]
    fn ordering_by_minor() {
        let v1: NodeVersion = "v20.10.0".parse().unwrap();
        let v2: NodeVersion = "v20.11.0".parse().unwrap();
        assert!(v2 > v1);
    }

    #[test]
    fn ordering_by_patch() {
        let v1: NodeVersion = "v20.11.0".parse().unwrap();
        let v2: NodeVersion = "v20.11.1".parse().unwrap();
        assert!(v2 > v1);
    }

    #[test]
    fn equality_ignores_source_formatting() {
        let v1: NodeVersion = "v20.11.0".parse().unwrap();
        let v2: NodeVersion = "20.11.0".parse().unwrap();
        assert_eq!(v1, v2);
    }

    #[test]
    fn active_runtime_exposes_its_version() {
        let runtime = ActiveRuntime::new(NodeVersion::new(22, 1, 0));
        assert_eq!(runtime.version(), &NodeVersion::new(22, 1, 0));
    }
}
