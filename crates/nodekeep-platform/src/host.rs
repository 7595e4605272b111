/// The flavor of host we are running on, as far as command construction is
/// concerned.
///
/// This is a runtime value rather than pure `cfg` so that tests can exercise
/// the Windows command shapes on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Unix,
    Windows,
}

impl HostPlatform {
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

#[cfg(test)]
mod tests {
    use super::HostPlatform;

    #[test]
    fn current_matches_compile_target() {
        assert_eq!(HostPlatform::current().is_windows(), cfg!(windows));
    }
}
