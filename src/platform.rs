//! Platform family detection.
//!
//! Sessions only ask one question of the platform: whether it belongs to a
//! given family, so Windows hosts can skip the Debian credential file.

/// Answers platform family membership questions.
pub trait Platform: Send + Sync {
    /// Returns true if the platform belongs to `family` (case-insensitive).
    fn in_family(&self, family: &str) -> bool;
}

/// The platform this binary was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn in_family(&self, family: &str) -> bool {
        use std::env::consts::{FAMILY, OS};

        let family = family.to_lowercase();
        family == FAMILY
            || family == OS
            || (family == "darwin" && OS == "macos")
            || (family == "bsd" && OS.ends_with("bsd"))
    }
}

/// A platform with a fixed list of families, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct FixedPlatform {
    families: Vec<String>,
}

impl FixedPlatform {
    /// Creates a platform belonging to every family in `families`.
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: families
                .into_iter()
                .map(|f| f.into().to_lowercase())
                .collect(),
        }
    }

    /// A Debian-like Linux host.
    pub fn unix() -> Self {
        Self::new(["unix", "linux", "debian"])
    }

    /// A Windows host.
    pub fn windows() -> Self {
        Self::new(["windows"])
    }
}

impl Platform for FixedPlatform {
    fn in_family(&self, family: &str) -> bool {
        let family = family.to_lowercase();
        self.families.iter().any(|f| *f == family)
    }
}
