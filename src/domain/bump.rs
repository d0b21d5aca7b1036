use semver::Version;

/// Magnitude of version increment implied by a commit or commit set.
///
/// Ordered so that the aggregate bump over a commit set is simply the
/// maximum of the per-commit classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bump {
    None,
    Patch,
    Minor,
    Major,
}

/// Applies a bump to a version.
///
/// Incrementing a component resets the lower ones and drops any pre-release
/// suffix; `Bump::None` returns the version unchanged.
pub fn bump_version(version: &Version, bump: Bump) -> Version {
    match bump {
        Bump::Major => Version::new(version.major + 1, 0, 0),
        Bump::Minor => Version::new(version.major, version.minor + 1, 0),
        Bump::Patch => Version::new(version.major, version.minor, version.patch + 1),
        Bump::None => version.clone(),
    }
}
