//! Resolution of a provider's desired versions and platforms against the
//! remote catalog snapshot.

use provmir_config::Platform;
use provmir_registry::{VersionCatalog, VersionEntry};

/// Resolves the catalog entries a provider's version selection targets.
///
/// An empty selection means every remote version, in catalog order. A
/// non-empty selection is an exact-string membership filter: versions the
/// remote does not advertise silently resolve to nothing, and no semver or
/// range semantics are applied.
pub fn resolve_versions<'c>(
    catalog: &'c VersionCatalog,
    desired: &[String],
) -> Vec<&'c VersionEntry> {
    catalog
        .versions
        .iter()
        .filter(|entry| desired.is_empty() || desired.iter().any(|v| *v == entry.version))
        .collect()
}

/// Resolves the platforms to mirror for one catalog entry.
///
/// An empty selection means every platform the entry advertises; otherwise
/// only the desired platforms the remote actually publishes are returned.
pub fn resolve_platforms(entry: &VersionEntry, desired: &[Platform]) -> Vec<Platform> {
    if desired.is_empty() {
        return entry.platforms.clone();
    }

    desired
        .iter()
        .filter(|platform| entry.supports(platform))
        .cloned()
        .collect()
}
