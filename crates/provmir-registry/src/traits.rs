use std::path::Path;

use provmir_config::Platform;

use crate::{
    error::Result,
    types::{ArtifactMetadata, VersionCatalog},
};

/// Operations the synchronization engine consumes from a registry.
///
/// [`RegistryClient`](crate::RegistryClient) is the HTTP implementation;
/// tests substitute in-memory mocks.
pub trait ProviderRegistry: Send + Sync {
    /// Lists every version the registry publishes for `source`.
    fn list_versions(&self, source: &str) -> Result<VersionCatalog>;

    /// Fetches the artifact metadata for one (version, platform) pair.
    fn package_metadata(
        &self,
        source: &str,
        version: &str,
        platform: &Platform,
    ) -> Result<ArtifactMetadata>;

    /// Transfers the artifact to `dest`, overwriting any existing file.
    fn fetch_artifact(&self, artifact: &ArtifactMetadata, dest: &Path) -> Result<()>;
}
