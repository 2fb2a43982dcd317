//! The synchronization driver: one sequential pass over every configured
//! provider.

use std::sync::Arc;

use provmir_config::Config;
use provmir_registry::ProviderRegistry;
use tracing::{debug, info};

use crate::{
    error::Result,
    layout::WorkDirLayout,
    resolver::{resolve_platforms, resolve_versions},
    sync::sync_version,
};

/// Runs a full synchronization pass.
///
/// Providers and versions are processed strictly in order; concurrency is
/// confined to the per-version artifact stage inside
/// [`sync_version`](crate::sync::sync_version). The remote catalog is
/// fetched once per provider. The first error anywhere aborts the run.
pub async fn run<R>(registry: Arc<R>, config: &Config) -> Result<()>
where
    R: ProviderRegistry + 'static,
{
    let layout = WorkDirLayout::new(config.client.work_dir(), config.client.registry_host());
    let parallel_limit = config.client.parallel_limit();

    for provider in &config.providers {
        info!(provider = %provider.source, "synchronizing provider");
        let catalog = registry.list_versions(&provider.source)?;

        for entry in resolve_versions(&catalog, &provider.versions) {
            let platforms = resolve_platforms(entry, &provider.platforms);

            let mut artifacts = Vec::with_capacity(platforms.len());
            for platform in &platforms {
                artifacts.push(registry.package_metadata(
                    &provider.source,
                    &entry.version,
                    platform,
                )?);
            }

            debug!(
                provider = %provider.source,
                version = %entry.version,
                targets = artifacts.len(),
                "resolved artifact targets"
            );

            sync_version(
                &registry,
                &layout,
                &provider.source,
                &entry.version,
                artifacts,
                parallel_limit,
            )
            .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use provmir_config::{ClientConfig, Platform, ProviderConfig};
    use tempfile::tempdir;

    use super::*;
    use crate::{
        error::MirrorError,
        index::{ProviderIndex, VersionIndex},
        test_support::{catalog_entry, zip_bytes, MockRegistry},
    };

    const SOURCE: &str = "acme/widget";

    fn config_for(dir: &std::path::Path, versions: &[&str], platforms: &[Platform]) -> Config {
        Config {
            client: ClientConfig {
                work_dir: Some(dir.to_string_lossy().into_owned()),
                registry_host: Some("registry.example.net".to_string()),
                ..ClientConfig::default()
            },
            providers: vec![ProviderConfig {
                source: SOURCE.to_string(),
                versions: versions.iter().map(|v| v.to_string()).collect(),
                platforms: platforms.to_vec(),
            }],
        }
    }

    #[tokio::test]
    async fn test_selected_version_and_platform_mirrors_one_artifact() {
        let dir = tempdir().unwrap();
        let linux = Platform::new("linux", "amd64");
        let darwin = Platform::new("darwin", "arm64");

        let filename = MockRegistry::artifact_name("2.0.0", &linux);
        let registry = Arc::new(
            MockRegistry::new(vec![catalog_entry(
                "2.0.0",
                &[linux.clone(), darwin.clone()],
            )])
            .with_payload(&filename, zip_bytes(&[("widget", b"v2 linux build")])),
        );

        let config = config_for(dir.path(), &["2.0.0"], &[linux]);
        run(Arc::clone(&registry), &config).await.unwrap();

        // Only the selected platform is resolved: one metadata call, one
        // transfer, and darwin/arm64 is never requested.
        assert_eq!(registry.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.metadata_fetches(), 1);
        assert_eq!(registry.fetches(), 1);

        let layout = WorkDirLayout::new(dir.path(), "registry.example.net");
        assert!(layout.archive_path(SOURCE, &filename).is_file());

        let index = VersionIndex::load(layout.version_index_path(SOURCE, "2.0.0")).unwrap();
        assert_eq!(index.archives.len(), 1);
        assert_eq!(index.archives["linux_amd64"].hashes.len(), 1);

        let provider_index = ProviderIndex::load(layout.provider_index_path(SOURCE)).unwrap();
        assert!(provider_index.contains("2.0.0"));
    }

    #[tokio::test]
    async fn test_empty_selections_mirror_everything_advertised() {
        let dir = tempdir().unwrap();
        let linux = Platform::new("linux", "amd64");
        let darwin = Platform::new("darwin", "arm64");

        let mut registry = MockRegistry::new(vec![
            catalog_entry("1.0.0", &[linux.clone()]),
            catalog_entry("2.0.0", &[linux.clone(), darwin.clone()]),
        ]);
        for (version, platform) in [("1.0.0", &linux), ("2.0.0", &linux), ("2.0.0", &darwin)] {
            let filename = MockRegistry::artifact_name(version, platform);
            registry = registry.with_payload(
                &filename,
                zip_bytes(&[("widget", filename.as_bytes())]),
            );
        }
        let registry = Arc::new(registry);

        let config = config_for(dir.path(), &[], &[]);
        run(Arc::clone(&registry), &config).await.unwrap();

        assert_eq!(registry.metadata_fetches(), 3);
        assert_eq!(registry.fetches(), 3);

        let layout = WorkDirLayout::new(dir.path(), "registry.example.net");
        let provider_index = ProviderIndex::load(layout.provider_index_path(SOURCE)).unwrap();
        assert!(provider_index.contains("1.0.0"));
        assert!(provider_index.contains("2.0.0"));
    }

    #[tokio::test]
    async fn test_unknown_requested_version_yields_nothing() {
        let dir = tempdir().unwrap();
        let linux = Platform::new("linux", "amd64");
        let registry = Arc::new(MockRegistry::new(vec![catalog_entry("1.0.0", &[linux])]));

        let config = config_for(dir.path(), &["9.9.9"], &[]);
        run(Arc::clone(&registry), &config).await.unwrap();

        assert_eq!(registry.metadata_fetches(), 0);
        assert_eq!(registry.fetches(), 0);
    }

    #[tokio::test]
    async fn test_first_error_aborts_the_run() {
        let dir = tempdir().unwrap();
        let linux = Platform::new("linux", "amd64");
        // Catalog advertises the version but no payload is registered, so
        // the transfer fails with HTTP 404.
        let registry = Arc::new(MockRegistry::new(vec![catalog_entry("1.0.0", &[linux])]));

        let config = config_for(dir.path(), &[], &[]);
        let result = run(Arc::clone(&registry), &config).await;

        assert!(matches!(result, Err(MirrorError::Registry(_))));
    }
}
