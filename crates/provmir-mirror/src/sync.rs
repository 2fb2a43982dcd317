//! The per-version download coordinator.

use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use provmir_registry::{ArtifactMetadata, ProviderRegistry};
use provmir_utils::{
    fs::{ensure_dir_exists, file_exists},
    hash::content_digest,
};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::{
    error::{MirrorError, Result},
    index::{ProviderIndex, VersionIndex},
    layout::WorkDirLayout,
};

/// Synchronizes one provider version.
///
/// Loads the local indexes, marks the version as seen, fetches every target
/// artifact that is not already mirrored, and persists the updated indexes
/// once all artifact tasks have completed. Fan-out is one task per artifact,
/// bounded by `parallel_limit` permits.
///
/// An artifact is skipped only when its file is present on disk AND the
/// file's content digest is already recorded for that platform; either
/// condition failing forces a fetch. The digest of a fetched archive is
/// computed locally rather than trusted from the registry, so a partial or
/// corrupted transfer is never recorded as complete.
///
/// The first task failure aborts the version: siblings stop opening new
/// transfers, the error is returned to the caller, and neither index is
/// persisted. An archive that was downloaded but not recorded is picked up
/// again by the digest check on the next run.
pub async fn sync_version<R>(
    registry: &Arc<R>,
    layout: &WorkDirLayout,
    source: &str,
    version: &str,
    artifacts: Vec<ArtifactMetadata>,
    parallel_limit: usize,
) -> Result<()>
where
    R: ProviderRegistry + 'static,
{
    let provider_dir = layout.provider_dir(source);
    ensure_dir_exists(&provider_dir)?;

    let version_index_path = layout.version_index_path(source, version);
    let provider_index_path = layout.provider_index_path(source);

    let version_index = VersionIndex::load(&version_index_path)?;
    let mut provider_index = ProviderIndex::load(&provider_index_path)?;
    provider_index.mark_seen(version);

    let version_index = Arc::new(Mutex::new(version_index));
    let semaphore = Arc::new(Semaphore::new(parallel_limit));
    let aborted = Arc::new(AtomicBool::new(false));

    let mut handles = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let permit = semaphore.clone().acquire_owned().await.unwrap();
        let registry = Arc::clone(registry);
        let version_index = Arc::clone(&version_index);
        let aborted = Arc::clone(&aborted);
        let archive_path = layout.archive_path(source, &artifact.filename);

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let result =
                sync_artifact(registry.as_ref(), &artifact, &archive_path, &version_index, &aborted);
            if result.is_err() {
                aborted.store(true, Ordering::Relaxed);
            }
            result
        });
        handles.push(handle);
    }

    let mut first_err: Option<MirrorError> = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
            Err(err) => {
                if first_err.is_none() {
                    first_err = Some(MirrorError::Task(err.to_string()));
                }
            }
        }
    }
    if let Some(err) = first_err {
        return Err(err);
    }

    version_index.lock().unwrap().persist(&version_index_path)?;
    provider_index.persist(&provider_index_path)?;

    info!(provider = source, version, "version synchronized");
    Ok(())
}

fn sync_artifact<R>(
    registry: &R,
    artifact: &ArtifactMetadata,
    archive_path: &Path,
    version_index: &Mutex<VersionIndex>,
    aborted: &AtomicBool,
) -> Result<()>
where
    R: ProviderRegistry + ?Sized,
{
    let platform = artifact.platform();
    let platform_key = platform.key();

    if file_exists(archive_path)? {
        let digest = content_digest(archive_path)?;
        let index = version_index.lock().unwrap();
        if index.has_digest(&platform_key, &digest) {
            debug!(platform = %platform, file = %artifact.filename, "already mirrored, skipping download");
            return Ok(());
        }
    }

    if aborted.load(Ordering::Relaxed) {
        debug!(platform = %platform, "sibling task failed, not starting transfer");
        return Ok(());
    }

    registry.fetch_artifact(artifact, archive_path)?;
    let digest = content_digest(archive_path)?;

    let mut index = version_index.lock().unwrap();
    index.record_digest(&platform_key, &digest, &artifact.filename);
    info!(platform = %platform, file = %artifact.filename, "artifact mirrored");

    Ok(())
}
