//! The persisted local catalog.
//!
//! Two JSON records live in each provider directory: `index.json` (which
//! versions have been touched by a synchronization attempt) and one
//! `<version>.json` per version (which platform artifacts have been
//! verified, keyed by `<os>_<arch>`). This module owns reading and writing
//! both; the rest of the engine only goes through these types.

use std::{collections::BTreeMap, fs, io, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{MirrorError, Result};

/// Per-platform record in a [`VersionIndex`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ArchiveEntry {
    /// Content digests verified for this platform's artifact.
    #[serde(default)]
    pub hashes: Vec<String>,

    /// Filename of the archive inside the provider directory.
    #[serde(default)]
    pub url: String,
}

/// Persisted `<version>.json`: verified archive records keyed by platform.
///
/// A platform key is present only after at least one verified download for
/// that (version, platform). Recorded digests accumulate and never shrink;
/// they are the authority for "already mirrored, skip re-download".
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct VersionIndex {
    #[serde(default)]
    pub archives: BTreeMap<String, ArchiveEntry>,
}

impl VersionIndex {
    /// Reads the index at `path`, or an empty index if the file is absent.
    ///
    /// A file that exists but does not parse is [`MirrorError::IndexParse`],
    /// never a silent reset to empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_index(path.as_ref())
    }

    /// Membership test against the digests recorded for a platform.
    ///
    /// An absent platform key is simply `false`.
    pub fn has_digest(&self, platform_key: &str, digest: &str) -> bool {
        self.archives
            .get(platform_key)
            .is_some_and(|entry| entry.hashes.iter().any(|recorded| recorded == digest))
    }

    /// Records a verified digest for a platform.
    ///
    /// Digests accumulate with set semantics; the recorded filename follows
    /// the most recently verified artifact.
    pub fn record_digest(&mut self, platform_key: &str, digest: &str, source_name: &str) {
        let entry = self.archives.entry(platform_key.to_string()).or_default();
        if !entry.hashes.iter().any(|recorded| recorded == digest) {
            entry.hashes.push(digest.to_string());
        }
        entry.url = source_name.to_string();
    }

    /// Serializes the index to `path`, replacing any previous contents.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persist_index(self, path.as_ref())
    }
}

/// Marker recorded for a version that has been processed at least once.
///
/// Serializes as an empty JSON object; room for per-version bookkeeping
/// without an index format change.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct VersionMarker {}

/// Persisted `index.json`: versions touched by at least one sync attempt.
///
/// Monotonic: versions are only ever added, even if a later run narrows the
/// platform selection for them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ProviderIndex {
    #[serde(default)]
    pub versions: BTreeMap<String, VersionMarker>,
}

impl ProviderIndex {
    /// Reads the index at `path`, or an empty index if the file is absent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_index(path.as_ref())
    }

    /// Idempotent insert of a version into the index.
    pub fn mark_seen(&mut self, version: &str) {
        self.versions.entry(version.to_string()).or_default();
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Serializes the index to `path`, replacing any previous contents.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persist_index(self, path.as_ref())
    }
}

fn load_index<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => {
            return Err(MirrorError::Io {
                action: format!("reading index {}", path.display()),
                source: err,
            })
        }
    };

    serde_json::from_slice(&bytes).map_err(|err| {
        MirrorError::IndexParse {
            path: path.to_path_buf(),
            source: err,
        }
    })
}

/// Writes through a `.part` sibling and renames it into place, so a crash
/// mid-write never leaves a half-written index behind.
fn persist_index<T: Serialize>(index: &T, path: &Path) -> Result<()> {
    let persist_err = |source: io::Error| {
        MirrorError::IndexPersist {
            path: path.to_path_buf(),
            source,
        }
    };

    let data = serde_json::to_vec_pretty(index).map_err(|err| persist_err(io::Error::other(err)))?;

    let tmp_path = format!("{}.part", path.display());
    fs::write(&tmp_path, data).map_err(persist_err)?;
    fs::rename(&tmp_path, path).map_err(persist_err)?;

    Ok(())
}
