//! In-memory registry double and zip fixtures shared by the engine tests.

use std::{
    collections::HashMap,
    io::{Cursor, Write},
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use provmir_config::Platform;
use provmir_registry::{
    ArtifactMetadata, ProviderRegistry, RegistryError, VersionCatalog, VersionEntry,
};

pub(crate) fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut archive = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::<()>::default();
    for (name, contents) in entries {
        archive.start_file(*name, options).unwrap();
        archive.write_all(contents).unwrap();
    }
    archive.finish().unwrap().into_inner()
}

pub(crate) fn catalog_entry(version: &str, platforms: &[Platform]) -> VersionEntry {
    VersionEntry {
        version: version.to_string(),
        protocols: vec!["5.0".to_string()],
        platforms: platforms.to_vec(),
    }
}

/// Serves a fixed catalog and canned archive payloads, counting every call.
///
/// Artifacts without a registered payload come back as HTTP 404, which
/// doubles as the failure injection for abort tests.
pub(crate) struct MockRegistry {
    pub catalog: VersionCatalog,
    pub payloads: HashMap<String, Vec<u8>>,
    pub list_calls: AtomicUsize,
    pub metadata_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new(versions: Vec<VersionEntry>) -> Self {
        Self {
            catalog: VersionCatalog {
                id: String::new(),
                versions,
                warnings: None,
            },
            payloads: HashMap::new(),
            list_calls: AtomicUsize::new(0),
            metadata_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_payload(mut self, filename: &str, bytes: Vec<u8>) -> Self {
        self.payloads.insert(filename.to_string(), bytes);
        self
    }

    pub fn artifact_name(version: &str, platform: &Platform) -> String {
        format!("provider_{version}_{}.zip", platform.key())
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn metadata_fetches(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

impl ProviderRegistry for MockRegistry {
    fn list_versions(&self, _source: &str) -> Result<VersionCatalog, RegistryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.catalog.clone())
    }

    fn package_metadata(
        &self,
        _source: &str,
        version: &str,
        platform: &Platform,
    ) -> Result<ArtifactMetadata, RegistryError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        let filename = Self::artifact_name(version, platform);
        Ok(ArtifactMetadata {
            protocols: vec!["5.0".to_string()],
            os: platform.os.clone(),
            arch: platform.arch.clone(),
            download_url: format!("https://releases.example.com/{filename}"),
            shasums_url: String::new(),
            shasums_signature_url: String::new(),
            shasum: String::new(),
            signing_keys: Default::default(),
            filename,
        })
    }

    fn fetch_artifact(
        &self,
        artifact: &ArtifactMetadata,
        dest: &Path,
    ) -> Result<(), RegistryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.payloads.get(&artifact.filename) {
            Some(bytes) => {
                std::fs::write(dest, bytes).unwrap();
                Ok(())
            }
            None => {
                Err(RegistryError::HttpStatus {
                    status: 404,
                    url: artifact.download_url.clone(),
                })
            }
        }
    }
}
