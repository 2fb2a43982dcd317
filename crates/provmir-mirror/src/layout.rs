use std::path::{Path, PathBuf};

/// On-disk layout of the mirror tree.
///
/// Every provider lives under `<work_dir>/<registry_host>/<source>/`, which
/// holds `index.json`, one `<version>.json` per synchronized version, and
/// the downloaded archive files themselves.
#[derive(Clone, Debug)]
pub struct WorkDirLayout {
    root: PathBuf,
}

impl WorkDirLayout {
    pub fn new(work_dir: impl AsRef<Path>, registry_host: &str) -> Self {
        Self {
            root: work_dir.as_ref().join(registry_host),
        }
    }

    pub fn provider_dir(&self, source: &str) -> PathBuf {
        self.root.join(source)
    }

    pub fn provider_index_path(&self, source: &str) -> PathBuf {
        self.provider_dir(source).join("index.json")
    }

    pub fn version_index_path(&self, source: &str, version: &str) -> PathBuf {
        self.provider_dir(source).join(format!("{version}.json"))
    }

    pub fn archive_path(&self, source: &str, filename: &str) -> PathBuf {
        self.provider_dir(source).join(filename)
    }
}
