use provmir_config::Platform;
use serde::{Deserialize, Serialize};

/// GPG public key the registry advertises for shasums signing.
///
/// Carried through for consumers that verify signatures; provmir records it
/// but performs no validation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GpgPublicKey {
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub ascii_armor: String,
    #[serde(default)]
    pub trust_signature: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_url: String,
}

/// Signing keys attached to a package's metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SigningKeys {
    #[serde(default)]
    pub gpg_public_keys: Vec<GpgPublicKey>,
}

/// One published version together with the platforms it is built for.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VersionEntry {
    pub version: String,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl VersionEntry {
    /// Whether the remote publishes this version for `platform`.
    pub fn supports(&self, platform: &Platform) -> bool {
        self.platforms.contains(platform)
    }
}

/// Response of the registry's "list versions" call for one provider.
///
/// Immutable once fetched; the driver fetches it once per provider per run.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VersionCatalog {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
    #[serde(default)]
    pub warnings: Option<String>,
}

/// Everything needed to transfer one (version, platform) artifact.
///
/// Fetched fresh each run and never persisted as-is.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub protocols: Vec<String>,
    pub os: String,
    pub arch: String,
    pub filename: String,
    pub download_url: String,
    #[serde(default)]
    pub shasums_url: String,
    #[serde(default)]
    pub shasums_signature_url: String,
    #[serde(default)]
    pub shasum: String,
    #[serde(default)]
    pub signing_keys: SigningKeys,
}

impl ArtifactMetadata {
    pub fn platform(&self) -> Platform {
        Platform::new(&self.os, &self.arch)
    }
}
