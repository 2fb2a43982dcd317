use std::{fs, io, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{ConfigError, Result},
    provider::ProviderConfig,
};

/// Default hostname of the remote registry.
pub const DEFAULT_REGISTRY_HOST: &str = "registry.terraform.io";

const DEFAULT_CONFIG: &str = r#"# provmir configuration.
#
# `provmir sync` mirrors every provider listed below into `client.work_dir`.

[client]
# Request timeout in seconds.
timeout = 5
# Directory the mirror tree is written into.
work_dir = "workdir"
# Hostname of the remote registry.
registry_host = "registry.terraform.io"
# Maximum number of artifacts fetched in parallel per version.
parallel_limit = 4

# One [[providers]] block per provider to mirror. Empty `versions` and
# `platforms` lists mean "everything the registry advertises".
[[providers]]
source = "hashicorp/random"
versions = ["2.0.0"]
platforms = [
  { os = "linux", arch = "amd64" },
  { os = "darwin", arch = "arm64" },
]
"#;

/// Transport and layout knobs shared by every provider.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Request timeout in seconds.
    /// Default: 5
    pub timeout: Option<u64>,

    /// Directory the mirror tree is written into.
    /// Default: ./workdir
    pub work_dir: Option<String>,

    /// Hostname of the remote registry.
    /// Default: registry.terraform.io
    pub registry_host: Option<String>,

    /// Maximum number of artifacts fetched in parallel per version.
    /// Default: 4
    pub parallel_limit: Option<u32>,
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(5))
    }

    pub fn work_dir(&self) -> &str {
        self.work_dir.as_deref().unwrap_or("workdir")
    }

    pub fn registry_host(&self) -> &str {
        self.registry_host.as_deref().unwrap_or(DEFAULT_REGISTRY_HOST)
    }

    pub fn parallel_limit(&self) -> usize {
        self.parallel_limit.unwrap_or(4) as usize
    }
}

/// Application's configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Client-level settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Providers to mirror.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Config {
    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ConfigNotFound`] if the file does not exist.
    /// * [`ConfigError::TomlDeError`] if it is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ConfigError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::IoError {
                    action: format!("reading config file {}", path.display()),
                    source: err,
                }
            }
        })?;

        Ok(toml::from_str(&content)?)
    }
}

/// Writes a commented starter configuration to `path`.
///
/// Refuses to overwrite an existing file.
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|err| {
        ConfigError::IoError {
            action: format!("writing config file {}", path.display()),
            source: err,
        }
    })?;

    info!("Default configuration generated at: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [client]
            timeout = 30
            work_dir = "/var/lib/provmir"
            parallel_limit = 8

            [[providers]]
            source = "hashicorp/random"
            versions = ["2.0.0", "3.1.0"]
            platforms = [{ os = "linux", arch = "amd64" }]

            [[providers]]
            source = "hashicorp/null"
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.client.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.client.work_dir(), "/var/lib/provmir");
        assert_eq!(config.client.parallel_limit(), 8);
        assert_eq!(config.client.registry_host(), DEFAULT_REGISTRY_HOST);

        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].versions.len(), 2);
        assert_eq!(
            config.providers[0].platforms,
            vec![Platform::new("linux", "amd64")]
        );
        assert!(config.providers[1].versions.is_empty());
        assert!(config.providers[1].platforms.is_empty());
    }

    #[test]
    fn test_defaults_applied_to_empty_client() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.client.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.client.work_dir(), "workdir");
        assert_eq!(config.client.parallel_limit(), 4);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "client = [not toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlDeError(_))));
    }

    #[test]
    fn test_generated_default_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        generate_default_config(&path).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].source, "hashicorp/random");
    }

    #[test]
    fn test_generate_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# existing").unwrap();

        let result = generate_default_config(&path);
        assert!(matches!(result, Err(ConfigError::ConfigAlreadyExists)));
    }
}
