use std::{fs::File, io, path::Path};

use provmir_config::{ClientConfig, Platform};
use tracing::debug;
use ureq::Agent;
use url::Url;

use crate::{
    error::{RegistryError, Result},
    traits::ProviderRegistry,
    types::{ArtifactMetadata, VersionCatalog},
};

/// Path prefix of the provider API on the registry host.
const PROVIDERS_PATH: &str = "v1/providers";

/// Blocking HTTP client for a provider plugin registry.
pub struct RegistryClient {
    agent: Agent,
    base_url: String,
}

impl RegistryClient {
    /// Builds a client from the configured timeout and registry host.
    ///
    /// Non-2xx statuses are surfaced as [`RegistryError::HttpStatus`] with
    /// the request URL attached rather than as transport errors.
    pub fn new(config: &ClientConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.request_timeout()))
            .http_status_as_error(false)
            .user_agent("provmir")
            .build()
            .into();

        Self {
            agent,
            base_url: format!("https://{}/{PROVIDERS_PATH}", config.registry_host()),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut resp = self
            .agent
            .get(url)
            .header("accept", "application/json")
            .call()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RegistryError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.body_mut().read_to_vec()?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ProviderRegistry for RegistryClient {
    fn list_versions(&self, source: &str) -> Result<VersionCatalog> {
        let url = format!("{}/{source}/versions", self.base_url);
        debug!(provider = source, "listing remote versions");
        self.get_json(&url)
    }

    fn package_metadata(
        &self,
        source: &str,
        version: &str,
        platform: &Platform,
    ) -> Result<ArtifactMetadata> {
        let url = format!(
            "{}/{source}/{version}/download/{}/{}",
            self.base_url, platform.os, platform.arch
        );
        debug!(provider = source, version, platform = %platform, "fetching package metadata");
        self.get_json(&url)
    }

    fn fetch_artifact(&self, artifact: &ArtifactMetadata, dest: &Path) -> Result<()> {
        Url::parse(&artifact.download_url)
            .map_err(|err| RegistryError::InvalidUrl(format!("{}: {err}", artifact.download_url)))?;

        debug!(url = %artifact.download_url, dest = %dest.display(), "downloading artifact");

        let resp = self.agent.get(&artifact.download_url).call()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RegistryError::HttpStatus {
                status: status.as_u16(),
                url: artifact.download_url.clone(),
            });
        }

        let mut reader = resp.into_body().into_reader();
        let mut file = File::create(dest).map_err(|err| {
            RegistryError::IoError {
                action: format!("creating {}", dest.display()),
                source: err,
            }
        })?;
        io::copy(&mut reader, &mut file).map_err(|err| {
            RegistryError::IoError {
                action: format!("writing {}", dest.display()),
                source: err,
            }
        })?;

        Ok(())
    }
}
