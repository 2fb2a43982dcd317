//! Registry access for the provmir mirror.
//!
//! This crate provides the wire types returned by a provider plugin
//! registry and a blocking HTTP client for its two read operations:
//! listing the versions published for a provider, and fetching the
//! per-(version, platform) package metadata that drives a download.
//!
//! The [`ProviderRegistry`] trait is the seam between the synchronization
//! engine and the transport; [`RegistryClient`] is its HTTP implementation.

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::RegistryClient;
pub use error::{RegistryError, Result};
pub use traits::ProviderRegistry;
pub use types::{ArtifactMetadata, GpgPublicKey, SigningKeys, VersionCatalog, VersionEntry};
