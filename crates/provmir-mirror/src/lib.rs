//! The provmir synchronization engine.
//!
//! Given a remote catalog of published package versions and the local
//! on-disk record of what has already been mirrored, the engine decides
//! which (version, platform) artifacts are missing, fetches them with a
//! bounded amount of concurrency, verifies their content identity with an
//! archive content digest, and atomically rewrites the persisted indexes so
//! a second run over the same catalog touches the network zero times.
//!
//! # Overview
//!
//! - [`resolver`] turns a provider's desired-version/platform selection
//!   (empty list = everything advertised) into concrete targets.
//! - [`sync`] is the per-version download coordinator.
//! - [`driver`] runs the sequential loop over providers and versions.
//! - [`index`] owns the persisted version/provider indexes.
//! - [`layout`] builds on-disk paths under the work directory.

pub mod driver;
pub mod error;
pub mod index;
pub mod layout;
pub mod resolver;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use driver::run;
pub use error::{MirrorError, Result};
pub use index::{ArchiveEntry, ProviderIndex, VersionIndex};
pub use layout::WorkDirLayout;
pub use resolver::{resolve_platforms, resolve_versions};
pub use sync::sync_version;
