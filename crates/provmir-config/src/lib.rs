//! Configuration for the provmir registry mirror.
//!
//! A configuration file has a `[client]` section controlling transport and
//! layout knobs, and one `[[providers]]` block per provider to mirror:
//!
//! ```toml
//! [client]
//! timeout = 5
//! work_dir = "workdir"
//!
//! [[providers]]
//! source = "hashicorp/random"
//! versions = ["2.0.0"]
//! platforms = [{ os = "linux", arch = "amd64" }]
//! ```
//!
//! Empty `versions` or `platforms` lists select everything the remote
//! registry advertises.

pub mod config;
pub mod error;
pub mod platform;
pub mod provider;

pub use config::{generate_default_config, ClientConfig, Config};
pub use error::{ConfigError, Result};
pub use platform::Platform;
pub use provider::ProviderConfig;
