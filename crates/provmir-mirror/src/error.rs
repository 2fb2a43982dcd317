use std::path::PathBuf;

use miette::Diagnostic;
use provmir_config::ConfigError;
use provmir_registry::RegistryError;
use provmir_utils::error::{FileSystemError, HashError};
use thiserror::Error;

/// Errors that abort a synchronization run.
///
/// Every variant is fatal: there is no retry policy and no partial-success
/// continuation. A missing local index file is not an error (the store
/// starts from empty); everything else surfaces here.
#[derive(Error, Diagnostic, Debug)]
pub enum MirrorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(
        code(provmir_mirror::digest),
        help("The archive may be corrupt; delete it and re-run the sync")
    )]
    Digest(#[from] HashError),

    #[error(transparent)]
    #[diagnostic(code(provmir_mirror::fs))]
    FileSystem(#[from] FileSystemError),

    #[error("Malformed index file `{}`: {source}", .path.display())]
    #[diagnostic(
        code(provmir_mirror::index_parse),
        help("The index was corrupted on disk; restore it or remove it to start over")
    )]
    IndexParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to persist index `{}`: {source}", .path.display())]
    #[diagnostic(
        code(provmir_mirror::index_persist),
        help("Check file permissions and disk space")
    )]
    IndexPersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(provmir_mirror::io))]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Download task failed: {0}")]
    #[diagnostic(code(provmir_mirror::task))]
    Task(String),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
