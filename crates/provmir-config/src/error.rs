use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Configuration file `{}` not found", .path.display())]
    #[diagnostic(
        code(provmir_config::not_found),
        help("Run `provmir def-config` to generate a starter configuration")
    )]
    ConfigNotFound { path: PathBuf },

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(provmir_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(provmir_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(provmir_config::io))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
