use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while talking to the remote registry.
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    #[diagnostic(
        code(provmir_registry::network),
        help("Check your network connection and the registry host")
    )]
    Network(#[from] Box<ureq::Error>),

    #[error("HTTP {status}: {url}")]
    #[diagnostic(code(provmir_registry::http_status))]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    #[diagnostic(
        code(provmir_registry::invalid_url),
        help("Ensure the URL is valid and properly formatted")
    )]
    InvalidUrl(String),

    #[error(transparent)]
    #[diagnostic(
        code(provmir_registry::json),
        help("The registry response may be malformed")
    )]
    Json(#[from] serde_json::Error),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(provmir_registry::io))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl From<ureq::Error> for RegistryError {
    fn from(err: ureq::Error) -> Self {
        Self::Network(Box::new(err))
    }
}
