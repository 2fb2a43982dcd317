use std::fmt;

use serde::{Deserialize, Serialize};

/// An operating system / CPU architecture pair identifying a target build.
///
/// Appears both in the configuration (desired platforms) and in registry
/// responses (advertised platforms); the two are compared by equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Identity key used in persisted indexes, e.g. `linux_amd64`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
