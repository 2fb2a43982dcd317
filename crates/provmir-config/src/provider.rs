use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Selects which subset of one provider's packages must exist locally.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Registry identifier of the package family, e.g. `hashicorp/random`.
    pub source: String,

    /// Versions to mirror. An empty list mirrors every remote version.
    #[serde(default)]
    pub versions: Vec<String>,

    /// Platforms to mirror. An empty list mirrors every platform the remote
    /// entry advertises.
    #[serde(default)]
    pub platforms: Vec<Platform>,
}
