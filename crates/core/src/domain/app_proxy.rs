// App-proxy models (runtime-scoped API surface)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionInfo {
    pub version: String,
    pub platform_host: String,
    pub platform_version: String,
}
