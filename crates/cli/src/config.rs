//! Auth-context file (`~/.cfconfig`)
//!
//! ```yaml
//! contexts:
//!   prod:
//!     name: prod
//!     type: APIKey
//!     url: https://g.codefresh.io
//!     token: <api-key>
//! current-context: prod
//! ```

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".cfconfig";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CfConfig {
    #[serde(default)]
    pub contexts: BTreeMap<String, AuthContext>,
    #[serde(rename = "current-context", default)]
    pub current_context: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthContext {
    #[serde(default)]
    pub name: String,
    pub url: String,
    pub token: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl CfConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .build()
            .with_context(|| format!("failed to read auth contexts from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid auth-context file {}", path.display()))
    }

    /// Context `name`, or `current-context` when no name is given
    ///
    /// Names are matched exactly first, then ignoring ASCII case.
    pub fn context(&self, name: Option<&str>) -> Result<&AuthContext> {
        let Some(name) = name.or(self.current_context.as_deref()) else {
            bail!("no context selected and current-context is not set");
        };

        self.contexts
            .get(name)
            .or_else(|| {
                self.contexts
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, ctx)| ctx)
            })
            .ok_or_else(|| anyhow!("context '{}' not found", name))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_FILE))
}

/// Endpoint and API key the client is built with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub token: String,
}

/// Merge flag/env overrides with the selected auth context
///
/// When both `url` and `token` are given the file is not read at all.
pub fn resolve_credentials(
    url: Option<String>,
    token: Option<String>,
    config_path: Option<&Path>,
    context: Option<&str>,
) -> Result<Credentials> {
    if let (Some(url), Some(token)) = (&url, &token) {
        return Ok(Credentials {
            url: url.clone(),
            token: token.clone(),
        });
    }

    let path = config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .ok_or_else(|| anyhow!("cannot locate the home directory, pass --cfconfig"))?;

    let cfg = CfConfig::load(&path)?;
    let selected = cfg.context(context)?;
    tracing::debug!(context = %selected.name, path = %path.display(), "Using auth context");

    Ok(Credentials {
        url: url.unwrap_or_else(|| selected.url.clone()),
        token: token.unwrap_or_else(|| selected.token.clone()),
    })
}
