//! Application configuration for buildnotify.
//!
//! The optional config file lives at `./buildnotify.toml` (relative to the
//! working directory) or wherever `--config` points. Credentials are never
//! stored here: the file only names the env vars that hold them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{NotifyError, Result};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "buildnotify.toml";

// ---------------------------------------------------------------------------
// Config structs (matching buildnotify.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Webex messaging settings.
    #[serde(default)]
    pub webex: WebexConfig,

    /// Hosts used to build links in the message.
    #[serde(default)]
    pub links: LinksConfig,
}

/// `[webex]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebexConfig {
    /// Messages endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Name of the env var holding the bot token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Name of the env var holding the target room id.
    #[serde(default = "default_room_id_env")]
    pub room_id_env: String,
}

impl Default for WebexConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_env: default_token_env(),
            room_id_env: default_room_id_env(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.ciscospark.com/v1/messages".into()
}
fn default_token_env() -> String {
    "WEBEX_TOKEN".into()
}
fn default_room_id_env() -> String {
    "WEBEX_ROOM_ID".into()
}

/// `[links]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Git web host for the deploy summary link.
    #[serde(default = "default_git_host")]
    pub git_host: String,

    /// Artifact store prefix for Drone test result links.
    #[serde(default = "default_artifact_base_url")]
    pub artifact_base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            git_host: default_git_host(),
            artifact_base_url: default_artifact_base_url(),
        }
    }
}

fn default_git_host() -> String {
    "wwwin-github.cisco.com".into()
}
fn default_artifact_base_url() -> String {
    "https://engci-maven-master.cisco.com/artifactory/list/AS-release/Community".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `buildnotify.toml` from `workdir`. Returns defaults if the file does not exist.
pub fn load_config(workdir: &Path) -> Result<AppConfig> {
    let path = workdir.join(DEFAULT_CONFIG_FILE);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| NotifyError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        NotifyError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_api_url(&config.webex.api_url)?;
    tracing::debug!(?path, "loaded config file");

    Ok(config)
}

/// The messages endpoint must be an absolute http(s) URL.
fn validate_api_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| NotifyError::config(format!("invalid webex.api_url '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(NotifyError::config(format!(
            "webex.api_url must use http or https, got '{other}'"
        ))),
    }
}
