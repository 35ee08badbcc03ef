use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use folio_schema::SocialLink;
use serde::{Deserialize, Serialize};

/// Hosted content/auth service endpoints and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub base_url: String,
    pub anon_key: String,
    /// Bearer token of a signed-in owner session, if any. Absent means the
    /// client runs anonymously.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Form-relay endpoint for contact submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub endpoint: String,
}

fn default_response_time() -> Option<String> {
    Some("Within 24 hours".to_string())
}

/// Owner profile rendered on the landing and contact pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub tagline: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_response_time")]
    pub response_time: Option<String>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    pub content: ContentConfig,
    pub relay: RelayConfig,
    pub profile: ProfileConfig,
}

pub fn load_config(path: &Path) -> Result<FolioConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: FolioConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &FolioConfig) -> Result<()> {
    if config.content.base_url.trim().is_empty() {
        bail!("content.base_url must not be empty");
    }
    if config.content.anon_key.trim().is_empty() {
        bail!("content.anon_key must not be empty");
    }
    if config.relay.endpoint.trim().is_empty() {
        bail!("relay.endpoint must not be empty");
    }
    if config.profile.name.trim().is_empty() {
        bail!("profile.name must not be empty");
    }
    Ok(())
}
