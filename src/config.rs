use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Connection settings for a Vtiger instance.
///
/// The access key is the per-user webservice secret shown in the CRM user
/// preferences. It is never sent over the wire as-is; login exchanges it for
/// a challenge digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub access_key: String,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            access_key: access_key.into(),
        }
    }

    /// Build a config from `VTIGER_HOST`, `VTIGER_USERNAME` and
    /// `VTIGER_ACCESS_KEY`, reading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("VTIGER_HOST").context("VTIGER_HOST is not set")?;
        let username = std::env::var("VTIGER_USERNAME").context("VTIGER_USERNAME is not set")?;
        let access_key =
            std::env::var("VTIGER_ACCESS_KEY").context("VTIGER_ACCESS_KEY is not set")?;

        Ok(Self {
            base_url,
            username,
            access_key,
        })
    }
}
