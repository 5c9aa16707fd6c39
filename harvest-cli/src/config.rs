use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::ConfigBuilder;
use harvest::{HarvestCredentials, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECS: i64 = 30;

#[derive(Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub token: String,
    /// Base URL of the Harvest API, e.g. "https://api.harvestapp.com/v2"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS as u64
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            token: String::new(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("account_id", &self.account_id)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load `.env` and then `.env.local` into the process environment, if present.
pub fn load_dotenv() {
    dotenvy::from_filename(".env").ok();
    dotenvy::from_filename_override(".env.local").ok();
}

impl HarvestConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("harvest-cli")
            .join("config.toml"))
    }

    /// Defaults, then the config file, then `HARVEST_*` environment variables, then overrides.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::load_from(&Self::config_path()?, overrides)
    }

    pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Self> {
        let builder = Self::file_layer(path)?
            .add_source(config::Environment::with_prefix("HARVEST").prefix_separator("_"))
            .set_override_option("api_url", overrides.api_url.clone())?
            .set_override_option(
                "timeout_secs",
                overrides.timeout_secs.map(|secs| secs as i64),
            )?;
        Self::build(builder, path)
    }

    /// What is stored in the file itself, without environment or command line values.
    /// `config init` starts from this so it never persists values that came from elsewhere.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::build(Self::file_layer(path)?, path)
    }

    /// Like [`HarvestConfig::load_file`], but an unreadable file is logged and replaced by
    /// the defaults.
    pub fn load_file_or_default(path: &Path) -> Self {
        Self::load_file(path).unwrap_or_else(|err| {
            tracing::warn!("Ignoring existing config: {err:#}");
            Self::default()
        })
    }

    fn file_layer(path: &Path) -> Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(config::File::from(path.to_path_buf()).required(false)))
    }

    fn build(builder: ConfigBuilder<DefaultState>, path: &Path) -> Result<Self> {
        let settings = builder
            .build()
            .with_context(|| format!("Failed to read config at {}", path.display()))?;

        settings
            .try_deserialize::<Self>()
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn credentials(&self) -> Result<HarvestCredentials> {
        HarvestCredentials::new(&self.token, &self.account_id).context(
            "Harvest credentials missing. Run `harvest config init` or set HARVEST_TOKEN and HARVEST_ACCOUNT_ID",
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
