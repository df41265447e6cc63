use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::query::{DEFAULT_VARIATION_COUNT, GOOGLE_SEARCH_URL, MAX_VARIATION_COUNT};

const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Months generated per historical sweep
    #[serde(default = "default_variation_count")]
    pub variation_count: usize,

    /// Search endpoint receiving `?q=<query>`
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Pins "now" for date resolution (YYYY-MM-DD)
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variation_count: DEFAULT_VARIATION_COUNT,
            search_url: GOOGLE_SEARCH_URL.to_string(),
            reference_date: None,
            base_path: PathBuf::new(),
        }
    }
}

fn default_variation_count() -> usize {
    DEFAULT_VARIATION_COUNT
}

fn default_search_url() -> String {
    GOOGLE_SEARCH_URL.to_string()
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.variation_count == 0 {
            bail!("variation_count must be greater than 0");
        }

        if self.variation_count > MAX_VARIATION_COUNT {
            bail!(
                "variation_count must be at most {MAX_VARIATION_COUNT}, got {}",
                self.variation_count
            );
        }

        Url::parse(&self.search_url)
            .with_context(|| format!("search_url is not a valid url: {}", self.search_url))?;

        Ok(())
    }

    /// Load `config.yaml` from `base_path`, writing defaults when missing.
    pub fn load_with(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref();
        let path = base_path.join(CONFIG_FILE);

        // create new if does not exist
        if !path.exists() {
            std::fs::create_dir_all(base_path)
                .with_context(|| format!("failed to create {}", base_path.display()))?;
            let defaults = serde_yml::to_string(&Self::default())?;
            std::fs::write(&path, defaults)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("created default config at {}", path.display());
        }

        let config_str = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = serde_yml::from_str(&config_str)
            .with_context(|| format!("config is malformed: {}", path.display()))?;

        config.base_path = base_path.to_path_buf();
        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = self.base_path.join(CONFIG_FILE);
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(&path, config_str)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}
