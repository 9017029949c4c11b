use crate::core::ranking::DEFAULT_MIN_GAMES;
use crate::errors::{AppError, AppResult};
use crate::models::Rules;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store")]
    pub store: String,
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_min_games")]
    pub min_games: u32,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub rules: Rules,
}

fn default_store() -> String {
    Config::store_file(StoreBackend::Sqlite)
        .to_string_lossy()
        .to_string()
}
fn default_cache_ttl() -> u64 {
    600
}
fn default_min_games() -> u32 {
    DEFAULT_MIN_GAMES
}
fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: default_store(),
            backend: StoreBackend::default(),
            cache_ttl_secs: default_cache_ttl(),
            min_games: default_min_games(),
            page_size: default_page_size(),
            rules: Rules::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory: `<home>/.mjledger`
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mjledger")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("mjledger.conf")
    }

    /// Default location of the store for a backend
    pub fn store_file(backend: StoreBackend) -> PathBuf {
        match backend {
            StoreBackend::Sqlite => Self::config_dir().join("mjledger.sqlite"),
            StoreBackend::Csv => Self::config_dir().join("mjledger.csv"),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.rules.check()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|_| AppError::ConfigSave)?;
        }
        fs::write(path, self.to_yaml()?).map_err(|_| AppError::ConfigSave)
    }

    /// Initialize the configuration file (unless in test mode) and return the
    /// configuration to use for the store.
    pub fn init_all(
        custom_store: Option<String>,
        backend: Option<StoreBackend>,
        is_test: bool,
    ) -> AppResult<Self> {
        let mut cfg = Self::load()?;

        if let Some(b) = backend.filter(|b| *b != cfg.backend) {
            cfg.backend = b;
            cfg.store = Self::store_file(b).to_string_lossy().to_string();
        }

        if let Some(path) = custom_store {
            cfg.store = path;
        }

        if !is_test {
            cfg.save_to(&Self::config_file())?;
        }

        Ok(cfg)
    }
}
