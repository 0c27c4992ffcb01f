// src/config/config_load.rs
//
// loading from config.toml

use serde::Deserialize;
use std::fs;
use thiserror::Error;

use crate::config::{AppConfig, MarqueeDef, StripDef, StyleConfig, WindowConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config.toml: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub style: StyleConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub marquee: Vec<MarqueeDef>,
    #[serde(default)]
    pub strip: Vec<StripDef>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try the executable's directory (build.rs copies
        // config.toml there), then fall back to the working directory.
        if let Some(config) = Self::load_from_exe_dir() {
            return Ok(config);
        }
        Self::load_from_working_dir()
    }

    fn load_from_exe_dir() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let config_path = exe_path.parent()?.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            toml::from_str(&content).ok()
        } else {
            None
        }
    }

    fn load_from_working_dir() -> Result<Self, ConfigError> {
        let content = fs::read_to_string("config.toml")?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
