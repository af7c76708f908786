// src/simulation/config.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How to reach the external simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Executable that runs one simulation per invocation.
    pub command: String,
    pub args: Vec<String>,
    /// Reported by `GET /health`.
    pub version: String,
    /// Passed through to the engine's own logging switch.
    pub logging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            args: vec!["supplynet_engine.py".to_string()],
            version: "0.1.5".to_string(),
            logging: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub engine: EngineConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Reads a TOML file. Keys left out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
