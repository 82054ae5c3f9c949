use circle_core::EngineConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "WORKBENCH_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    pub listen: SocketAddr,
    /// Directory with the canvas front end, served at `/` when set.
    pub static_dir: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
            engine: EngineConfig::default(),
        }
    }
}

impl WorkbenchConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: WorkbenchConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.engine.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Load from the file named by `WORKBENCH_CONFIG`, or fall back to defaults.
    pub fn load() -> Result<Self, String> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {}: {}", path, e))?;
                Self::from_json(&json)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
