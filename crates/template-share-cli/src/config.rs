use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use template_share_remote::ServerConfig;

/// Everything the CLI persists between runs: the server configuration
/// (including the one-shot advisory flag) and optional location overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the File-template database lives; defaults under the user
    /// data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Where live-template group files live; defaults under the user
    /// config directory.
    #[serde(default)]
    pub live_templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerConfig,
}

impl CliConfig {
    pub fn store_path(&self) -> Option<PathBuf> {
        let base = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()?.join("template-share"),
        };
        Some(base.join("templates.db"))
    }

    pub fn live_dir(&self) -> Option<PathBuf> {
        match &self.live_templates_dir {
            Some(dir) => Some(dir.clone()),
            None => Some(dirs::config_dir()?.join("template-share").join("templates")),
        }
    }
}

/// Config file path: `~/.config/template-share/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("template-share").join("config.toml"))
}

/// Load config from file, falling back to the built-in defaults (the
/// public read-only server) when missing or unreadable.
pub fn load() -> CliConfig {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(config) = toml::from_str::<CliConfig>(&contents) {
            return config;
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    CliConfig::default()
}

pub fn save(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()
        .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;
    Ok(())
}
