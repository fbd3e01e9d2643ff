use anyhow::{Result, bail};
use template_share_remote::ServerConfig;

use crate::config::{self, CliConfig};

pub fn show(config: &CliConfig) -> Result<()> {
    println!("Server URL: {}", config.server.server_url);
    println!("API key:    {}", mask(&config.server.api_key));
    if config.server.is_default() {
        println!("Using the shared public server (read-only).");
    }
    if let Some(path) = config::config_path() {
        println!("Config:     {}", path.display());
    }
    Ok(())
}

pub fn set(
    config: &mut CliConfig,
    server_url: Option<String>,
    api_key: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        config.server = ServerConfig::default();
        config::save(config)?;
        println!("Reset to the shared public server (read-only).");
        return Ok(());
    }

    if server_url.is_none() && api_key.is_none() {
        bail!("pass --server-url and/or --api-key, or --reset");
    }

    let server_url = server_url.unwrap_or_else(|| config.server.server_url.clone());
    let api_key = api_key.unwrap_or_else(|| config.server.api_key.clone());
    config.server.update(server_url, api_key);
    config.server.validate()?;
    config::save(config)?;
    println!("Server configuration updated.");
    Ok(())
}

fn mask(key: &str) -> String {
    if key.chars().count() <= 4 {
        "****".to_owned()
    } else {
        let prefix: String = key.chars().take(4).collect();
        format!("{prefix}****")
    }
}
