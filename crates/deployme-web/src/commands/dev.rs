//! Development server command.

use std::path::Path;

use anyhow::{Context, Result};
use deployme_web_server::{DevServer, DevServerConfig};
use deployme_web_static::SiteConfig;

/// Dev server settings from the loaded config; `port` overrides `[dev] port`.
fn server_config(
    config_path: &Path,
    site: &SiteConfig,
    port: Option<u16>,
    open: bool,
) -> Result<DevServerConfig> {
    Ok(DevServerConfig {
        config_path: config_path.to_path_buf(),
        public_dir: site.public_dir(config_path),
        port: port.unwrap_or(site.dev.port),
        host: site.dev.host.clone(),
        open,
        meta: site.meta(),
        theme: site
            .theme()
            .with_context(|| format!("Invalid theme in {}", config_path.display()))?,
    })
}

/// Run the dev server.
pub async fn run(config_path: &Path, site: &SiteConfig, port: Option<u16>, open: bool) -> Result<()> {
    let config = server_config(config_path, site, port, open)?;

    tracing::info!("Starting development server on port {}", config.port);

    DevServer::new(config).start().await?;

    Ok(())
}
