//! Initialize a site configuration in the current project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use deployme_web_static::{SiteConfig, DEFAULT_CONFIG};
use deployme_web_ui::links::STATIC_ASSETS;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing DeployMe site...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    // Create the directories the page's images are served from
    let public_dir = SiteConfig::default().public_dir(config_path);
    for asset in STATIC_ASSETS {
        let path = public_dir.join(asset.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        if !path.exists() {
            tracing::info!("Add {} to {}", asset, path.display());
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'deployme-web dev' to start the development server.");

    Ok(())
}
