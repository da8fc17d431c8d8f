//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use deployme_web_static::{BuildConfig, SiteConfig, StaticBuilder};

/// Resolve builder settings from the config file and command-line overrides.
fn resolve_config(
    config_path: &Path,
    site: &SiteConfig,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<BuildConfig> {
    let mut config = site
        .build_config(config_path)
        .with_context(|| format!("Invalid theme in {}", config_path.display()))?;

    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }

    Ok(config)
}

/// Run the build command.
pub async fn run(
    config_path: &Path,
    site: &SiteConfig,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let config = resolve_config(config_path, site, output, minify)?;
    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} public files in {}ms",
        result.pages,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
