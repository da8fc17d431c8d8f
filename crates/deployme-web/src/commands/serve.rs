//! Preview server for a built site.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use deployme_web_static::SiteConfig;
use tower_http::services::{ServeDir, ServeFile};

/// Where the preview listens and what it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
    pub host: String,
    pub port: u16,
    pub dir: PathBuf,
}

impl PreviewTarget {
    /// Flags win; otherwise listen like the dev server and serve the build output directory.
    pub fn resolve(
        config_path: &Path,
        site: &SiteConfig,
        port: Option<u16>,
        dir: Option<PathBuf>,
    ) -> Self {
        Self {
            host: site.dev.host.clone(),
            port: port.unwrap_or(site.dev.port),
            dir: dir.unwrap_or_else(|| site.output_dir(config_path)),
        }
    }

    fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Built files, with the generated not-found page for everything else.
fn preview_app(dir: &Path) -> Router {
    let not_found = ServeFile::new(dir.join("404.html"));
    Router::new().fallback_service(ServeDir::new(dir).not_found_service(not_found))
}

/// Run the serve command.
pub async fn run(target: PreviewTarget) -> Result<()> {
    if !target.dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'deployme-web build' first.",
            target.dir.display()
        );
    }

    let addr = target.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving {} at http://{}", target.dir.display(), addr);

    if let Err(e) = open::that(format!("http://{}", addr)) {
        tracing::warn!("Could not open browser: {}", e);
    }

    axum::serve(listener, preview_app(&target.dir)).await?;

    Ok(())
}
