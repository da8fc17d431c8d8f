//! Static site builder.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use deployme_web_ui::links::STATIC_ASSETS;
use deployme_web_ui::{NavBar, Page, PageProps, PageShell, Site, SiteMeta, Theme};

use crate::assets::AssetPipeline;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory copied into the output as is
    pub public_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Document metadata
    pub meta: SiteMeta,

    /// Color tokens for the utility classes
    pub theme: Theme,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            meta: SiteMeta::default(),
            theme: Theme::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of public files copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read public files: {0}")]
    ReadError(String),

    #[error("Failed to render {page}: {message}")]
    RenderError { page: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    site: Site,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let site = Site::new(PageShell::new(config.meta.clone()));
        Self { config, site }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // Render and write pages in parallel
        let documents: Vec<Result<String, BuildError>> = self
            .site
            .pages()
            .par_iter()
            .map(|page| self.build_page(page.as_ref()))
            .collect();

        let mut used_classes = BTreeSet::new();
        let mut total_pages = 0;

        for document in documents {
            AssetPipeline::collect_classes(&document?, &mut used_classes);
            total_pages += 1;
        }

        // Generate assets
        self.generate_assets(&mut used_classes).await?;

        // Copy public files
        let assets = self.copy_public()?;
        self.check_static_assets();

        // Generate sitemap
        self.generate_sitemap().await?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: total_pages,
            assets,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render a single page and write it out.
    fn build_page(&self, page: &dyn Page) -> Result<String, BuildError> {
        let html = self
            .site
            .render(page, &NavBar::default(), &PageProps::new())
            .map_err(|e| BuildError::RenderError {
                page: page.route().to_string(),
                message: e.to_string(),
            })?;

        let output_path = self.config.output_dir.join(page.output_file());

        // Ensure output directory exists
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, &html).map_err(|e| BuildError::WriteError(e.to_string()))?;
        tracing::debug!("Wrote {}", output_path.display());

        Ok(html)
    }

    /// Generate the stylesheet and runtime script.
    async fn generate_assets(&self, used_classes: &mut BTreeSet<String>) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        tokio::fs::create_dir_all(&assets_dir)
            .await
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        // The menu panel is mounted by script, so its classes are not in any page.
        let menu_panel = self
            .site
            .menu_panel()
            .map_err(|e| BuildError::RenderError {
                page: "mobile menu".to_string(),
                message: e.to_string(),
            })?;
        AssetPipeline::collect_classes(&menu_panel, used_classes);

        let css = AssetPipeline::generate_css(&self.config.theme, Some(used_classes));
        let css = if self.config.minify {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Skipping CSS minification: {}", e);
                    css
                }
            }
        } else {
            css
        };
        tokio::fs::write(assets_dir.join("main.css"), css)
            .await
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let js = AssetPipeline::generate_js(&menu_panel);
        tokio::fs::write(assets_dir.join("main.js"), js)
            .await
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy the public directory into the output. Returns the number of files copied.
    fn copy_public(&self) -> Result<usize, BuildError> {
        let public_dir = &self.config.public_dir;

        if !public_dir.exists() {
            tracing::warn!("Public directory not found: {}", public_dir.display());
            return Ok(0);
        }

        let mut copied = 0;

        for entry in WalkDir::new(public_dir).follow_links(true) {
            let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(public_dir).unwrap_or(path);
            let target = self.config.output_dir.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::copy(path, &target).map_err(|e| {
                BuildError::WriteError(format!("{}: {}", target.display(), e))
            })?;
            copied += 1;
        }

        tracing::info!("Copied {} public files from {}", copied, public_dir.display());
        Ok(copied)
    }

    /// Warn about referenced static files missing from the output.
    fn check_static_assets(&self) {
        for asset in STATIC_ASSETS {
            let path = self.config.output_dir.join(asset.trim_start_matches('/'));
            if !path.exists() {
                tracing::warn!("Static asset not found: {} (expected at {})", asset, path.display());
            }
        }
    }

    /// Generate sitemap and robots.txt.
    ///
    /// Sitemaps need absolute URLs, so without an absolute base URL only robots.txt is written.
    async fn generate_sitemap(&self) -> Result<(), BuildError> {
        let base_url = &self.config.meta.base_url;

        if !is_absolute_url(base_url) {
            tracing::warn!(
                "Skipping sitemap: base_url '{}' is not an absolute http(s) URL",
                base_url
            );
            return write_file(
                &self.config.output_dir.join("robots.txt"),
                "User-agent: *\nAllow: /\n".to_string(),
            )
            .await;
        }

        let base = base_url.trim_end_matches('/');

        let urls: Vec<String> = self
            .site
            .pages()
            .iter()
            .filter(|page| page.indexable())
            .map(|page| format!("  <url>\n    <loc>{}{}</loc>\n  </url>", base, page.route()))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), sitemap).await?;

        let robots = format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml\n", base);
        write_file(&self.config.output_dir.join("robots.txt"), robots).await
    }
}

fn is_absolute_url(url: &str) -> bool {
    ["https://", "http://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

async fn write_file(path: &Path, content: String) -> Result<(), BuildError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_public(public: &Path) {
        for asset in STATIC_ASSETS {
            let path = public.join(asset.trim_start_matches('/'));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        }
    }

    #[tokio::test]
    async fn builds_landing_site() {
        let temp = tempdir().unwrap();
        let public = temp.path().join("public");
        let out = temp.path().join("dist");
        write_public(&public);

        let builder = StaticBuilder::new(BuildConfig {
            public_dir: public,
            output_dir: out.clone(),
            ..Default::default()
        });
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.assets, 2);
        assert!(out.join("index.html").exists());
        assert!(out.join("404.html").exists());
        assert!(out.join("imgs/ray/raycast-untitled.svg").exists());
        assert!(out.join("imgs/ai-product-hack/itmo.svg").exists());

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("<title>DeployMe</title>"));
        assert!(!index.contains(r#"id="mobile-menu""#));
    }

    #[tokio::test]
    async fn generates_purged_stylesheet_and_runtime_script() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = StaticBuilder::new(BuildConfig {
            public_dir: temp.path().join("public"),
            output_dir: out.clone(),
            minify: false,
            ..Default::default()
        });
        builder.build().await.unwrap();

        let css = fs::read_to_string(out.join("assets/main.css")).unwrap();
        assert!(css.contains(".bg-prim { background-color: #9733f5; }"));
        assert!(css.contains(r".hover\:bg-super-hover:hover"));
        // Only used by the script-mounted menu panel.
        assert!(css.contains(".border-t {"));
        assert!(!css.contains(".border-super {"));

        let js = fs::read_to_string(out.join("assets/main.js")).unwrap();
        assert!(js.contains(r#"id=\"mobile-menu\""#));
    }

    #[tokio::test]
    async fn minifies_stylesheet() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(BuildConfig {
            public_dir: temp.path().join("public"),
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        let css = fs::read_to_string(out.join("assets/main.css")).unwrap();
        assert!(!css.contains('\n'));
        assert!(css.contains(".bg-prim"));
    }

    #[tokio::test]
    async fn builds_without_public_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(BuildConfig {
            public_dir: temp.path().join("missing"),
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.assets, 0);
        assert!(out.join("index.html").exists());
    }

    #[tokio::test]
    async fn sitemap_lists_indexable_pages() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(BuildConfig {
            public_dir: temp.path().join("public"),
            output_dir: out.clone(),
            meta: SiteMeta {
                base_url: "https://deployme.example.com/".to_string(),
                ..SiteMeta::default()
            },
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://deployme.example.com/</loc>"));
        assert!(!sitemap.contains("404"));

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://deployme.example.com/sitemap.xml"));
    }

    #[tokio::test]
    async fn skips_sitemap_for_relative_base_url() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(BuildConfig {
            public_dir: temp.path().join("public"),
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert!(!out.join("sitemap.xml").exists());
        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(!robots.contains("Sitemap:"));
    }

    #[test]
    fn recognizes_absolute_urls() {
        assert!(is_absolute_url("https://deployme.example.com/"));
        assert!(is_absolute_url("http://localhost:4000"));
        assert!(!is_absolute_url("/"));
        assert!(!is_absolute_url("/deployme/"));
        assert!(!is_absolute_url("https://"));
    }
}
