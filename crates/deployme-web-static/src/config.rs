//! Site configuration file (site.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use deployme_web_ui::links::PREVIEW_IMAGE;
use deployme_web_ui::shell::{DEFAULT_DESCRIPTION, DEFAULT_LOCALE, DEFAULT_TITLE};
use deployme_web_ui::{SiteMeta, Theme, ThemeError};
use serde::Deserialize;

use crate::builder::BuildConfig;

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub theme: ThemeSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub dev: DevSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    /// Social preview image
    #[serde(default = "default_image")]
    pub image: String,
    /// Open Graph locale
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Link prefix; an absolute URL also enables the sitemap
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_output")]
    pub output: String,
    /// Directory copied verbatim into the output
    #[serde(default = "default_public")]
    pub public: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            image: default_image(),
            locale: default_locale(),
            base_url: default_base_url(),
            output: default_output(),
            public: default_public(),
        }
    }
}

/// Color tokens merged over the built-in theme.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ThemeSection {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BuildSection {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DevSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DevSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}
fn default_image() -> String {
    PREVIEW_IMAGE.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_public() -> String {
    "public".to_string()
}
fn default_minify() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    7777
}

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid theme in {path}: {source}")]
    Theme { path: PathBuf, source: ThemeError },
}

impl SiteConfig {
    /// Load configuration from `path` if it exists, defaults otherwise.
    ///
    /// Returns an error if the file exists but is malformed or carries invalid colors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Theme(source) => ConfigError::Theme {
                path: path.to_path_buf(),
                source,
            },
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, ParseFailure> {
        let config: Self = toml::from_str(content).map_err(ParseFailure::Toml)?;
        config.theme().map_err(ParseFailure::Theme)?;
        Ok(config)
    }

    /// Built-in theme with the configured colors merged on top.
    pub fn theme(&self) -> Result<Theme, ThemeError> {
        Theme::with_colors(self.theme.colors.clone())
    }

    /// Document metadata.
    pub fn meta(&self) -> SiteMeta {
        SiteMeta {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            image: self.site.image.clone(),
            locale: self.site.locale.clone(),
            base_url: self.site.base_url.clone(),
        }
    }

    /// Public directory, relative to the config file's directory.
    pub fn public_dir(&self, config_path: &Path) -> PathBuf {
        resolve(config_path, &self.site.public)
    }

    /// Output directory, relative to the config file's directory.
    pub fn output_dir(&self, config_path: &Path) -> PathBuf {
        resolve(config_path, &self.site.output)
    }

    /// Builder settings for a config loaded from `config_path`.
    pub fn build_config(&self, config_path: &Path) -> Result<BuildConfig, ThemeError> {
        Ok(BuildConfig {
            public_dir: self.public_dir(config_path),
            output_dir: self.output_dir(config_path),
            minify: self.build.minify,
            meta: self.meta(),
            theme: self.theme()?,
        })
    }
}

#[derive(Debug)]
enum ParseFailure {
    Toml(toml::de::Error),
    Theme(ThemeError),
}

fn resolve(config_path: &Path, dir: &str) -> PathBuf {
    let dir = Path::new(dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match config_path.parent() {
        Some(parent) => parent.join(dir),
        None => dir.to_path_buf(),
    }
}

/// Configuration written by `init`.
pub const DEFAULT_CONFIG: &str = r##"# DeployMe site configuration

[site]
# Document and social preview title
title = "DeployMe"

# Social preview image, served from the public directory
image = "/imgs/ray/raycast-untitled.svg"

# Open Graph locale
locale = "en_IE"

# Base URL (for deployment). Use an absolute URL such as
# "https://deployme.example.com/" to get a sitemap.
base_url = "/"

# Output directory for the built site
output = "dist"

# Files copied into the output as is
public = "public"

[theme.colors]
super = "#1CF1CC"
prim = "#9733f5"
super-hover = "#C97BFF"
chick = "#DF38FA"

[build]
# Enable minification
minify = true

[dev]
host = "127.0.0.1"
port = 7777
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_defaults() {
        let config = SiteConfig::parse(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.site, SiteSection::default());
        assert_eq!(config.build, BuildSection::default());
        assert_eq!(config.dev, DevSection::default());
        assert_eq!(config.theme().unwrap(), Theme::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = SiteConfig::load(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.meta(), SiteMeta::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(
            &path,
            "[site]\noutput = \"public_html\"\n\n[theme.colors]\nprim = \"#123456\"\n",
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        let build = config.build_config(&path).unwrap();

        assert_eq!(config.site.title, "DeployMe");
        assert_eq!(build.output_dir, temp.path().join("public_html"));
        assert_eq!(build.public_dir, temp.path().join("public"));
        assert!(build.minify);
        assert_eq!(build.theme.color("prim"), Some("#123456"));
        assert_eq!(build.theme.color("super"), Some("#1CF1CC"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[site\ntitle = 1").unwrap();

        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_invalid_colors() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[theme.colors]\nsuper = \"teal\"\n").unwrap();

        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Theme { .. })
        ));
    }
}
