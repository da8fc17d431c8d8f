//! Static site generator for the DeployMe landing site.
//!
//! Renders every page through the shared shell, generates the purged utility stylesheet and
//! the runtime script, and copies the public directory into the output.

pub mod assets;
pub mod builder;
pub mod config;

pub use assets::AssetPipeline;
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use config::{ConfigError, SiteConfig, DEFAULT_CONFIG};
