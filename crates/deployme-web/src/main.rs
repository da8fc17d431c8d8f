//! DeployMe landing site CLI.
//!
//! Every command reads `site.toml` (or `--config`); flags only override what it says.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use deployme_web_static::SiteConfig;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::serve::PreviewTarget;

#[derive(Debug, Parser)]
#[command(name = "deployme-web")]
#[command(about = "Build, preview and develop the DeployMe landing site")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site configuration file
    #[arg(short, long, global = true, default_value = "site.toml")]
    config: PathBuf,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a default site.toml and the public image directories
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Render the site on request and reload open pages on change
    Dev {
        /// Port to listen on [default: dev.port]
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Write the static site
    Build {
        /// Output directory [default: site.output]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview a built site
    Serve {
        /// Port to listen on [default: dev.port]
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to serve [default: site.output]
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

impl Cli {
    fn log_filter(&self) -> EnvFilter {
        let level = if self.verbose { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }

    async fn run(self) -> Result<()> {
        let config_path = self.config;
        let load = || SiteConfig::load(&config_path);

        match self.command {
            Commands::Init { yes } => commands::init::run(&config_path, yes).await,
            Commands::Dev { port, no_open } => {
                commands::dev::run(&config_path, &load()?, port, !no_open).await
            }
            Commands::Build { output, no_minify } => {
                let minify = no_minify.then_some(false);
                commands::build::run(&config_path, &load()?, output, minify).await
            }
            Commands::Serve { port, dir } => {
                let target = PreviewTarget::resolve(&config_path, &load()?, port, dir);
                commands::serve::run(target).await
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt().with_env_filter(cli.log_filter()).with_target(false).init();

    cli.run().await
}
