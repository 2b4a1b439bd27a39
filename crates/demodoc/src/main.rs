//! demodoc CLI - generate Vue documentation pages from component demo markdown.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use demodoc_static::Generator;
use tracing_subscriber::{fmt, EnvFilter};

mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "demodoc")]
#[command(about = "Generate Vue documentation pages from component demo markdown")]
#[command(version)]
pub struct Cli {
    /// Components to generate (defaults to every directory under the components root)
    components: Vec<String>,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = ConfigFile::load(&cli.config)?.into_generate_config();
    let generator = Generator::with_fs(config);

    let components = if cli.components.is_empty() {
        match generator.discover_components().await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("{}", e);
                Vec::new()
            }
        }
    } else {
        cli.components
    };

    if components.is_empty() {
        tracing::warn!("No components to generate");
    }

    let report = generator.run(components.as_slice()).await;

    tracing::info!(
        "Generated {}/{} components ({} files) in {}ms",
        report.succeeded(),
        report.components.len(),
        report.files_written(),
        report.duration_ms
    );
    tracing::info!("Output: {}", generator.config().output_dir.display());

    Ok(())
}
