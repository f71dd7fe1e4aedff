mod config;
mod generate;
mod partition;
mod product;
mod store;
mod web;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};

use config::SiteConfig;
use web::TeraRenderer;

#[derive(Parser)]
#[command(name = "generate-web", about = "Render the dealz pages from scraped product data")]
struct Cli {
    /// Directory that contains scraped data files (records are read from <data-dir>/raw)
    #[arg(long, env = "DEALZ_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,
    /// Directory to write rendered HTML to
    #[arg(long, env = "DEALZ_OUTPUT_DIR", default_value = "docs")]
    output_dir: PathBuf,
    /// Prefix for page link URLs (for pages hosted at a subpath); should start with '/'
    #[arg(long, env = "DEALZ_PATH_PREFIX", default_value = "")]
    path_prefix: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = SiteConfig::new(cli.data_dir, cli.output_dir, &cli.path_prefix);

    let result = TeraRenderer::new()
        .and_then(|renderer| generate::run(&config, &renderer, Utc::now()));

    match result {
        Ok(_) => {
            info!(
                "Wrote site to {} in {:.1}s",
                config.output_dir.display(),
                t0.elapsed().as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
