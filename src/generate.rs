use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::{
    SiteConfig, DISCOUNT_PAGE, DISCOUNT_TITLE, HOME_PAGE, OTHER_PAGE, OTHER_TITLE,
};
use crate::partition::partition;
use crate::product::PricedProduct;
use crate::store;
use crate::web::{render_to_file, BaseContext, DealzContext, Page, Renderer};

/// Per-page product counts of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateStats {
    pub loaded: usize,
    pub discounted: usize,
    pub other: usize,
}

/// Load, partition and render all three pages. Stops at the first failure.
pub fn run(
    config: &SiteConfig,
    renderer: &dyn Renderer,
    last_updated: DateTime<Utc>,
) -> Result<GenerateStats> {
    create_output_dir(&config.output_dir)?;

    let records = load_records(&config.raw_dir())?;
    let loaded = records.len();
    let products = partition(records);

    let base = BaseContext {
        path_prefix: config.path_prefix.clone(),
    };

    render_to_file(
        &config.output_dir,
        HOME_PAGE,
        renderer,
        &Page::Home(base.clone()),
    )?;

    let stats = GenerateStats {
        loaded,
        discounted: products.discounted.len(),
        other: products.other.len(),
    };

    let pages = [
        (DISCOUNT_PAGE, DISCOUNT_TITLE, products.discounted),
        (OTHER_PAGE, OTHER_TITLE, products.other),
    ];
    for (filename, title, products) in pages {
        let page = Page::Dealz(DealzContext {
            base: base.clone(),
            title: title.to_string(),
            last_updated,
            products,
        });
        let path = render_to_file(&config.output_dir, filename, renderer, &page)?;
        debug!(prefix = %page.base().path_prefix, "Wrote {}", path.display());
    }

    info!(
        "Rendered {} records: {} discounted, {} other",
        stats.loaded, stats.discounted, stats.other
    );
    Ok(stats)
}

/// A missing data dir means no deals; anything else is fatal.
fn load_records(dir: &Path) -> Result<Vec<PricedProduct>> {
    let records = match store::load_from_dir(dir) {
        Ok(records) => records,
        Err(e) if e.is_not_found() => {
            warn!("data dir {:?} does not exist, assuming no deals...", dir);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    for r in &records {
        info!(percentage = r.percentage.value(), product = ?r.product, "loaded");
    }
    Ok(records)
}

fn create_output_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o775);
    }
    builder
        .create(dir)
        .with_context(|| format!("Failed to create output dir {}", dir.display()))
}

// ── Tests ──
