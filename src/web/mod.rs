pub mod templates;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::product::Product;

pub use templates::TeraRenderer;

/// Context shared by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseContext {
    pub path_prefix: String,
}

/// Context of a product listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealzContext {
    #[serde(flatten)]
    pub base: BaseContext,
    pub title: String,
    pub last_updated: DateTime<Utc>,
    pub products: Vec<Product>,
}

/// One render request.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home(BaseContext),
    Dealz(DealzContext),
}

impl Page {
    pub fn base(&self) -> &BaseContext {
        match self {
            Page::Home(base) => base,
            Page::Dealz(ctx) => &ctx.base,
        }
    }
}

/// Writes the HTML for a page into a sink.
pub trait Renderer {
    fn render(&self, page: &Page, out: &mut dyn Write) -> Result<()>;
}

/// Create (or truncate) `dir/filename` and render `page` into it.
///
/// The file exists before the renderer runs. On render failure whatever was
/// written stays on disk.
pub fn render_to_file(
    dir: &Path,
    filename: &str,
    renderer: &dyn Renderer,
    page: &Page,
) -> Result<PathBuf> {
    let path = dir.join(filename);
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    renderer
        .render(page, &mut out)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
