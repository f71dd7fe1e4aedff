use std::path::PathBuf;

use tracing::warn;

/// Subdirectory of the data dir holding the scraper's record files.
pub const RAW_SUBDIR: &str = "raw";

pub const HOME_PAGE: &str = "index.html";
pub const DISCOUNT_PAGE: &str = "discount.html";
pub const OTHER_PAGE: &str = "other.html";

pub const DISCOUNT_TITLE: &str = "Discounted (40%)";
pub const OTHER_TITLE: &str = "Other Products";

/// Everything one generator run needs, passed explicitly down the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub path_prefix: String,
}

impl SiteConfig {
    pub fn new(data_dir: PathBuf, output_dir: PathBuf, path_prefix: &str) -> Self {
        Self {
            data_dir,
            output_dir,
            path_prefix: normalize_prefix(path_prefix),
        }
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join(RAW_SUBDIR)
    }
}

/// Trim trailing slashes so links can be built as `{prefix}/page.html`.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if !trimmed.is_empty() && !trimmed.starts_with('/') {
        warn!("path prefix {:?} should start with '/'", trimmed);
    }
    trimmed.to_string()
}
