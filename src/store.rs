use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::product::PricedProduct;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data dir {} does not exist", dir.display())]
    NotFound { dir: PathBuf },
    #[error("failed to list {}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Missing data dir is the only recoverable load failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// Load every record under `dir`, in file-name order.
///
/// Every regular, non-hidden file holds either one JSON record object or an
/// array of them.
pub fn load_from_dir(dir: &Path) -> Result<Vec<PricedProduct>, LoadError> {
    let files = record_files(dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    for path in &files {
        pb.set_message(display_name(path));
        let batch = load_file(path)?;
        debug!("{}: {} records", path.display(), batch.len());
        records.extend(batch);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}

/// Parse a single record file.
pub fn load_file(path: &Path) -> Result<Vec<PricedProduct>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_err = |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    match serde_json::from_str::<Value>(&text).map_err(parse_err)? {
        Value::Array(items) => items
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(parse_err))
            .collect(),
        other => Ok(vec![serde_json::from_value(other).map_err(parse_err)?]),
    }
}

fn record_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                dir: dir.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(LoadError::ReadDir {
                dir: dir.to_path_buf(),
                source,
            })
        }
    };

    let read_dir_err = |source| LoadError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(read_dir_err)?;

        if !file_type.is_file() || is_hidden(&path) {
            debug!("Skipping {}", path.display());
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Tests ──
