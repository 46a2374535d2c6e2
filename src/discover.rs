//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// Recursively collect source files under `root`, sorted by path.
///
/// Hidden directories are skipped unless the config includes them;
/// `excluded_paths` globs are matched against paths relative to `root`.
pub fn find_source_files(root: &Path, config: &ScanConfig) -> anyhow::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("not a directory: {}", root.display());
    }

    let excluded = config.exclusion_set()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            config.include_hidden || !e.file_name().to_string_lossy().starts_with('.')
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !config.handles_extension(ext) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if excluded.is_match(rel) {
            debug!(file = %rel.display(), "excluded by config");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered source files");
    Ok(files)
}
