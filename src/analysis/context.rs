//! Per-file and batch analysis entry points.
//!
//! Every failure is contained at the file boundary: a file that cannot be
//! read, parsed or lowered becomes a single `ParseError` record and the
//! batch moves on to the next file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analysis::{
    get_analyzer, get_analyzer_by_id, FileReport, LanguageAnalyzer, TypeDeclaration,
};
use crate::error::{AnalysisError, Result};

/// Default ceiling on type nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Language assumed for raw source without a file extension.
const DEFAULT_LANGUAGE: &str = "java";

/// Analysis settings shared by every file of a scan.
///
/// Holds no per-file state, so one context can serve many threads.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Base directory for relative path display.
    base_dir: PathBuf,
    max_depth: usize,
}

impl AnalysisContext {
    /// Create a new analysis context.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Set the maximum type nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Analyze raw source text identified by `id`.
    ///
    /// The language is chosen from the extension of `id`; an identifier
    /// without extension is treated as Java.
    pub fn analyze_source(&self, id: &str, source: &[u8]) -> FileReport {
        match self.try_analyze(Path::new(id), source) {
            Ok(types) => {
                debug!(file = id, types = types.len(), "parsed");
                FileReport::parsed(id, types)
            }
            Err(e) => failure(id, e),
        }
    }

    /// Read and analyze one file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> FileReport {
        let path = path.as_ref();
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        let display = self.display_path(&abs_path);

        match fs::read(&abs_path) {
            Ok(source) => self.analyze_source(&display, &source),
            Err(source) => failure(
                &display,
                AnalysisError::Io {
                    file: PathBuf::from(&display),
                    source,
                },
            ),
        }
    }

    /// Analyze multiple files sequentially, in input order.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> Vec<FileReport> {
        paths.iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Analyze multiple files in parallel.
    ///
    /// Uses rayon; results keep the input order.
    pub fn analyze_files_parallel(&self, paths: &[PathBuf]) -> Vec<FileReport> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze_file(p)).collect()
    }

    fn try_analyze(&self, path: &Path, source: &[u8]) -> Result<Vec<TypeDeclaration>> {
        let analyzer = resolve_analyzer(path)?;
        analyzer.analyze(path, source, self.max_depth)
    }

    fn display_path(&self, abs_path: &Path) -> String {
        abs_path
            .strip_prefix(&self.base_dir)
            .unwrap_or(abs_path)
            .to_string_lossy()
            .to_string()
    }
}

fn resolve_analyzer(path: &Path) -> Result<&'static dyn LanguageAnalyzer> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => get_analyzer(ext)
            .ok_or_else(|| AnalysisError::Language(format!("no analyzer for .{} files", ext))),
        None => get_analyzer_by_id(DEFAULT_LANGUAGE)
            .ok_or_else(|| AnalysisError::Language(DEFAULT_LANGUAGE.to_string())),
    }
}

fn failure(id: &str, error: AnalysisError) -> FileReport {
    warn!(file = id, error = %error, "skipping file");
    let message = match &error {
        AnalysisError::Language(_) => format!("failed to parse {}: {}", id, error),
        _ => error.to_string(),
    };
    FileReport::failed(id, message)
}
