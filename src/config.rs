//! Scan configuration.
//!
//! A config file is optional; every key has a default.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::DEFAULT_MAX_NESTING_DEPTH;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["rolecheck.yaml", ".rolecheck.yaml"];

/// Top-level scan configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// File extensions to analyze, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip (e.g., "**/generated/**").
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
    /// Whether to descend into hidden directories.
    #[serde(default)]
    pub include_hidden: bool,
    /// Maximum type nesting depth before a file is rejected.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// Analyze files on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

/// Build output and vendored JavaScript, never project sources.
fn default_excluded_paths() -> Vec<String> {
    vec!["**/target/**".to_string(), "**/node_modules/**".to_string()]
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

fn default_parallel() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excluded_paths: default_excluded_paths(),
            include_hidden: false,
            max_nesting_depth: default_max_nesting_depth(),
            parallel: default_parallel(),
        }
    }
}

impl ScanConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. An empty document yields defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ScanConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load from an explicit path, or discover one in `dir`, or fall back
    /// to defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::parse_file(path)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))?;
            return Ok((config, Some(path.to_path_buf())));
        }

        match discover_config(dir) {
            Some(path) => {
                let config = Self::parse_file(&path)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Compile `excluded_paths` into one matcher.
    ///
    /// Globset supports `**` for recursive directory matching. Fails on the
    /// first pattern that does not compile.
    pub fn exclusion_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid excluded path pattern {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Find a config file in `dir`.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config.
pub fn validate(config: &ScanConfig) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must not be empty");
    }

    for ext in &config.extensions {
        if ext.starts_with('.') {
            anyhow::bail!("extension {:?} must not start with a dot", ext);
        }
    }

    config.exclusion_set()?;

    if config.max_nesting_depth == 0 {
        anyhow::bail!("max_nesting_depth must be at least 1");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
extensions: [java]
excluded_paths:
  - "**/generated/**"
max_nesting_depth: 8
parallel: false
"#;
        let config = ScanConfig::parse_str(yaml).unwrap();
        assert_eq!(config.extensions, vec!["java"]);
        assert_eq!(config.max_nesting_depth, 8);
        assert!(!config.parallel);
        assert!(!config.include_hidden);
        validate(&config).unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = ScanConfig::parse_str("").unwrap();
        assert_eq!(config.extensions, vec!["java"]);
        assert_eq!(config.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
        assert!(config.parallel);

        let partial = ScanConfig::parse_str("include_hidden: true").unwrap();
        assert!(partial.include_hidden);
        assert_eq!(partial.extensions, vec!["java"]);
    }

    #[test]
    fn test_excluded_paths() {
        let config = ScanConfig {
            excluded_paths: vec!["**/generated/**".to_string()],
            ..ScanConfig::default()
        };
        let set = config.exclusion_set().unwrap();
        assert!(set.is_match("src/generated/Foo.java"));
        assert!(!set.is_match("src/main/Foo.java"));
    }

    #[test]
    fn test_default_exclusions_are_build_output_only() {
        let config = ScanConfig::parse_str("parallel: false").unwrap();
        assert_eq!(config.excluded_paths, ScanConfig::default().excluded_paths);

        let set = config.exclusion_set().unwrap();
        assert!(set.is_match("target/classes/Gen.java"));
        assert!(set.is_match("web/node_modules/pkg/X.java"));
        assert!(!set.is_match("src/main/java/com/acme/build/BuildService.java"));
        assert!(!set.is_match("src/main/java/com/acme/out/Writer.java"));

        let cleared = ScanConfig::parse_str("excluded_paths: []").unwrap();
        assert!(cleared.exclusion_set().unwrap().is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let dotted = ScanConfig {
            extensions: vec![".java".to_string()],
            ..ScanConfig::default()
        };
        assert!(validate(&dotted).is_err());

        let zero = ScanConfig {
            max_nesting_depth: 0,
            ..ScanConfig::default()
        };
        assert!(validate(&zero).is_err());

        let bad_glob = ScanConfig {
            excluded_paths: vec!["src/[".to_string()],
            ..ScanConfig::default()
        };
        assert!(validate(&bad_glob).is_err());
    }

    #[test]
    fn test_load_discovers_config() {
        let temp = TempDir::new().unwrap();
        let (config, path) = ScanConfig::load(None, temp.path()).unwrap();
        assert!(path.is_none());
        assert!(config.parallel);

        std::fs::write(temp.path().join(".rolecheck.yaml"), "parallel: false\n").unwrap();
        let (config, path) = ScanConfig::load(None, temp.path()).unwrap();
        assert_eq!(path, Some(temp.path().join(".rolecheck.yaml")));
        assert!(!config.parallel);
    }
}
