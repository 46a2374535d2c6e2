//! Command-line interface for rolecheck.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::{AnalysisContext, FileReport};
use crate::config::{self, ScanConfig};
use crate::discover::find_source_files;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Template written by `rolecheck init`.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Classify Java types into architectural roles.
///
/// Rolecheck parses Java sources into a structural model (fields, methods,
/// annotations, nested types) and tags every type declaration with the
/// roles its annotations and members suggest: entities, services,
/// repositories, EJBs, CDI injection points, events and observers, JSF
/// beans and validators, logging utilities.
#[derive(Parser)]
#[command(name = "rolecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and classify a file or directory
    #[command(visible_alias = "classify")]
    Scan(ScanArgs),
    /// Write a default config file
    Init(InitArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Exit non-zero if any file fails to parse
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "rolecheck.yaml")]
    pub output: PathBuf,
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let cwd = std::env::current_dir()?;
    let (config, config_path) = match ScanConfig::load(args.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    if let Some(path) = &config_path {
        info!(config = %path.display(), "loaded config");
    }

    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let reports = scan(&abs_path, &config)?;

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&reports)?,
        _ => report::write_pretty(&path_str, &reports),
    }

    let failed = reports.iter().filter(|r| r.is_failed()).count();
    if args.fail_on_error && failed > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Analyze a single file or every source file under a directory.
pub fn scan(path: &Path, config: &ScanConfig) -> anyhow::Result<Vec<FileReport>> {
    let (base_dir, files) = if path.is_dir() {
        (path.to_path_buf(), find_source_files(path, config)?)
    } else {
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        (base, vec![path.to_path_buf()])
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(Vec::new());
    }

    info!(files = files.len(), parallel = config.parallel, "scanning");

    let ctx = AnalysisContext::new(base_dir).max_depth(config.max_nesting_depth);
    let reports = if config.parallel {
        ctx.analyze_files_parallel(&files)
    } else {
        ctx.analyze_files(&files)
    };

    Ok(reports)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: rolecheck scan . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
