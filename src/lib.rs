//! Rolecheck - structural parser and role classifier for Java sources.
//!
//! Rolecheck parses Java files into a normalized structural model and tags
//! each type declaration with the architectural roles it plays (entity,
//! service, repository, EJB, CDI injection/event/observer, JSF bean or
//! validator, logging). The records feed migration planning and schema
//! suggestion tools downstream.
//!
//! # Architecture
//!
//! - `analysis`: tree-sitter parsing, the closed syntax layer, record
//!   assembly and role classification
//! - `discover`: recursive source file discovery
//! - `config`: YAML scan configuration
//! - `report`: Output formatting (pretty, JSON)
//! - `cli`: command-line entry points
//!
//! # Example
//!
//! ```no_run
//! use rolecheck::AnalysisContext;
//!
//! let ctx = AnalysisContext::new(".");
//! let report = ctx.analyze_source("User.java", b"@Entity public class User {}");
//! for decl in report.types() {
//!     println!("{}: {:?}", decl.name, decl.roles);
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod report;

pub use analysis::{
    register_analyzers, AnalysisContext, BatchSummary, FieldInfo, FileOutcome,
    FileReport, LanguageAnalyzer, MethodInfo, ParseError, Record, Role, TypeDeclaration,
    TypeKind,
};
pub use config::ScanConfig;
pub use discover::find_source_files;
pub use error::AnalysisError;
