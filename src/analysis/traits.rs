//! Core traits for language analysis.

use std::path::Path;

use crate::error::Result;

use super::assemble::assemble_unit;
use super::records::TypeDeclaration;
use super::syntax::SyntaxUnit;

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// The tree has already been checked for syntax errors.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file identifier (for error reporting).
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// Language-specific analyzer trait.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser
/// per call. Analyzers themselves hold no mutable state and can be shared
/// across rayon workers.
pub trait LanguageAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "java").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse source into a tree.
    ///
    /// Fails with `AnalysisError::ParseSyntax` if the tree contains any
    /// ERROR or MISSING node; partial trees are never returned.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile>;

    /// Lower a parsed tree into the closed syntax layer.
    ///
    /// Fails with `AnalysisError::StructuralAssumptionViolation` when type
    /// nesting exceeds `max_depth`.
    fn lower(&self, parsed: &ParsedFile, max_depth: usize) -> Result<SyntaxUnit>;

    /// Parse, lower and assemble records for one source text.
    fn analyze(&self, path: &Path, source: &[u8], max_depth: usize) -> Result<Vec<TypeDeclaration>> {
        let parsed = self.parse(path, source)?;
        let unit = self.lower(&parsed, max_depth)?;
        Ok(assemble_unit(&unit))
    }

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
